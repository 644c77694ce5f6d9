//! Draw-mode state machine.
//!
//! [`ToolState::apply`] is a pure transition: it returns the next state and the
//! declarative UI effects the host should carry out. Nothing in here touches
//! the canvas or any widget.

use serde::{Deserialize, Serialize};

/// How pointer drags are turned into strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PenMode {
    #[default]
    Freehand,
    Line,
    Parabola,
}

impl PenMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Freehand => "Draw",
            Self::Line => "Line",
            Self::Parabola => "Parabola",
        }
    }

    /// Line and Parabola build their strokes from a generated preview
    pub fn is_shape(&self) -> bool {
        !matches!(self, Self::Freehand)
    }
}

/// What an active eraser removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EraserKind {
    /// Whole strokes touched by the pointer
    Stroke,
    /// Only the touched points; the rest of the stroke survives in pieces
    Point,
}

/// Cursor the overlay should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    Default,
    Crosshair,
}

/// How the canvas itself should react to pointer input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditingMode {
    None,
    Ink,
    EraseByStroke,
    EraseByPoint,
}

/// Declarative consequence of a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    Status(&'static str),
    Cursor(CursorKind),
    Editing(EditingMode),
}

/// Inputs to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    SetMode(PenMode),
    SetEraser(bool),
    SetEraserKind(Option<EraserKind>),
    /// off -> Stroke -> Point -> off
    CycleEraser,
    /// Freehand -> Parabola -> Parabola reversed -> Freehand
    ToggleParabola,
    SetDrawingEnabled(bool),
    ToggleDrawing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolState {
    mode: PenMode,
    eraser: Option<EraserKind>,
    curve_reversed: bool,
    drawing_enabled: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            mode: PenMode::Freehand,
            eraser: None,
            curve_reversed: false,
            drawing_enabled: true,
        }
    }
}

/// Result of [`ToolState::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ToolState,
    pub effects: Vec<UiEffect>,
}

impl ToolState {
    pub fn mode(&self) -> PenMode {
        self.mode
    }

    pub fn eraser(&self) -> Option<EraserKind> {
        self.eraser
    }

    pub fn eraser_active(&self) -> bool {
        self.eraser.is_some()
    }

    /// Only meaningful in Parabola mode; always false elsewhere.
    pub fn curve_reversed(&self) -> bool {
        self.curve_reversed
    }

    pub fn drawing_enabled(&self) -> bool {
        self.drawing_enabled
    }

    pub fn apply(self, action: ToolAction) -> Transition {
        let state = self.next(action);
        Transition {
            state,
            effects: state.effects(),
        }
    }

    fn next(self, action: ToolAction) -> Self {
        match action {
            ToolAction::SetMode(mode) => self.with_mode(mode),
            ToolAction::SetEraser(true) => self.with_eraser(Some(self.eraser.unwrap_or(EraserKind::Stroke))),
            ToolAction::SetEraser(false) => self.with_eraser(None),
            ToolAction::SetEraserKind(kind) => self.with_eraser(kind),
            ToolAction::CycleEraser => self.with_eraser(match self.eraser {
                None => Some(EraserKind::Stroke),
                Some(EraserKind::Stroke) => Some(EraserKind::Point),
                Some(EraserKind::Point) => None,
            }),
            ToolAction::ToggleParabola => match (self.mode, self.curve_reversed) {
                (PenMode::Parabola, false) => Self {
                    curve_reversed: true,
                    ..self
                },
                (PenMode::Parabola, true) => self.with_mode(PenMode::Freehand),
                _ => self.with_mode(PenMode::Parabola),
            },
            ToolAction::SetDrawingEnabled(enabled) => Self {
                drawing_enabled: enabled,
                ..self
            },
            ToolAction::ToggleDrawing => Self {
                drawing_enabled: !self.drawing_enabled,
                ..self
            },
        }
    }

    fn with_mode(self, mode: PenMode) -> Self {
        if mode == self.mode {
            return self;
        }
        Self {
            mode,
            eraser: if mode.is_shape() { None } else { self.eraser },
            curve_reversed: false,
            ..self
        }
    }

    fn with_eraser(self, eraser: Option<EraserKind>) -> Self {
        match eraser {
            Some(_) => Self {
                mode: PenMode::Freehand,
                eraser,
                curve_reversed: false,
                ..self
            },
            None => Self { eraser: None, ..self },
        }
    }

    /// Text shown in the info box for this state
    pub fn status_label(&self) -> &'static str {
        if !self.drawing_enabled {
            return "Locked";
        }
        match (self.eraser, self.mode) {
            (Some(EraserKind::Stroke), _) => "Eraser Mode",
            (Some(EraserKind::Point), _) => "Point Eraser Mode",
            (None, PenMode::Freehand) => "Draw Mode",
            (None, PenMode::Line) => "Line Mode",
            (None, PenMode::Parabola) => "Parabola Mode",
        }
    }

    pub fn cursor(&self) -> CursorKind {
        if self.drawing_enabled && self.eraser.is_none() && self.mode.is_shape() {
            CursorKind::Crosshair
        } else {
            CursorKind::Default
        }
    }

    pub fn editing_mode(&self) -> EditingMode {
        if !self.drawing_enabled {
            return EditingMode::None;
        }
        match (self.eraser, self.mode) {
            (Some(EraserKind::Stroke), _) => EditingMode::EraseByStroke,
            (Some(EraserKind::Point), _) => EditingMode::EraseByPoint,
            (None, PenMode::Freehand) => EditingMode::Ink,
            (None, _) => EditingMode::None,
        }
    }

    pub fn effects(&self) -> Vec<UiEffect> {
        vec![
            UiEffect::Status(self.status_label()),
            UiEffect::Cursor(self.cursor()),
            UiEffect::Editing(self.editing_mode()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: ToolState, actions: &[ToolAction]) -> ToolState {
        actions.iter().fold(state, |s, a| s.apply(*a).state)
    }

    #[test]
    fn test_parabola_toggle_cycles_back_to_freehand() {
        let s = ToolState::default();
        let s1 = s.apply(ToolAction::ToggleParabola).state;
        assert_eq!((s1.mode(), s1.curve_reversed()), (PenMode::Parabola, false));
        let s2 = s1.apply(ToolAction::ToggleParabola).state;
        assert_eq!((s2.mode(), s2.curve_reversed()), (PenMode::Parabola, true));
        let s3 = s2.apply(ToolAction::ToggleParabola).state;
        assert_eq!((s3.mode(), s3.curve_reversed()), (PenMode::Freehand, false));
    }

    #[test]
    fn test_toggle_from_line_enters_forward_parabola() {
        let s = run(ToolState::default(), &[ToolAction::SetMode(PenMode::Line), ToolAction::ToggleParabola]);
        assert_eq!(s.mode(), PenMode::Parabola);
        assert!(!s.curve_reversed());
    }

    #[test]
    fn test_eraser_cycle() {
        let s = ToolState::default();
        let s = s.apply(ToolAction::CycleEraser).state;
        assert_eq!(s.eraser(), Some(EraserKind::Stroke));
        let s = s.apply(ToolAction::CycleEraser).state;
        assert_eq!(s.eraser(), Some(EraserKind::Point));
        assert_eq!(s.status_label(), "Point Eraser Mode");
        let s = s.apply(ToolAction::CycleEraser).state;
        assert_eq!(s.eraser(), None);
    }

    #[test]
    fn test_effects_follow_state() {
        let t = ToolState::default().apply(ToolAction::SetMode(PenMode::Line));
        assert_eq!(
            t.effects,
            vec![
                UiEffect::Status("Line Mode"),
                UiEffect::Cursor(CursorKind::Crosshair),
                UiEffect::Editing(EditingMode::None),
            ]
        );
    }

    #[test]
    fn test_lock_overrides_label() {
        let s = ToolState::default().apply(ToolAction::ToggleDrawing).state;
        assert_eq!(s.status_label(), "Locked");
        assert_eq!(s.editing_mode(), EditingMode::None);
        let s = s.apply(ToolAction::ToggleDrawing).state;
        assert_eq!(s.status_label(), "Draw Mode");
    }
}
