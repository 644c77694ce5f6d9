/// The controller of the overlay, owning every piece of editing state.
///
/// The `EditorContext` is the only thing the host talks to. It routes pointer
/// input through the interaction session, keeps canvas changes and the
/// history in step, runs mode transitions and broadcasts what changed on its
/// [`EventBus`].
///
/// Everything here runs on the UI thread. Background work (saving, loading,
/// exporting) hands its result back and the host applies it through methods
/// such as [`EditorContext::load_strokes`].
///
/// # Example
///
/// ```rust,no_run
/// use ink_overlay::{EditorContext, OverlayConfig};
/// use egui::pos2;
///
/// let mut context = EditorContext::new(OverlayConfig::default());
/// context.pointer_down(pos2(10.0, 10.0));
/// context.pointer_move(pos2(20.0, 30.0));
/// context.pointer_up(pos2(20.0, 30.0));
/// assert!(context.can_undo());
/// context.undo();
/// ```
use egui::{Color32, Pos2};
use log::{debug, info};

use crate::command::StrokeHistory;
use crate::config::OverlayConfig;
use crate::document::{Document, StrokesChanged};
use crate::event::{EventBus, NotificationGate, OverlayEvent};
use crate::geometry::{CurveParams, DrawBounds, adjust_curve_parameter};
use crate::input::{InputEvent, InteractionSession, SessionEnv, Shortcut, shortcut_for};
use crate::stroke::StrokeRef;
use crate::tool::{BrushSettings, PenMode, ToolAction, ToolState, Transition, UiEffect};

#[derive(Debug)]
pub struct EditorContext {
    document: Document,
    history: StrokeHistory,
    tool: ToolState,
    brush: BrushSettings,
    session: InteractionSession,
    gate: NotificationGate,
    bounds: DrawBounds,
    config: OverlayConfig,
    event_bus: EventBus,
    saved_revision: Option<u64>,
}

impl EditorContext {
    pub fn new(config: OverlayConfig) -> Self {
        let document = Document::new();
        let saved_revision = Some(document.revision());
        Self {
            document,
            history: StrokeHistory::new(),
            tool: ToolState::default(),
            brush: config.brush(),
            session: InteractionSession::new(),
            gate: NotificationGate::new(),
            bounds: DrawBounds::default(),
            config,
            event_bus: EventBus::new(),
            saved_revision,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn tool_state(&self) -> ToolState {
        self.tool
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    pub fn bounds(&self) -> DrawBounds {
        self.bounds
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Current settings, including the parabola factor and brush selection as
    /// changed by the user
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn parabola_factor(&self) -> f64 {
        self.config.parabola_factor()
    }

    pub fn status_label(&self) -> &'static str {
        self.tool.status_label()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Refresh the drawable area after a resize
    pub fn set_bounds(&mut self, bounds: DrawBounds) {
        self.bounds = bounds;
    }

    // ---- Modes ----

    /// Run a mode transition and return the UI effects of the resulting state.
    ///
    /// Effects that differ from the previous state are broadcast on the event
    /// bus, which is how the host learns about them.
    pub fn apply(&mut self, action: ToolAction) -> Vec<UiEffect> {
        let old = self.tool;
        let Transition { state, effects } = old.apply(action);
        if state == old {
            return effects;
        }
        debug!("tool: {:?} -> {:?}", old, state);
        self.tool = state;

        if !state.drawing_enabled() {
            self.cancel_drag();
        } else if state.curve_reversed() != old.curve_reversed() {
            self.refresh_preview();
        }

        for effect in &effects {
            let event = match *effect {
                UiEffect::Status(label) if label != old.status_label() => OverlayEvent::StatusChanged(label),
                UiEffect::Cursor(kind) if kind != old.cursor() => OverlayEvent::CursorChanged(kind),
                UiEffect::Editing(mode) if mode != old.editing_mode() => OverlayEvent::EditingChanged(mode),
                _ => continue,
            };
            self.event_bus.emit(event);
        }
        effects
    }

    pub fn set_mode(&mut self, mode: PenMode) -> Vec<UiEffect> {
        self.apply(ToolAction::SetMode(mode))
    }

    pub fn set_eraser_active(&mut self, active: bool) -> Vec<UiEffect> {
        self.apply(ToolAction::SetEraser(active))
    }

    pub fn toggle_parabola_reversal(&mut self) -> Vec<UiEffect> {
        self.apply(ToolAction::ToggleParabola)
    }

    /// Pick an ink color; this also puts the eraser away
    pub fn set_color(&mut self, color: Color32) {
        self.brush.color = color;
        self.config.color = color;
        self.apply(ToolAction::SetEraser(false));
    }

    pub fn cycle_brush(&mut self, step: isize) -> f32 {
        let size = self.brush.cycle(step);
        self.config.brush_index = self.brush.index();
        size
    }

    // ---- Pointer input ----

    fn session_parts(&mut self) -> (&mut InteractionSession, SessionEnv<'_>) {
        let curve = CurveParams::new(self.config.parabola_factor(), self.tool.curve_reversed());
        let env = SessionEnv {
            tool: self.tool,
            curve,
            bounds: self.bounds,
            brush: &self.brush,
            document: &mut self.document,
            history: &mut self.history,
            gate: &self.gate,
        };
        (&mut self.session, env)
    }

    /// Run `f` and broadcast undo/redo availability if it flipped
    fn track<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let before = self.history.availability();
        let result = f(self);
        let after = self.history.availability();
        if before != after {
            self.event_bus.emit(OverlayEvent::HistoryAvailabilityChanged {
                can_undo: after.can_undo,
                can_redo: after.can_redo,
            });
        }
        result
    }

    pub fn pointer_down(&mut self, position: Pos2) -> bool {
        self.track(|ctx| {
            let (session, mut env) = ctx.session_parts();
            session.on_pointer_down(position, &mut env)
        })
    }

    pub fn pointer_move(&mut self, position: Pos2) -> bool {
        self.track(|ctx| {
            let (session, mut env) = ctx.session_parts();
            session.on_pointer_move(position, &mut env)
        })
    }

    /// Finish the gesture; returns how many strokes were committed
    pub fn pointer_up(&mut self, position: Pos2) -> usize {
        let count = self.track(|ctx| {
            let (session, mut env) = ctx.session_parts();
            session.on_pointer_up(position, &mut env)
        });
        if count > 0 {
            self.event_bus.emit(OverlayEvent::StrokesCommitted { count });
        }
        count
    }

    /// Drop the active gesture without committing it
    pub fn cancel_drag(&mut self) -> bool {
        let (session, mut env) = self.session_parts();
        session.cancel(&mut env)
    }

    fn refresh_preview(&mut self) -> bool {
        let (session, mut env) = self.session_parts();
        session.refresh(&mut env)
    }

    /// Scroll wheel: reshape the parabola in Parabola mode, otherwise step the brush size
    pub fn wheel(&mut self, raw_delta: f32) {
        if raw_delta == 0.0 || !self.tool.drawing_enabled() {
            return;
        }
        if self.tool.mode() != PenMode::Parabola || self.tool.eraser_active() {
            self.cycle_brush(if raw_delta < 0.0 { -1 } else { 1 });
            return;
        }

        let step = f64::from((raw_delta / self.config.wheel_step).trunc());
        let Some((start, end)) = self.session.anchor() else {
            return;
        };
        if step == 0.0 {
            return;
        }
        let old = self.config.parabola_factor();
        let k = adjust_curve_parameter(old, start, end, step);
        if k != old {
            debug!("parabola factor {} -> {}", old, k);
            self.config.parabola_factor = k;
            self.event_bus.emit(OverlayEvent::ParabolaFactorChanged(k));
            self.refresh_preview();
        }
    }

    pub fn shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::ToggleDrawing => {
                self.apply(ToolAction::ToggleDrawing);
            }
            Shortcut::Undo => {
                self.undo();
            }
            Shortcut::Redo => {
                self.redo();
            }
            Shortcut::Eraser => {
                self.apply(ToolAction::SetEraser(true));
            }
            Shortcut::Draw => {
                self.apply(ToolAction::SetEraser(false));
                self.apply(ToolAction::SetMode(PenMode::Freehand));
            }
            Shortcut::Line => {
                self.apply(ToolAction::SetMode(PenMode::Line));
            }
            Shortcut::BrushUp => {
                self.cycle_brush(1);
            }
            Shortcut::BrushDown => {
                self.cycle_brush(-1);
            }
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { position } => {
                self.pointer_down(*position);
            }
            InputEvent::PointerMove { position } => {
                self.pointer_move(*position);
            }
            InputEvent::PointerUp { position } => {
                self.pointer_up(*position);
            }
            InputEvent::Wheel { delta } => self.wheel(*delta),
            InputEvent::KeyDown { key } => {
                if let Some(shortcut) = shortcut_for(*key, self.tool.drawing_enabled()) {
                    self.shortcut(shortcut);
                }
            }
        }
    }

    // ---- History ----

    /// Feed a change notification from the canvas into the history
    pub fn on_strokes_changed(&mut self, change: StrokesChanged) -> bool {
        self.track(|ctx| ctx.gate.deliver(change, &mut ctx.history))
    }

    pub fn undo(&mut self) -> bool {
        self.track(|ctx| {
            ctx.cancel_drag();
            let Some(entry) = ctx.history.undo() else {
                return false;
            };
            {
                let _replaying = ctx.gate.suppress();
                let change = entry.revert(&mut ctx.document);
                ctx.gate.deliver(change, &mut ctx.history);
            }
            ctx.history.finish_undo(entry);
            true
        })
    }

    pub fn redo(&mut self) -> bool {
        self.track(|ctx| {
            ctx.cancel_drag();
            let Some(entry) = ctx.history.redo() else {
                return false;
            };
            {
                let _replaying = ctx.gate.suppress();
                let change = entry.replay(&mut ctx.document);
                ctx.gate.deliver(change, &mut ctx.history);
            }
            ctx.history.finish_redo(entry);
            true
        })
    }

    // ---- Whole-canvas operations ----

    /// Remove every stroke and forget the history
    pub fn clear(&mut self) {
        self.track(|ctx| {
            ctx.cancel_drag();
            {
                let _clearing = ctx.gate.suppress();
                let change = ctx.document.clear();
                ctx.gate.deliver(change, &mut ctx.history);
            }
            ctx.history.clear();
        });
        info!("Canvas cleared");
        self.notify("Cleared");
    }

    /// Replace the canvas with loaded strokes and forget the history
    pub fn load_strokes(&mut self, strokes: Vec<StrokeRef>) {
        let count = strokes.len();
        self.track(|ctx| {
            ctx.cancel_drag();
            {
                let _loading = ctx.gate.suppress();
                let change = ctx.document.replace_all(strokes);
                ctx.gate.deliver(change, &mut ctx.history);
            }
            ctx.history.clear();
        });
        self.mark_saved();
        info!("Loaded {} stroke(s)", count);
        self.notify("Ink loaded");
    }

    /// Snapshot of the committed strokes, for saving or exporting
    pub fn snapshot(&self) -> (u64, Vec<StrokeRef>) {
        (self.document.revision(), self.document.strokes().to_vec())
    }

    pub fn mark_saved(&mut self) {
        self.saved_revision = Some(self.document.revision());
    }

    /// Mark the canvas as saved as of `revision`; edits made after the
    /// snapshot keep it unsaved
    pub fn mark_saved_at(&mut self, revision: u64) {
        self.saved_revision = Some(revision);
    }

    pub fn is_unsaved(&self) -> bool {
        !self.document.is_empty() && self.saved_revision != Some(self.document.revision())
    }

    /// Show a transient message in place of the status label
    pub fn notify(&self, text: impl Into<String>) {
        self.event_bus.emit(OverlayEvent::Notice(text.into()));
    }
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}
