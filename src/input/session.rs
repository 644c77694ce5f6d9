//! Per-gesture state between pointer-down and pointer-up.
//!
//! Out-of-order pointer events are expected (a focus change can swallow an
//! up event), so every entry point treats a call in the wrong state as a
//! no-op and reports that through its return value.

use egui::Pos2;
use log::{debug, trace};

use crate::command::StrokeHistory;
use crate::document::{Document, StrokeCanvas};
use crate::event::{NotificationGate, SuppressionGuard};
use crate::geometry::hit_testing::{split_points, stroke_hit};
use crate::geometry::{CurveParams, DrawBounds, generate};
use crate::stroke::{Stroke, StrokeBatch};
use crate::tool::{BrushSettings, EraserKind, PenMode, ToolState};

/// Everything a gesture reads or mutates, borrowed from the owner for one call
pub struct SessionEnv<'a> {
    pub tool: ToolState,
    pub curve: CurveParams,
    pub bounds: DrawBounds,
    pub brush: &'a BrushSettings,
    pub document: &'a mut Document,
    pub history: &'a mut StrokeHistory,
    pub gate: &'a NotificationGate,
}

#[derive(Debug)]
enum Gesture {
    /// Freehand ink; the points become one stroke at pointer-up
    Ink { points: Vec<Pos2> },
    /// Line or parabola. The preview lives on the canvas while notifications
    /// are held back, and is committed to the history directly.
    Shape {
        mode: PenMode,
        preview: StrokeBatch,
        _suppressed: SuppressionGuard,
    },
    Erase { kind: EraserKind },
}

/// A drag in progress
#[derive(Debug)]
pub struct DragSession {
    start: Pos2,
    last: Pos2,
    gesture: Gesture,
}

impl DragSession {
    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn last_position(&self) -> Pos2 {
        self.last
    }

    /// Preview strokes currently shown on the canvas; empty outside line/parabola drags
    pub fn preview(&self) -> Option<&StrokeBatch> {
        match &self.gesture {
            Gesture::Shape { preview, .. } => Some(preview),
            _ => None,
        }
    }
}

/// Idle -> Dragging -> Idle
#[derive(Debug, Default)]
pub struct InteractionSession {
    drag: Option<DragSession>,
    last_gesture: Option<(Pos2, Pos2)>,
}

impl InteractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Start and end of the active drag, or of the last finished one
    pub fn anchor(&self) -> Option<(Pos2, Pos2)> {
        self.drag
            .as_ref()
            .map(|d| (d.start, d.last))
            .or(self.last_gesture)
    }

    /// Points of the freehand stroke being drawn, for rendering
    pub fn live_ink(&self) -> Option<&[Pos2]> {
        match self.drag.as_ref().map(|d| &d.gesture) {
            Some(Gesture::Ink { points }) => Some(points),
            _ => None,
        }
    }

    pub fn on_pointer_down(&mut self, point: Pos2, env: &mut SessionEnv<'_>) -> bool {
        if self.drag.is_some() {
            debug!("session: pointer-down while dragging, ignored");
            return false;
        }
        if !env.tool.drawing_enabled() {
            trace!("session: drawing locked, pointer-down ignored");
            return false;
        }

        let gesture = match (env.tool.eraser(), env.tool.mode()) {
            (Some(kind), _) => {
                erase_at(point, kind, env);
                Gesture::Erase { kind }
            }
            (None, PenMode::Freehand) => Gesture::Ink {
                points: vec![point],
            },
            (None, mode) => Gesture::Shape {
                mode,
                preview: StrokeBatch::new(),
                _suppressed: env.gate.suppress(),
            },
        };
        debug!("session: drag started at {:?} ({:?})", point, gesture);
        self.drag = Some(DragSession {
            start: point,
            last: point,
            gesture,
        });
        true
    }

    pub fn on_pointer_move(&mut self, point: Pos2, env: &mut SessionEnv<'_>) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            trace!("session: stray pointer-move ignored");
            return false;
        };
        drag.last = point;
        let start = drag.start;
        match &mut drag.gesture {
            Gesture::Ink { points } => {
                if points.last() != Some(&point) {
                    points.push(point);
                }
            }
            Gesture::Erase { kind } => erase_at(point, *kind, env),
            Gesture::Shape { mode, preview, .. } => {
                let next = build_preview(*mode, start, point, env);
                let change = env.document.replace_batch(preview, &next);
                // Suppressed for the lifetime of the drag; nothing is recorded
                env.gate.deliver(change, env.history);
                *preview = next;
            }
        }
        true
    }

    /// Regenerate the preview against the last pointer position, after the
    /// curve parameters changed mid-drag.
    pub fn refresh(&mut self, env: &mut SessionEnv<'_>) -> bool {
        let Some(last) = self.drag.as_ref().filter(|d| d.preview().is_some()).map(|d| d.last) else {
            return false;
        };
        self.on_pointer_move(last, env)
    }

    /// Finish the drag. Returns the number of strokes committed to the canvas.
    pub fn on_pointer_up(&mut self, point: Pos2, env: &mut SessionEnv<'_>) -> usize {
        let Some(drag) = self.drag.take() else {
            trace!("session: stray pointer-up ignored");
            return 0;
        };
        self.last_gesture = Some((drag.start, drag.last));

        match drag.gesture {
            Gesture::Ink { mut points } => {
                if points.last() != Some(&point) {
                    points.push(point);
                }
                let Some(stroke) = Stroke::new_ref(points, env.brush.style()) else {
                    return 0;
                };
                let change = env.document.add_batch(&StrokeBatch::single(stroke));
                let count = change.added.len();
                env.gate.deliver(change, env.history);
                count
            }
            Gesture::Erase { .. } => 0,
            Gesture::Shape {
                preview,
                _suppressed,
                ..
            } => {
                let count = preview.len();
                if env.history.record_added(preview) {
                    debug!("session: committed {} preview stroke(s)", count);
                }
                count
                // `_suppressed` drops here and notifications flow again
            }
        }
    }

    /// Abandon the drag without committing anything. A shape preview is taken
    /// off the canvas.
    pub fn cancel(&mut self, env: &mut SessionEnv<'_>) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        if let Gesture::Shape { preview, _suppressed, .. } = drag.gesture {
            let change = env.document.remove_batch(&preview);
            env.gate.deliver(change, env.history);
        }
        debug!("session: drag cancelled");
        true
    }
}

fn build_preview(mode: PenMode, start: Pos2, end: Pos2, env: &SessionEnv<'_>) -> StrokeBatch {
    let style = env.brush.style().for_shapes();
    generate(mode, start, end, env.curve, &env.bounds)
        .into_iter()
        .filter_map(|points| Stroke::new_ref(points, style))
        .collect()
}

fn erase_at(point: Pos2, kind: EraserKind, env: &mut SessionEnv<'_>) {
    let radius = env.brush.eraser_radius();
    let hit: StrokeBatch = env
        .document
        .strokes()
        .iter()
        .filter(|stroke| stroke_hit(stroke, point, radius))
        .cloned()
        .collect();
    if hit.is_empty() {
        return;
    }

    let change = match kind {
        EraserKind::Stroke => env.document.remove_batch(&hit),
        EraserKind::Point => {
            let mut cut = StrokeBatch::new();
            let mut fragments = StrokeBatch::new();
            for stroke in hit.iter() {
                let Some(runs) = split_points(stroke, point, radius) else {
                    continue;
                };
                cut.push(stroke.clone());
                for run in runs {
                    if let Some(fragment) = Stroke::new_ref(run, *stroke.style()) {
                        fragments.push(fragment);
                    }
                }
            }
            if cut.is_empty() {
                return;
            }
            env.document.replace_batch(&cut, &fragments)
        }
    };
    env.gate.deliver(change, env.history);
}
