#![allow(dead_code)]

use std::sync::Arc;

use egui::{Pos2, pos2};
use ink_overlay::{EditorContext, EventHandler, OverlayConfig, OverlayEvent};
use parking_lot::Mutex;

/// Collects every event emitted on a context's bus
pub struct Recorder(pub Arc<Mutex<Vec<OverlayEvent>>>);

impl EventHandler for Recorder {
    fn handle_event(&mut self, event: &OverlayEvent) {
        self.0.lock().push(event.clone());
    }
}

pub fn context() -> EditorContext {
    EditorContext::new(OverlayConfig::default())
}

pub fn recording_context() -> (EditorContext, Arc<Mutex<Vec<OverlayEvent>>>) {
    recording_context_with(OverlayConfig::default())
}

pub fn recording_context_with(config: OverlayConfig) -> (EditorContext, Arc<Mutex<Vec<OverlayEvent>>>) {
    let context = EditorContext::new(config);
    let events = Arc::new(Mutex::new(Vec::new()));
    context.event_bus().subscribe(Box::new(Recorder(Arc::clone(&events))));
    (context, events)
}

/// Drag through `points` with the current tool
pub fn drag(context: &mut EditorContext, points: &[Pos2]) -> usize {
    let Some((first, rest)) = points.split_first() else {
        return 0;
    };
    context.pointer_down(*first);
    for point in rest {
        context.pointer_move(*point);
    }
    context.pointer_up(*points.last().unwrap_or(first))
}

/// A short freehand stroke starting at `(x, y)`
pub fn scribble(context: &mut EditorContext, x: f32, y: f32) -> usize {
    drag(context, &[pos2(x, y), pos2(x + 10.0, y + 5.0), pos2(x + 20.0, y)])
}
