use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::event::{EventHandler, OverlayEvent};
use crate::tool::{CursorKind, EditingMode, ToolState};

/// The overlay's one-line info box: a static status label, temporarily
/// replaced by notices.
#[derive(Debug, Clone)]
pub struct InfoBox {
    status: &'static str,
    notice: Option<(String, Instant)>,
    notice_duration: Duration,
}

impl InfoBox {
    pub fn new(status: &'static str, notice_duration: Duration) -> Self {
        Self {
            status,
            notice: None,
            notice_duration,
        }
    }

    pub fn set_status(&mut self, status: &'static str) {
        self.status = status;
    }

    pub fn show_notice(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some((text.into(), now));
    }

    /// Text to display at `now`. Expired notices fall back to the status label.
    pub fn text(&mut self, now: Instant) -> &str {
        let expired = matches!(&self.notice, Some((_, since)) if now.duration_since(*since) >= self.notice_duration);
        if expired {
            self.notice = None;
        }
        match &self.notice {
            Some((text, _)) => text,
            None => self.status,
        }
    }

    pub fn has_notice(&self) -> bool {
        self.notice.is_some()
    }
}

/// Feeds status and notice events into a shared [`InfoBox`]
pub struct InfoBoxHandler {
    info: Arc<Mutex<InfoBox>>,
}

impl InfoBoxHandler {
    pub fn new(info: Arc<Mutex<InfoBox>>) -> Self {
        Self { info }
    }
}

impl EventHandler for InfoBoxHandler {
    fn handle_event(&mut self, event: &OverlayEvent) {
        match event {
            OverlayEvent::StatusChanged(status) => self.info.lock().set_status(status),
            OverlayEvent::Notice(text) => self.info.lock().show_notice(text.clone(), Instant::now()),
            _ => {}
        }
    }
}

/// How the canvas presents itself to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLook {
    pub cursor: CursorKind,
    pub editing: EditingMode,
}

impl CanvasLook {
    pub fn of(tool: &ToolState) -> Self {
        Self {
            cursor: tool.cursor(),
            editing: tool.editing_mode(),
        }
    }

    pub fn is_erasing(&self) -> bool {
        matches!(self.editing, EditingMode::EraseByStroke | EditingMode::EraseByPoint)
    }
}

/// Keeps a shared [`CanvasLook`] in step with cursor and editing changes
pub struct CanvasLookHandler {
    look: Arc<Mutex<CanvasLook>>,
}

impl CanvasLookHandler {
    pub fn new(look: Arc<Mutex<CanvasLook>>) -> Self {
        Self { look }
    }
}

impl EventHandler for CanvasLookHandler {
    fn handle_event(&mut self, event: &OverlayEvent) {
        match event {
            OverlayEvent::CursorChanged(cursor) => self.look.lock().cursor = *cursor,
            OverlayEvent::EditingChanged(editing) => self.look.lock().editing = *editing,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires_back_to_status() {
        let mut info = InfoBox::new("Draw Mode", Duration::from_secs(2));
        let t0 = Instant::now();
        info.show_notice("Ink saved", t0);
        assert_eq!(info.text(t0 + Duration::from_millis(500)), "Ink saved");
        info.set_status("Eraser Mode");
        assert_eq!(info.text(t0 + Duration::from_secs(3)), "Eraser Mode");
        assert!(!info.has_notice());
    }

    #[test]
    fn test_canvas_look_follows_events() {
        let look = Arc::new(Mutex::new(CanvasLook::of(&ToolState::default())));
        assert_eq!(look.lock().editing, EditingMode::Ink);
        let mut handler = CanvasLookHandler::new(Arc::clone(&look));

        handler.handle_event(&OverlayEvent::CursorChanged(CursorKind::Crosshair));
        handler.handle_event(&OverlayEvent::EditingChanged(EditingMode::EraseByPoint));
        handler.handle_event(&OverlayEvent::StatusChanged("Point Eraser Mode"));

        let look = *look.lock();
        assert_eq!(look.cursor, CursorKind::Crosshair);
        assert!(look.is_erasing());
    }
}
