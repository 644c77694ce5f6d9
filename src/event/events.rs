use crate::tool::{CursorKind, EditingMode};

/// Broadcast by the editor context whenever something the host displays changed
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    /// Only sent when at least one of the flags actually flipped
    HistoryAvailabilityChanged {
        can_undo: bool,
        can_redo: bool,
    },
    StatusChanged(&'static str),
    CursorChanged(CursorKind),
    EditingChanged(EditingMode),
    /// Transient message ("Ink saved", "Cleared", ...)
    Notice(String),
    /// A gesture finished and its strokes were added to the canvas
    StrokesCommitted {
        count: usize,
    },
    ParabolaFactorChanged(f64),
}
