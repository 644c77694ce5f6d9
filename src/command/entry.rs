use crate::document::{StrokeCanvas, StrokesChanged};
use crate::stroke::StrokeBatch;

/// Direction of a recorded canvas change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Added,
    Removed,
}

/// One undoable user action: a non-empty batch that was added or removed.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    batch: StrokeBatch,
    kind: EntryKind,
}

impl HistoryEntry {
    /// `None` for an empty batch; empty batches are never recorded.
    pub fn new(batch: StrokeBatch, kind: EntryKind) -> Option<Self> {
        if batch.is_empty() {
            None
        } else {
            Some(Self { batch, kind })
        }
    }

    pub fn batch(&self) -> &StrokeBatch {
        &self.batch
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Apply the inverse of this entry to the canvas (undo)
    pub fn revert<C: StrokeCanvas + ?Sized>(&self, canvas: &mut C) -> StrokesChanged {
        match self.kind {
            EntryKind::Added => canvas.remove_batch(&self.batch),
            EntryKind::Removed => canvas.add_batch(&self.batch),
        }
    }

    /// Apply this entry's original action to the canvas again (redo)
    pub fn replay<C: StrokeCanvas + ?Sized>(&self, canvas: &mut C) -> StrokesChanged {
        match self.kind {
            EntryKind::Added => canvas.add_batch(&self.batch),
            EntryKind::Removed => canvas.remove_batch(&self.batch),
        }
    }
}
