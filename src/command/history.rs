use log::debug;

use super::{EntryKind, HistoryEntry};
use crate::document::StrokesChanged;
use crate::stroke::StrokeBatch;

/// Undo/redo availability, reported to the UI whenever it changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Availability {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Undo and redo stacks of stroke mutations.
///
/// The history never touches the canvas. Undo and redo are a two-step
/// protocol: [`undo`](Self::undo) pops the entry, the caller applies its
/// inverse, then hands it back through [`finish_undo`](Self::finish_undo)
/// (likewise for redo). Replay moves entries between the stacks and never
/// duplicates them.
#[derive(Debug, Default)]
pub struct StrokeHistory {
    /// Stack of entries that can be undone
    undo_stack: Vec<HistoryEntry>,
    /// Stack of entries that can be redone
    redo_stack: Vec<HistoryEntry>,
}

impl StrokeHistory {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a user-made addition. Empty batches are ignored.
    ///
    /// Returns whether an entry was pushed; if so the redo stack is gone.
    pub fn record_added(&mut self, batch: StrokeBatch) -> bool {
        self.record(batch, EntryKind::Added)
    }

    /// Record a user-made removal. Empty batches are ignored.
    pub fn record_removed(&mut self, batch: StrokeBatch) -> bool {
        self.record(batch, EntryKind::Removed)
    }

    /// Record a canvas change notification: additions first, then removals.
    pub fn record_change(&mut self, change: StrokesChanged) -> bool {
        let added = self.record_added(change.added);
        let removed = self.record_removed(change.removed);
        added || removed
    }

    fn record(&mut self, batch: StrokeBatch, kind: EntryKind) -> bool {
        let Some(entry) = HistoryEntry::new(batch, kind) else {
            return false;
        };
        debug!("history: recording {:?} of {} stroke(s)", kind, entry.batch().len());
        self.undo_stack.push(entry);
        self.redo_stack.clear(); // A new change invalidates everything that was undone
        true
    }

    /// Pop the most recent entry. The caller reverts it on the canvas and then
    /// passes it to [`finish_undo`](Self::finish_undo).
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        self.undo_stack.pop()
    }

    pub fn finish_undo(&mut self, entry: HistoryEntry) {
        self.redo_stack.push(entry);
    }

    /// Pop the most recently undone entry. The caller replays it on the canvas
    /// and then passes it to [`finish_redo`](Self::finish_redo).
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        self.redo_stack.pop()
    }

    pub fn finish_redo(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);
    }

    /// Returns true if there are entries that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are entries that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn availability(&self) -> Availability {
        Availability {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    pub fn undo_stack(&self) -> &[HistoryEntry] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[HistoryEntry] {
        &self.redo_stack
    }

    /// Empty both stacks (canvas cleared or file loaded)
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
