use std::cell::Cell;
use std::rc::Rc;

use crate::command::StrokeHistory;
use crate::document::StrokesChanged;

/// Decides whether canvas change notifications reach the history.
///
/// Suppression is scoped: [`suppress`](Self::suppress) hands out a guard and
/// notifications flow again once every guard has been dropped, whichever way
/// the holder exits. Guards nest.
#[derive(Debug, Clone, Default)]
pub struct NotificationGate {
    depth: Rc<Cell<u32>>,
}

/// Keeps notifications suppressed while alive
#[derive(Debug)]
#[must_use = "notifications are only suppressed while the guard is alive"]
pub struct SuppressionGuard {
    depth: Rc<Cell<u32>>,
}

impl NotificationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suppress(&self) -> SuppressionGuard {
        self.depth.set(self.depth.get() + 1);
        SuppressionGuard {
            depth: Rc::clone(&self.depth),
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.depth.get() > 0
    }

    /// Route a canvas change into the history unless suppressed.
    ///
    /// Returns whether anything was recorded.
    pub fn deliver(&self, change: StrokesChanged, history: &mut StrokeHistory) -> bool {
        if change.is_empty() {
            return false;
        }
        if self.is_suppressed() {
            log::trace!(
                "gate: dropping notification (+{} / -{})",
                change.added.len(),
                change.removed.len()
            );
            return false;
        }
        history.record_change(change)
    }
}

impl Drop for SuppressionGuard {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
