use crate::stroke::{StrokeBatch, StrokeId, StrokeRef};

/// What a canvas mutation actually did.
///
/// Strokes that were already present (on add) or already gone (on remove) do
/// not show up here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokesChanged {
    pub added: StrokeBatch,
    pub removed: StrokeBatch,
}

impl StrokesChanged {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn merge(&mut self, other: StrokesChanged) {
        self.added.extend(other.added);
        self.removed.extend(other.removed);
    }
}

/// The drawing surface as seen by the editing engine.
pub trait StrokeCanvas {
    fn add_batch(&mut self, batch: &StrokeBatch) -> StrokesChanged;

    fn remove_batch(&mut self, batch: &StrokeBatch) -> StrokesChanged;

    /// Swap `old` for `new` in one update. Adds before removing so the surface
    /// never shows neither; a stroke listed in both stays.
    fn replace_batch(&mut self, old: &StrokeBatch, new: &StrokeBatch) -> StrokesChanged {
        let mut change = self.add_batch(new);
        let gone: StrokeBatch = old.iter().filter(|stroke| !new.contains(stroke.id())).cloned().collect();
        change.merge(self.remove_batch(&gone));
        change
    }
}

/// Committed strokes in drawing order
#[derive(Debug, Clone, Default)]
pub struct Document {
    strokes: Vec<StrokeRef>,
    revision: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.strokes.iter().any(|s| s.id() == id)
    }

    /// Bumped on every mutation; used to tell whether the canvas changed since a save.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn clear(&mut self) -> StrokesChanged {
        let removed: StrokeBatch = std::mem::take(&mut self.strokes).into_iter().collect();
        if !removed.is_empty() {
            self.revision += 1;
        }
        StrokesChanged {
            added: StrokeBatch::new(),
            removed,
        }
    }

    /// Drop everything and take `strokes` as the new content (file load)
    pub fn replace_all(&mut self, strokes: impl IntoIterator<Item = StrokeRef>) -> StrokesChanged {
        let mut change = self.clear();
        let added: StrokeBatch = strokes.into_iter().collect();
        change.merge(self.add_batch(&added));
        change
    }
}

impl StrokeCanvas for Document {
    fn add_batch(&mut self, batch: &StrokeBatch) -> StrokesChanged {
        let mut added = StrokeBatch::new();
        for stroke in batch.iter() {
            if !self.contains(stroke.id()) && !added.contains(stroke.id()) {
                self.strokes.push(stroke.clone());
                added.push(stroke.clone());
            }
        }
        if !added.is_empty() {
            self.revision += 1;
        }
        StrokesChanged {
            added,
            removed: StrokeBatch::new(),
        }
    }

    fn remove_batch(&mut self, batch: &StrokeBatch) -> StrokesChanged {
        let mut removed = StrokeBatch::new();
        self.strokes.retain(|stroke| {
            if batch.contains(stroke.id()) {
                removed.push(stroke.clone());
                false
            } else {
                true
            }
        });
        if !removed.is_empty() {
            self.revision += 1;
        }
        StrokesChanged {
            added: StrokeBatch::new(),
            removed,
        }
    }
}
