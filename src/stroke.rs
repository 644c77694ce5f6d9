use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Stable identity of a committed stroke.
///
/// Two strokes with identical points are still different strokes; batches are
/// added to and removed from the canvas by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrokeId(Uuid);

impl StrokeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Shape of the pen tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StylusTip {
    #[default]
    Ellipse,
    Rectangle,
}

/// Visual style of a stroke. Opaque to the editing engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    pub tip: StylusTip,
}

impl StrokeStyle {
    pub fn new(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            tip: StylusTip::Ellipse,
        }
    }

    /// Style used for generated line and curve strokes
    pub fn for_shapes(&self) -> Self {
        Self {
            tip: StylusTip::Ellipse,
            ..*self
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Color32::from_rgb(0xe5, 0x39, 0x35), 5.0)
    }
}

// Immutable stroke for sharing between the canvas and the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Pos2>,
    style: StrokeStyle,
}

pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    /// Create a stroke from surface-local points. Returns `None` for an empty point list.
    pub fn new(points: Vec<Pos2>, style: StrokeStyle) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            id: StrokeId::new(),
            points,
            style,
        })
    }

    pub fn new_ref(points: Vec<Pos2>, style: StrokeStyle) -> Option<StrokeRef> {
        Self::new(points, style).map(Arc::new)
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

/// Strokes added or removed together as one user action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeBatch {
    strokes: Vec<StrokeRef>,
}

impl StrokeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(stroke: StrokeRef) -> Self {
        Self {
            strokes: vec![stroke],
        }
    }

    pub fn push(&mut self, stroke: StrokeRef) {
        self.strokes.push(stroke);
    }

    pub fn extend(&mut self, other: StrokeBatch) {
        self.strokes.extend(other.strokes);
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    pub fn iter(&self) -> impl Iterator<Item = &StrokeRef> {
        self.strokes.iter()
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.strokes.iter().any(|s| s.id() == id)
    }
}

impl FromIterator<StrokeRef> for StrokeBatch {
    fn from_iter<I: IntoIterator<Item = StrokeRef>>(iter: I) -> Self {
        Self {
            strokes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for StrokeBatch {
    type Item = StrokeRef;
    type IntoIter = std::vec::IntoIter<StrokeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.into_iter()
    }
}
