use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::stroke::StrokeStyle;

pub const DEFAULT_BRUSH_SIZES: [f32; 5] = [3.0, 5.0, 8.0, 13.0, 20.0];

/// Ink color and the cyclic brush-size selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    pub color: Color32,
    sizes: Vec<f32>,
    index: usize,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: StrokeStyle::default().color,
            sizes: DEFAULT_BRUSH_SIZES.to_vec(),
            index: 1,
        }
    }
}

impl BrushSettings {
    pub fn new(color: Color32, sizes: Vec<f32>, index: usize) -> Self {
        let sizes = if sizes.is_empty() {
            DEFAULT_BRUSH_SIZES.to_vec()
        } else {
            sizes
        };
        let index = index.min(sizes.len() - 1);
        Self { color, sizes, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn size(&self) -> f32 {
        self.sizes
            .get(self.index)
            .copied()
            .unwrap_or(DEFAULT_BRUSH_SIZES[1])
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Move the selection by `step`, wrapping around at both ends
    pub fn cycle(&mut self, step: isize) -> f32 {
        let len = self.sizes.len() as isize;
        if len == 0 {
            return self.size();
        }
        self.index = (self.index as isize + step).rem_euclid(len) as usize;
        self.size()
    }

    pub fn style(&self) -> StrokeStyle {
        StrokeStyle::new(self.color, self.size())
    }

    /// Eraser reach around the pointer
    pub fn eraser_radius(&self) -> f32 {
        self.size() / 2.0
    }
}
