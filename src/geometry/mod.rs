pub mod curve;
pub mod hit_testing;

use serde::{Deserialize, Serialize};

pub use curve::{CurveParams, adjust_curve_parameter, generate};

/// Extent of the drawable area in surface-local coordinates.
///
/// The horizontal range is `0..=width`; the vertical range is `top..=top + height`.
/// Refreshed by the host whenever the surface is resized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawBounds {
    pub width: f32,
    pub height: f32,
    pub top: f32,
}

impl DrawBounds {
    pub fn new(width: f32, height: f32, top: f32) -> Self {
        Self { width, height, top }
    }

    pub fn from_rect(rect: egui::Rect) -> Self {
        Self::new(rect.width(), rect.height(), 0.0)
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

impl Default for DrawBounds {
    fn default() -> Self {
        Self::new(1920.0, 1080.0, 0.0)
    }
}
