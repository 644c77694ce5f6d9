use std::path::PathBuf;
use std::time::Duration;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::tool::{BrushSettings, DEFAULT_BRUSH_SIZES};

/// Overlay settings, handed to the editor context at construction and
/// persisted by the host between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct OverlayConfig {
    /// Parabola factor `k`; larger values give flatter curves
    pub parabola_factor: f64,
    pub brush_sizes: Vec<f32>,
    pub brush_index: usize,
    pub color: Color32,
    /// Colors offered on the palette
    pub swatches: Vec<Color32>,
    /// Where quick saves and auto saves go
    pub save_dir: PathBuf,
    /// How long a notice replaces the status label
    pub notice_duration: Duration,
    /// Raw scroll delta per unit of parabola adjustment
    pub wheel_step: f32,
    /// Fill behind exported images; transparent when unset
    pub export_background: Option<Color32>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            parabola_factor: 50.0,
            brush_sizes: DEFAULT_BRUSH_SIZES.to_vec(),
            brush_index: 1,
            color: Color32::from_rgb(0xe5, 0x39, 0x35),
            swatches: vec![
                Color32::from_rgb(0xe5, 0x39, 0x35),
                Color32::from_rgb(0xfd, 0xd8, 0x35),
                Color32::from_rgb(0x43, 0xa0, 0x47),
                Color32::from_rgb(0x1e, 0x88, 0xe5),
                Color32::from_rgb(0x8e, 0x24, 0xaa),
                Color32::WHITE,
                Color32::BLACK,
            ],
            save_dir: PathBuf::from("Save"),
            notice_duration: Duration::from_secs(2),
            wheel_step: 12.5,
            export_background: None,
        }
    }
}

impl OverlayConfig {
    /// A usable parabola factor; falls back to the default for non-positive values
    pub fn parabola_factor(&self) -> f64 {
        if self.parabola_factor.is_finite() && self.parabola_factor > 0.0 {
            self.parabola_factor
        } else {
            Self::default().parabola_factor
        }
    }

    pub fn brush(&self) -> BrushSettings {
        BrushSettings::new(self.color, self.brush_sizes.clone(), self.brush_index)
    }
}
