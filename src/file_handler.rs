use std::path::PathBuf;

use egui::{Align2, Color32, Id, LayerId, Order};

use crate::state::persistence::INK_EXTENSION;

/// Picks ink files dropped onto the overlay
#[derive(Debug, Default)]
pub struct FileHandler;

impl FileHandler {
    pub fn new() -> Self {
        Self
    }

    /// Paths of ink files dropped this frame; other files are logged and skipped
    pub fn take_dropped_ink_files(&mut self, ctx: &egui::Context) -> Vec<PathBuf> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let mut paths = Vec::new();

        for file in dropped {
            match file.path {
                Some(path) if is_ink_file(&path) => {
                    log::info!("Ink file dropped: {}", path.display());
                    paths.push(path);
                }
                Some(path) => log::warn!("Dropped file is not an ink file: {}", path.display()),
                None => log::warn!("Dropped file has no path: {}", file.name),
            }
        }
        paths
    }

    /// Dim the overlay while files hover over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }
        let text = ctx.input(|i| {
            let mut text = "Drop to load ink:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(160));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            egui::TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

fn is_ink_file(path: &std::path::Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(INK_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_ink_file_detection() {
        assert!(is_ink_file(Path::new("Save/QuickSave_20240101-120000.fdw")));
        assert!(is_ink_file(Path::new("INK.FDW")));
        assert!(!is_ink_file(Path::new("picture.png")));
    }
}
