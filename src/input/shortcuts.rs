use egui::Key;

/// Keyboard commands of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    ToggleDrawing,
    Undo,
    Redo,
    Eraser,
    Draw,
    Line,
    BrushUp,
    BrushDown,
}

/// Map a pressed key to a shortcut.
///
/// Only the lock toggle works while drawing is disabled.
pub fn shortcut_for(key: Key, drawing_enabled: bool) -> Option<Shortcut> {
    if key == Key::R {
        return Some(Shortcut::ToggleDrawing);
    }
    if !drawing_enabled {
        return None;
    }
    match key {
        Key::Z => Some(Shortcut::Undo),
        Key::Y => Some(Shortcut::Redo),
        Key::E => Some(Shortcut::Eraser),
        Key::B => Some(Shortcut::Draw),
        Key::L => Some(Shortcut::Line),
        Key::Plus | Key::Equals => Some(Shortcut::BrushUp),
        Key::Minus => Some(Shortcut::BrushDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_overlay_only_listens_to_r() {
        assert_eq!(shortcut_for(Key::R, false), Some(Shortcut::ToggleDrawing));
        assert_eq!(shortcut_for(Key::Z, false), None);
        assert_eq!(shortcut_for(Key::Z, true), Some(Shortcut::Undo));
        assert_eq!(shortcut_for(Key::Q, true), None);
    }
}
