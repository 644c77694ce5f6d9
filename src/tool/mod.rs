mod brush;
mod mode;

pub use brush::{BrushSettings, DEFAULT_BRUSH_SIZES};
pub use mode::{
    CursorKind, EditingMode, EraserKind, PenMode, ToolAction, ToolState, Transition, UiEffect,
};
