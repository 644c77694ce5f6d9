mod tool_button;

pub use tool_button::{ToolButton, swatch};
