#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod stroke;
pub mod tool;

pub use app::OverlayApp;
pub use command::{HistoryEntry, StrokeHistory};
pub use config::OverlayConfig;
pub use document::{Document, StrokeCanvas, StrokesChanged};
pub use error::{PersistenceError, PersistenceResult};
pub use event::{EventBus, EventHandler, NotificationGate, OverlayEvent};
pub use input::{InputEvent, InteractionSession};
pub use state::EditorContext;
pub use stroke::{Stroke, StrokeBatch, StrokeId, StrokeRef, StrokeStyle};
pub use tool::{PenMode, ToolAction, ToolState};
