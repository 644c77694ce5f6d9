pub mod context;
pub mod export;
mod jobs;
pub mod persistence;

pub use context::EditorContext;
pub use jobs::IoJobs;
pub use persistence::{PendingTask, StrokeStore};
