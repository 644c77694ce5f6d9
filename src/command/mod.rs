mod entry;
pub mod history;

pub use entry::{EntryKind, HistoryEntry};
pub use history::{Availability, StrokeHistory};
