use thiserror::Error;

/// Errors that can occur while saving, loading or exporting ink
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize strokes: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to access stroke file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Nothing to save")]
    NothingToSave,

    #[error("No saved ink found")]
    NothingToLoad,

    #[error("Background task ended without a result")]
    Cancelled,
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;
