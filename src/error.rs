//! Error types for the smooai-file-normalize library.

use thiserror::Error;

/// Errors that can occur while normalizing a file-like value.
#[derive(Error, Debug)]
pub enum FileError {
    /// The value matched none of the recognized file shapes.
    #[error("value is not a recognized file shape")]
    ShapeMismatch,

    /// The underlying byte stream failed while being drained.
    #[error(transparent)]
    Stream(#[from] std::io::Error),

    /// The drained stream exceeded the configured byte limit.
    #[error("stream exceeded the {limit} byte limit")]
    TooLarge { limit: u64 },
}

impl FileError {
    /// Returns true for the shape-mismatch validation failure.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, FileError::ShapeMismatch)
    }
}

/// Convenience type alias for Results using FileError.
pub type Result<T> = std::result::Result<T, FileError>;
