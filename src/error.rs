//! Error types for Filebox.

use thiserror::Error;

/// Common error type for Filebox.
#[derive(Error, Debug)]
pub enum FileboxError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored file not found.
    #[error("{0} not found")]
    NotFound(String),

    /// File name rejected before reaching the filesystem.
    ///
    /// Names must be a single plain path component inside the storage root.
    #[error("invalid file name: {0}")]
    InvalidName(String),

    /// ZIP packaging error.
    #[error("archive error: {0}")]
    Archive(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<zip::result::ZipError> for FileboxError {
    fn from(e: zip::result::ZipError) -> Self {
        FileboxError::Archive(e.to_string())
    }
}

/// Result type alias for Filebox operations.
pub type Result<T> = std::result::Result<T, FileboxError>;
