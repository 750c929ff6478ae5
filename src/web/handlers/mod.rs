//! API handlers for the Filebox web layer.

pub mod file;
pub mod root;

pub use file::*;
pub use root::*;

use crate::file::{FileStorage, DEFAULT_MAX_UPLOAD_SIZE};

/// Application state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Storage root holding every uploaded file.
    pub storage: FileStorage,
    /// Maximum request body size for uploads in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create a new application state over the given storage.
    pub fn new(storage: FileStorage) -> Self {
        Self {
            storage,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }

    /// Set the maximum upload size in bytes.
    pub fn with_max_upload_size(mut self, bytes: u64) -> Self {
        self.max_upload_size = bytes;
        self
    }
}
