//! File management module for Filebox.
//!
//! This module provides:
//! - A flat storage root holding every uploaded file
//! - Single-file ZIP packaging for downloads

pub mod archive;
mod storage;

pub use archive::{archive_name, pack, ZIP_MEDIA_TYPE};
pub use storage::{validate_name, FileStorage, StoredFile};

/// Default maximum request body size for uploads (64MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 64 * 1024 * 1024;
