//! Filebox - filesystem-backed file management over HTTP.
//!
//! Files live in a single flat storage root and are exposed through a small
//! axum API: upload, list, download (raw or as a ZIP), replace and delete.

pub mod config;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use config::Config;
pub use error::{FileboxError, Result};
pub use file::{FileStorage, StoredFile};
pub use web::WebServer;
