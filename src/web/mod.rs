//! Web API module for Filebox.
//!
//! This module exposes the storage root over HTTP: upload, list, download
//! (raw or zipped), replace and delete.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
