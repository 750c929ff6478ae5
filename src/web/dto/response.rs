//! Response DTOs for the Filebox web API.

use serde::Serialize;
use utoipa::ToSchema;

/// Welcome response for `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    /// Greeting.
    pub message: String,
    /// Where the API description lives.
    pub docs: String,
}

/// Upload response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Confirmation message.
    pub message: String,
    /// Names of the saved files, in upload order.
    pub files: Vec<String>,
}

/// File listing response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileListResponse {
    /// Every entry name in the storage root.
    pub files: Vec<String>,
}

/// Plain confirmation message.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Confirmation message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
