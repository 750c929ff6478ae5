//! Request DTOs for the Filebox web API.

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::web::error::ApiError;

/// Multipart field names that carry file content.
pub const FILE_FIELDS: [&str; 2] = ["files", "file"];

/// One file part of a multipart upload.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// File name sent by the client (empty if none was given).
    pub file_name: String,
    /// Full file content.
    pub content: Bytes,
}

/// Read every file part from a multipart body, in request order.
///
/// Parts under other field names are skipped. Content is fully buffered.
pub async fn read_file_parts(mut multipart: Multipart) -> Result<Vec<FileUpload>, ApiError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(ApiError::from_multipart)?
    {
        let is_file = field
            .name()
            .map(|name| FILE_FIELDS.contains(&name))
            .unwrap_or(false);
        if !is_file {
            continue;
        }

        let file_name = field.file_name().unwrap_or("").to_string();
        let content = field.bytes().await.map_err(ApiError::from_multipart)?;

        uploads.push(FileUpload { file_name, content });
    }

    Ok(uploads)
}
