//! File handlers for the Filebox web API.

use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::header,
    response::Response,
    Json,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::SystemTime;

use crate::file::{archive_name, pack, validate_name, ZIP_MEDIA_TYPE};
use crate::web::dto::{
    read_file_parts, FileListResponse, FileUpload, MessageResponse, UploadResponse,
};
use crate::web::error::{ApiError, FILE_NOT_FOUND};
use crate::web::handlers::AppState;

/// Generate a safe Content-Disposition header value for attachments.
///
/// Control characters are dropped and quotes/backslashes replaced in the
/// plain `filename`; non-ASCII names also get an RFC 5987 `filename*`.
pub fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && sanitized == filename {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let encoded = urlencoding::encode(filename);
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized, encoded
    )
}

/// Format a timestamp as an HTTP date (`Sun, 06 Nov 1994 08:49:37 GMT`).
fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// Validate every upload name, then save the files in request order.
///
/// Nothing is written if any name is invalid. Writes stop at the first
/// failure; files saved before it are kept.
async fn save_uploads(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
    message: &str,
    context: &str,
) -> Result<Json<UploadResponse>, ApiError> {
    let multipart = multipart.map_err(ApiError::from_multipart_rejection)?;
    let uploads = read_file_parts(multipart).await?;
    if uploads.is_empty() {
        return Err(ApiError::unprocessable("No files provided"));
    }

    for upload in &uploads {
        validate_name(&upload.file_name).map_err(|e| ApiError::from_storage(e, context))?;
    }

    let mut saved = Vec::with_capacity(uploads.len());
    for FileUpload { file_name, content } in uploads {
        state
            .storage
            .save(&file_name, &content)
            .map_err(|e| ApiError::from_storage(e, context))?;

        tracing::info!(name = %file_name, size = content.len(), "File uploaded");
        saved.push(file_name);
    }

    Ok(Json(UploadResponse {
        message: message.to_string(),
        files: saved,
    }))
}

/// POST /upload/ - Upload one or more files.
///
/// Request body: multipart/form-data with one or more "files" parts.
#[utoipa::path(
    post,
    path = "/upload/",
    tag = "files",
    responses(
        (status = 200, description = "Files uploaded", body = UploadResponse),
        (status = 400, description = "Invalid file name or multipart data"),
        (status = 413, description = "Upload too large"),
        (status = 422, description = "No files provided"),
        (status = 500, description = "Write error")
    )
)]
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    save_uploads(
        &state,
        multipart,
        "Files uploaded successfully.",
        "Error uploading files",
    )
    .await
}

/// POST /upload-multiple/ - Upload several files at once.
#[utoipa::path(
    post,
    path = "/upload-multiple/",
    tag = "files",
    responses(
        (status = 200, description = "Files uploaded", body = UploadResponse),
        (status = 400, description = "Invalid file name or multipart data"),
        (status = 413, description = "Upload too large"),
        (status = 422, description = "No files provided"),
        (status = 500, description = "Write error")
    )
)]
pub async fn upload_multiple_files(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    save_uploads(
        &state,
        multipart,
        "Multiple files uploaded successfully.",
        "Error uploading multiple files",
    )
    .await
}

/// GET /files/ - List all stored files.
#[utoipa::path(
    get,
    path = "/files/",
    tag = "files",
    responses(
        (status = 200, description = "Stored file names", body = FileListResponse),
        (status = 500, description = "Enumeration error")
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FileListResponse>, ApiError> {
    let files = state
        .storage
        .list()
        .map_err(|e| ApiError::from_storage(e, "Error listing files"))?;

    Ok(Json(FileListResponse { files }))
}

/// GET /files/:name - Download a file.
#[utoipa::path(
    get,
    path = "/files/{name}",
    tag = "files",
    params(
        ("name" = String, Path, description = "File name")
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid file name"),
        (status = 404, description = "File not found"),
        (status = 500, description = "Read error")
    )
)]
pub async fn read_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response<Body>, ApiError> {
    const CONTEXT: &str = "Error reading file";

    let content = state
        .storage
        .load(&name)
        .map_err(|e| ApiError::from_storage(e, CONTEXT))?;
    let modified = state.storage.stat(&name).ok().and_then(|info| info.modified);

    let content_type = mime_guess::from_path(&name)
        .first_or_octet_stream()
        .to_string();

    let mut builder = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, content.len());
    if let Some(modified) = modified {
        builder = builder.header(header::LAST_MODIFIED, http_date(modified));
    }

    builder.body(Body::from(content)).map_err(|e| {
        tracing::error!("Failed to build response: {}", e);
        ApiError::internal(format!("{CONTEXT}: {e}"))
    })
}

/// GET /files/:name/download-zip/ - Download a file packed in a ZIP archive.
#[utoipa::path(
    get,
    path = "/files/{name}/download-zip/",
    tag = "files",
    params(
        ("name" = String, Path, description = "File name")
    ),
    responses(
        (status = 200, description = "ZIP archive holding the file", content_type = "application/zip"),
        (status = 400, description = "Invalid file name"),
        (status = 404, description = "File not found"),
        (status = 500, description = "Packaging error")
    )
)]
pub async fn download_file_as_zip(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response<Body>, ApiError> {
    const CONTEXT: &str = "Error downloading file as ZIP";

    let content = state
        .storage
        .load(&name)
        .map_err(|e| ApiError::from_storage(e, CONTEXT))?;
    let archive = pack(&name, &content).map_err(|e| ApiError::from_storage(e, CONTEXT))?;

    tracing::debug!(name = %name, size = archive.len(), "Packed file as ZIP");

    Response::builder()
        .header(header::CONTENT_TYPE, ZIP_MEDIA_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&archive_name(&name)),
        )
        .header(header::CONTENT_LENGTH, archive.len())
        .body(Body::from(archive))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal(format!("{CONTEXT}: {e}"))
        })
}

/// PUT /files/:name - Replace the content of an existing file.
///
/// Request body: multipart/form-data with a single "file" part. The part's
/// own file name is ignored.
#[utoipa::path(
    put,
    path = "/files/{name}",
    tag = "files",
    params(
        ("name" = String, Path, description = "File name")
    ),
    responses(
        (status = 200, description = "File updated", body = MessageResponse),
        (status = 400, description = "Invalid file name or multipart data"),
        (status = 404, description = "File not found"),
        (status = 413, description = "Upload too large"),
        (status = 422, description = "No file provided"),
        (status = 500, description = "Write error")
    )
)]
pub async fn update_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    const CONTEXT: &str = "Error updating file";

    // Name and existence are checked before the body is looked at.
    validate_name(&name).map_err(|e| ApiError::from_storage(e, CONTEXT))?;
    if !state.storage.exists(&name) {
        return Err(ApiError::not_found(FILE_NOT_FOUND));
    }

    let multipart = multipart.map_err(ApiError::from_multipart_rejection)?;
    let upload = read_file_parts(multipart)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::unprocessable("No file provided"))?;

    state
        .storage
        .replace(&name, &upload.content)
        .map_err(|e| ApiError::from_storage(e, CONTEXT))?;

    tracing::info!(name = %name, size = upload.content.len(), "File updated");

    Ok(Json(MessageResponse::new(format!(
        "File '{name}' updated successfully."
    ))))
}

/// DELETE /files/:name - Delete a file.
#[utoipa::path(
    delete,
    path = "/files/{name}",
    tag = "files",
    params(
        ("name" = String, Path, description = "File name")
    ),
    responses(
        (status = 200, description = "File deleted", body = MessageResponse),
        (status = 400, description = "Invalid file name"),
        (status = 404, description = "File not found"),
        (status = 500, description = "Delete error")
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .storage
        .delete(&name)
        .map_err(|e| ApiError::from_storage(e, "Error deleting file"))?;

    tracing::info!(name = %name, "File deleted");

    Ok(Json(MessageResponse::new(format!(
        "File '{name}' deleted successfully."
    ))))
}
