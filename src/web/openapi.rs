//! OpenAPI description of the Filebox web API.

use utoipa::OpenApi;

use crate::web::dto::{FileListResponse, MessageResponse, UploadResponse, WelcomeResponse};
use crate::web::handlers;

/// Route serving the generated document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Generated OpenAPI document.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Filebox",
        description = "Upload, list, download, zip, replace and delete files"
    ),
    paths(
        handlers::root::welcome,
        handlers::file::upload_files,
        handlers::file::upload_multiple_files,
        handlers::file::list_files,
        handlers::file::read_file,
        handlers::file::download_file_as_zip,
        handlers::file::update_file,
        handlers::file::delete_file,
    ),
    components(schemas(WelcomeResponse, UploadResponse, FileListResponse, MessageResponse)),
    tags(
        (name = "files", description = "File management"),
        (name = "meta", description = "Service information")
    )
)]
pub struct ApiDoc;
