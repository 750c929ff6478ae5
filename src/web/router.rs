//! Router configuration for the Filebox web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    delete_file, download_file_as_zip, list_files, openapi_json, read_file, update_file,
    upload_files, upload_multiple_files, welcome, AppState,
};
use super::middleware::create_cors_layer;
use super::openapi::OPENAPI_PATH;

/// Create the main API router.
///
/// Collection routes answer both with and without the trailing slash.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let body_limit = usize::try_from(app_state.max_upload_size).unwrap_or(usize::MAX);

    let upload_routes = Router::new()
        .route("/upload/", post(upload_files))
        .route("/upload", post(upload_files))
        .route("/upload-multiple/", post(upload_multiple_files))
        .route("/upload-multiple", post(upload_multiple_files));

    let file_routes = Router::new()
        .route("/files/", get(list_files))
        .route("/files", get(list_files))
        .route(
            "/files/:name",
            get(read_file).put(update_file).delete(delete_file),
        )
        .route("/files/:name/download-zip/", get(download_file_as_zip))
        .route("/files/:name/download-zip", get(download_file_as_zip));

    Router::new()
        .route("/", get(welcome))
        .route(OPENAPI_PATH, get(openapi_json))
        .merge(upload_routes)
        .merge(file_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileStorage;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_router() {
        let response = create_health_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path()).unwrap();
        let router = create_router(Arc::new(AppState::new(storage)), &[]);

        let response = router
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
