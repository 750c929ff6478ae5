//! Welcome and API description handlers.

use axum::Json;
use utoipa::OpenApi;

use crate::web::dto::WelcomeResponse;
use crate::web::openapi::{ApiDoc, OPENAPI_PATH};

/// GET / - Welcome message.
#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses(
        (status = 200, description = "Welcome message", body = WelcomeResponse)
    )
)]
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Filebox file management API".to_string(),
        docs: format!("See {OPENAPI_PATH} for the OpenAPI description"),
    })
}

/// GET /api-docs/openapi.json - OpenAPI description of this service.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
