use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{
    controller::{health, preferences},
    state::AppState,
};

/// OpenAPI document served at `/docs-json`.
///
/// Paths and schemas are collected from the routes registered in
/// [`api_router`].
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Boilerplate - API",
        description = "Boilerplate Open API Specification"
    ),
    tags(
        (name = "health", description = "Service health endpoints"),
        (name = "preferences", description = "Display preferences kept in signed cookies")
    )
)]
pub struct ApiDoc;

/// Routes served behind the global pipeline.
pub fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health::get_health))
        .routes(routes!(
            preferences::get_preferences,
            preferences::put_preferences,
            preferences::delete_preferences
        ))
}
