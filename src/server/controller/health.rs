use axum::{extract::State, Json};

use crate::{
    model::{
        api::{ErrorEnvelope, ResponseEnvelope, UnhandledErrorDto},
        health::HealthDto,
    },
    server::{database::middleware::QueryParams, error::AppError, state::AppState},
};

/// Tag for grouping health endpoints in OpenAPI documentation
pub static HEALTH_TAG: &str = "health";

/// Reports service health.
///
/// Pings the database through the client so the query middlewares see the
/// round trip, then returns the crate version.
///
/// # Arguments
/// - `state` - Application state containing the database client
///
/// # Returns
/// - `200 OK` - Database answered the ping
/// - `500 Internal Server Error` - Database unreachable or client disconnected
#[utoipa::path(
    get,
    path = "/api/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is healthy", body = ResponseEnvelope<HealthDto>),
        (status = 404, description = "Route not found", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = UnhandledErrorDto)
    ),
)]
pub async fn get_health(State(state): State<AppState>) -> Result<Json<HealthDto>, AppError> {
    state
        .db
        .query(QueryParams::raw("ping"), |db| async move { db.ping().await })
        .await?;

    Ok(Json(HealthDto {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
