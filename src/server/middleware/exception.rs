use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{Method, Uri},
    middleware::Next,
    response::Response,
};

use crate::server::error::{
    mapper::{ErrorMapper, ErrorReport},
    AppError,
};

/// Renders failed responses with the configured error mapper.
///
/// Handlers and extractors fail with [`AppError`], whose response carries an
/// [`ErrorReport`]. This stage takes the report out and replaces the response
/// with the mapper's rendering.
pub async fn map_errors(
    State(mapper): State<Arc<ErrorMapper>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ErrorReport>() {
        Some(report) => mapper.render(report),
        None => response,
    }
}

/// Fallback for requests that match no route.
///
/// # Returns
/// - `AppError::NotFound` with the message `Cannot <METHOD> <path>`
pub async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("Cannot {} {}", method, uri.path()))
}
