use thiserror::Error;

/// Errors raised while driving a test request.
#[derive(Error, Debug)]
pub enum TestError {
    /// The request could not be built (invalid URI or header).
    #[error(transparent)]
    Http(#[from] axum::http::Error),

    /// The response body could not be read.
    #[error(transparent)]
    Body(#[from] axum::Error),

    /// The response body is not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
