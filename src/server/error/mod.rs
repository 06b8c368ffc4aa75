//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into envelope responses. The `AppError` enum serves as the
//! top-level error type returned by handlers, extractors and startup code. It
//! implements `IntoResponse` by attaching an [`mapper::ErrorReport`] that the error
//! mapper stage renders with the code mapping configured at startup.

pub mod config;
pub mod database;
pub mod http;
pub mod mapper;
pub mod mapping;

#[cfg(test)]
mod test;

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::{
    config::ConfigError,
    database::DatabaseError,
    http::HttpError,
    mapper::{ErrorMapper, ErrorReport},
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Most variants use `#[from]` for automatic
/// error conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Fatal at startup. Results in 500 Internal Server Error if it ever
    /// surfaces during a request.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database client error.
    ///
    /// Known request errors are mapped to a status by the error code mapping,
    /// everything else results in 500 Internal Server Error.
    #[error(transparent)]
    DatabaseErr(#[from] DatabaseError),

    /// HTTP error with an explicit status, rendered into an error envelope.
    #[error(transparent)]
    HttpErr(#[from] HttpError),

    /// I/O error while binding or serving the listening socket.
    ///
    /// Fatal at startup.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    ///
    /// # Fields
    /// - Message describing what was invalid about the request
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from sea_orm::DbErr to AppError.
///
/// Driver errors raised outside the database client carry no query
/// descriptor, so they are wrapped as plain driver failures.
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::DatabaseErr(DatabaseError::Driver(err))
    }
}

impl From<AppError> for ErrorReport {
    fn from(err: AppError) -> Self {
        match err {
            AppError::HttpErr(err) => Self::Http(err),
            AppError::NotFound(msg) => Self::Http(HttpError::not_found(msg)),
            AppError::BadRequest(msg) => Self::Http(HttpError::bad_request(msg)),
            AppError::DatabaseErr(DatabaseError::KnownRequest(err)) => Self::KnownRequest(err),
            err => Self::Unhandled(err.to_string()),
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// The response is rendered with the default code mapping and carries the
/// original [`ErrorReport`] in its extensions. The error mapper stage replaces
/// it with a rendering that uses the configured mapping and logs the error.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest` and validation failures
/// - 404 Not Found - For `NotFound`
/// - Mapped status - For `HttpErr` and known database errors
/// - 500 Internal Server Error - For all other error types
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let report = ErrorReport::from(self);
        let mut response = ErrorMapper::default().render_quiet(report.clone());

        response.extensions_mut().insert(report);
        response
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns the generic unhandled-error body
/// to the client to avoid leaking implementation details. Used by middleware stages
/// for failures that happen outside a handler.
pub struct InternalServerError<E>(pub E);

/// Converts wrapped errors into 500 Internal Server Error responses.
///
/// Logs the full error message for debugging, but returns a generic error message to the
/// client to avoid exposing internal implementation details or sensitive information.
///
/// # Arguments
/// - `E` - Any type that implements `Display` (typically an error type)
///
/// # Returns
/// A 500 Internal Server Error response with a generic error message JSON body
impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        ErrorMapper::default().render_quiet(ErrorReport::Unhandled(self.0.to_string()))
    }
}
