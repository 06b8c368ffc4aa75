//! Conversion of request errors into envelope responses.
//!
//! `AppError::into_response` attaches an [`ErrorReport`] to the response it
//! produces. The error mapper stage picks the report up and renders the final
//! body with the mapping configured at startup.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    model::api::{ErrorEnvelope, UnhandledErrorDto},
    server::error::{
        database::KnownRequestError, http::HttpError, mapping::DatabaseErrorMapping,
    },
};

/// Marker placed on responses whose body is already a final envelope.
///
/// The success envelope stage leaves marked responses untouched.
#[derive(Debug, Clone, Copy)]
pub struct Enveloped;

/// Cloneable description of a request error, carried in response extensions.
#[derive(Debug, Clone)]
pub enum ErrorReport {
    /// Generic HTTP error with an explicit status.
    Http(HttpError),
    /// Database error tagged with a vendor code.
    KnownRequest(KnownRequestError),
    /// Anything else, described for server-side logs only.
    Unhandled(String),
}

/// Outcome of resolving a report against the configured mapping.
enum Resolved {
    Http(HttpError),
    Unhandled(String),
}

/// Renders [`ErrorReport`]s into error envelopes.
#[derive(Debug, Clone, Default)]
pub struct ErrorMapper {
    database: DatabaseErrorMapping,
}

impl ErrorMapper {
    pub fn new(database: DatabaseErrorMapping) -> Self {
        Self { database }
    }

    /// Resolves, logs and renders a request error.
    ///
    /// HTTP errors become an error envelope with their own status. Known
    /// database errors are first raised as HTTP errors through the code
    /// mapping; codes without a mapping are rendered as unhandled errors.
    ///
    /// # Arguments
    /// - `report` - Error attached to the failed response
    ///
    /// # Returns
    /// - `Response` - Envelope for mapped errors, generic 500 body otherwise
    pub fn render(&self, report: ErrorReport) -> Response {
        let resolved = self.resolve(report);

        match &resolved {
            Resolved::Http(err) => tracing::error!(
                "HTTP exception: {} {} - {}",
                err.status.as_u16(),
                err.kind(),
                err.envelope_data().summary()
            ),
            Resolved::Unhandled(description) => {
                tracing::error!("Unhandled exception: {}", description)
            }
        }

        respond(&resolved)
    }

    /// Renders a report without logging, used before the mapper stage runs.
    pub(crate) fn render_quiet(&self, report: ErrorReport) -> Response {
        respond(&self.resolve(report))
    }

    fn resolve(&self, report: ErrorReport) -> Resolved {
        match report {
            ErrorReport::Http(err) => Resolved::Http(err),
            ErrorReport::KnownRequest(err) => match self.database.resolve(&err) {
                Some(http) => Resolved::Http(http),
                None => Resolved::Unhandled(format!("[{}] {}", err.code, err.message.trim())),
            },
            ErrorReport::Unhandled(description) => Resolved::Unhandled(description),
        }
    }
}

fn respond(resolved: &Resolved) -> Response {
    let mut response = match resolved {
        Resolved::Http(err) => (
            err.status,
            Json(ErrorEnvelope::new(err.status, err.envelope_data())),
        )
            .into_response(),
        Resolved::Unhandled(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(UnhandledErrorDto {
                status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                message: "Internal server error".to_string(),
            }),
        )
            .into_response(),
    };

    response.extensions_mut().insert(Enveloped);
    response
}
