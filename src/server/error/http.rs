use axum::http::StatusCode;
use thiserror::Error;

use crate::model::api::ErrorMessage;

/// Payload carried by an [`HttpError`].
#[derive(Debug, Clone, PartialEq)]
pub enum HttpErrorBody {
    /// Bare message raised without a structured payload.
    Message(String),
    /// Structured `{statusCode, message}` payload.
    ///
    /// Validation failures use this shape with status 400 and one message per
    /// failed field.
    Structured {
        status_code: StatusCode,
        message: ErrorMessage,
    },
}

/// HTTP-level error raised by handlers, extractors and the database error mapping.
///
/// Rendered into an error envelope by the error mapper stage.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} {}", .status.as_u16(), .body.summary())]
pub struct HttpError {
    pub status: StatusCode,
    pub body: HttpErrorBody,
}

impl HttpErrorBody {
    fn summary(&self) -> String {
        match self {
            Self::Message(message) => message.clone(),
            Self::Structured { message, .. } => message.summary(),
        }
    }
}

impl HttpError {
    /// Creates an error with a structured payload whose status matches the
    /// response status.
    ///
    /// # Arguments
    /// - `status` - Response status
    /// - `message` - Single message or list of messages
    ///
    /// # Returns
    /// - `HttpError` with a `Structured` body
    pub fn new(status: StatusCode, message: impl Into<ErrorMessage>) -> Self {
        Self {
            status,
            body: HttpErrorBody::Structured {
                status_code: status,
                message: message.into(),
            },
        }
    }

    /// Creates an error carrying a bare message instead of a structured payload.
    pub fn with_message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: HttpErrorBody::Message(message.into()),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message.into())
    }

    /// Creates a 400 validation error with one message per failed field.
    pub fn validation(messages: Vec<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorMessage::Many(messages))
    }

    /// Whether the payload is a structured 400, the shape validation failures use.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self.body,
            HttpErrorBody::Structured { status_code, .. } if status_code == StatusCode::BAD_REQUEST
        )
    }

    /// Name of the error used in log lines, derived from the status.
    ///
    /// # Returns
    /// - `"ValidationError"` for structured 400 payloads
    /// - The canonical reason phrase without spaces otherwise, e.g. `"NotFound"`
    /// - `"HttpError"` when the status has no reason phrase
    pub fn kind(&self) -> String {
        if self.is_validation_error() {
            return "ValidationError".to_string();
        }

        self.status
            .canonical_reason()
            .map(|reason| reason.split_whitespace().collect::<String>())
            .unwrap_or_else(|| "HttpError".to_string())
    }

    /// The value placed in the error envelope's `data` field.
    ///
    /// Structured payloads contribute their `message` field (a list for
    /// validation failures), bare messages are passed as-is.
    pub fn envelope_data(&self) -> ErrorMessage {
        match &self.body {
            HttpErrorBody::Message(message) => ErrorMessage::One(message.clone()),
            HttpErrorBody::Structured { message, .. } => message.clone(),
        }
    }
}
