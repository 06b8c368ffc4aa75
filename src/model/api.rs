use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform body returned for every handled request.
///
/// `success` is derived from the status code so the two can never disagree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ResponseEnvelope<T> {
    /// Wraps a handler result for the given response status.
    ///
    /// # Arguments
    /// - `status` - Status code the response is sent with
    /// - `data` - Handler body, `None` when the handler produced no body
    ///
    /// # Returns
    /// - `ResponseEnvelope<T>` with `success` set to `status < 400`
    pub fn new(status: StatusCode, data: Option<T>) -> Self {
        Self {
            success: status.as_u16() < 400,
            status_code: status.as_u16(),
            data,
        }
    }
}

/// Error message carried by an error envelope.
///
/// Validation failures produce one message per failed field, everything else
/// a single message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    /// Joins the message into a single line for logging.
    pub fn summary(&self) -> String {
        match self {
            Self::One(message) => message.clone(),
            Self::Many(messages) => messages.join(", "),
        }
    }
}

impl From<String> for ErrorMessage {
    fn from(message: String) -> Self {
        Self::One(message)
    }
}

impl From<&str> for ErrorMessage {
    fn from(message: &str) -> Self {
        Self::One(message.to_string())
    }
}

impl From<Vec<String>> for ErrorMessage {
    fn from(messages: Vec<String>) -> Self {
        Self::Many(messages)
    }
}

/// Body returned when a request fails with a mapped error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub success: bool,
    pub status_code: u16,
    pub data: ErrorMessage,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, data: ErrorMessage) -> Self {
        Self {
            success: false,
            status_code: status.as_u16(),
            data,
        }
    }
}

/// Body returned for errors no mapping recognises.
///
/// Intentionally not an envelope: unmapped failures keep the generic
/// `{statusCode, message}` shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnhandledErrorDto {
    pub status_code: u16,
    pub message: String,
}
