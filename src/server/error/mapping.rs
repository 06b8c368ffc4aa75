//! Vendor error code to HTTP status translation.
//!
//! Two layers are consulted per code: an optional user-supplied mapping first,
//! then the fixed default table. Codes neither layer resolves to a status are
//! left to the unhandled-error path.

use std::collections::HashMap;

use axum::http::StatusCode;
use serde::Deserialize;

use crate::server::error::{
    database::{
        KnownRequestError, CODE_MALFORMED_VALUE, CODE_RECORD_NOT_FOUND, CODE_UNIQUE_VIOLATION,
    },
    http::HttpError,
};

/// Default code table applied when no user mapping overrides a code.
pub const DEFAULT_ERROR_CODES: [(&str, StatusCode); 3] = [
    (CODE_MALFORMED_VALUE, StatusCode::BAD_REQUEST),
    (CODE_UNIQUE_VIOLATION, StatusCode::CONFLICT),
    (CODE_RECORD_NOT_FOUND, StatusCode::NOT_FOUND),
];

/// User-supplied override for a single vendor code.
///
/// Deserializes from either a bare status number or
/// `{"statusCode"?: number, "errorMessage"?: string}`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorCodeMapping {
    Status(u16),
    #[serde(rename_all = "camelCase")]
    Detailed {
        #[serde(default)]
        status_code: Option<u16>,
        #[serde(default)]
        error_message: Option<String>,
    },
}

pub type ErrorCodesStatusMapping = HashMap<String, ErrorCodeMapping>;

/// Immutable two-layer mapping from vendor codes to statuses and messages.
#[derive(Debug, Clone, Default)]
pub struct DatabaseErrorMapping {
    user_defined: ErrorCodesStatusMapping,
}

impl DatabaseErrorMapping {
    pub fn new(user_defined: ErrorCodesStatusMapping) -> Self {
        Self { user_defined }
    }

    /// Resolves the HTTP status for a known request error.
    ///
    /// # Returns
    /// - `Some(StatusCode)` - From the user mapping (bare number first, then
    ///   `statusCode`), or from the default table
    /// - `None` - Neither layer maps the code to a valid status
    pub fn status_code(&self, err: &KnownRequestError) -> Option<StatusCode> {
        self.user_defined_status_code(err)
            .or_else(|| self.default_status_code(err))
    }

    /// Resolves the client-facing message for a known request error.
    ///
    /// Uses the user mapping's `errorMessage` when present, otherwise derives
    /// the message from the raw diagnostic with [`derive_message`].
    pub fn message(&self, err: &KnownRequestError) -> String {
        self.user_defined_message(err)
            .unwrap_or_else(|| derive_message(&err.code, &err.message))
    }

    /// Converts a known request error into the HTTP error it is raised as.
    ///
    /// # Returns
    /// - `Some(HttpError)` - Structured `{statusCode, message}` payload
    /// - `None` - The code is unmapped and must fall through to generic handling
    pub fn resolve(&self, err: &KnownRequestError) -> Option<HttpError> {
        let status = self.status_code(err)?;

        Some(HttpError::new(status, self.message(err)))
    }

    fn user_defined_status_code(&self, err: &KnownRequestError) -> Option<StatusCode> {
        let status = match self.user_defined.get(&err.code)? {
            ErrorCodeMapping::Status(status) => Some(*status),
            ErrorCodeMapping::Detailed { status_code, .. } => *status_code,
        }?;

        StatusCode::from_u16(status).ok()
    }

    fn default_status_code(&self, err: &KnownRequestError) -> Option<StatusCode> {
        DEFAULT_ERROR_CODES
            .iter()
            .find(|(code, _)| *code == err.code)
            .map(|(_, status)| *status)
    }

    fn user_defined_message(&self, err: &KnownRequestError) -> Option<String> {
        match self.user_defined.get(&err.code)? {
            ErrorCodeMapping::Status(_) => None,
            ErrorCodeMapping::Detailed { error_message, .. } => error_message.clone(),
        }
    }
}

/// Derives a short message from a raw driver diagnostic.
///
/// Keeps the text after the first newline that follows the first `→` marker,
/// removes every newline, trims, and prefixes `[<code>]: `. A missing marker
/// or newline leaves the text from that point unsliced.
///
/// # Arguments
/// - `code` - Vendor error code used as prefix
/// - `raw` - Full diagnostic returned by the driver
///
/// # Returns
/// - `String` - e.g. `"[P2002]: Unique constraint failed"`
pub fn derive_message(code: &str, raw: &str) -> String {
    let short = raw.find('→').map_or(raw, |start| &raw[start..]);
    let detail = short.find('\n').map_or(short, |start| &short[start..]);

    format!("[{code}]: {}", detail.replace('\n', "").trim())
}
