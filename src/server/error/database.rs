use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::server::database::middleware::QueryParams;

/// Malformed value for a column.
pub const CODE_MALFORMED_VALUE: &str = "P2000";
/// Unique constraint violation.
pub const CODE_UNIQUE_VIOLATION: &str = "P2002";
/// Foreign key constraint violation.
pub const CODE_FOREIGN_KEY_VIOLATION: &str = "P2003";
/// Record required by the operation was not found.
pub const CODE_RECORD_NOT_FOUND: &str = "P2025";

/// Database error recognised by the client and tagged with a vendor code.
///
/// `message` holds the raw diagnostic. The error mapper derives the
/// client-facing message from the segment following the `→` marker.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct KnownRequestError {
    pub code: String,
    pub message: String,
}

impl KnownRequestError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Tags a SeaORM error raised while executing `params` with a vendor code.
    ///
    /// The diagnostic is laid out as
    /// `Invalid `<target>` invocation:` / `→ <target>` / detail, so the detail
    /// line is what the error mapper surfaces to clients.
    ///
    /// # Arguments
    /// - `params` - Descriptor of the query that failed
    /// - `err` - Error returned by the driver
    ///
    /// # Returns
    /// - `Ok(KnownRequestError)` - The error belongs to a known class
    /// - `Err(DbErr)` - The original error, for failures with no vendor code
    ///   (connection, pool or driver faults)
    pub fn classify(params: &QueryParams, err: DbErr) -> Result<Self, DbErr> {
        let classified = match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                Some((CODE_UNIQUE_VIOLATION, detail))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                Some((CODE_FOREIGN_KEY_VIOLATION, detail))
            }
            _ => match &err {
                DbErr::RecordNotFound(detail) => Some((CODE_RECORD_NOT_FOUND, detail.clone())),
                DbErr::RecordNotUpdated => Some((
                    CODE_RECORD_NOT_FOUND,
                    "Record to update not found.".to_string(),
                )),
                DbErr::Type(detail) => Some((CODE_MALFORMED_VALUE, detail.clone())),
                _ => None,
            },
        };

        let Some((code, detail)) = classified else {
            return Err(err);
        };

        let target = params.target();
        let message =
            format!("\nInvalid `{target}` invocation:\n\n\n→ {target}\n\n{detail}\n");

        Ok(Self::new(code, message))
    }
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Query failed with an error that carries a vendor code.
    ///
    /// Mapped to an HTTP status by the error mapper when the code is known,
    /// otherwise handled as an internal server error.
    #[error(transparent)]
    KnownRequest(#[from] KnownRequestError),

    /// Driver, pool or connection failure from SeaORM.
    ///
    /// Fatal during startup; a 500 Internal Server Error during requests.
    #[error(transparent)]
    Driver(#[from] DbErr),

    /// The client was used after its single disconnect.
    #[error("Database client has been disconnected")]
    Disconnected,

    /// A query middleware returned without invoking the rest of the chain.
    ///
    /// # Fields
    /// - Target of the query that never executed
    #[error("Query middleware chain returned without executing `{0}`")]
    Unanswered(String),
}

impl DatabaseError {
    /// Copy of the error for a second recipient.
    ///
    /// Driver errors cannot be cloned and are carried over as their message.
    pub fn replicate(&self) -> Self {
        match self {
            Self::KnownRequest(err) => Self::KnownRequest(err.clone()),
            Self::Driver(err) => Self::Driver(DbErr::Custom(err.to_string())),
            Self::Disconnected => Self::Disconnected,
            Self::Unanswered(target) => Self::Unanswered(target.clone()),
        }
    }

    /// Converts a driver error raised by `params` into a client error.
    pub fn from_query(params: &QueryParams, err: DbErr) -> Self {
        match KnownRequestError::classify(params, err) {
            Ok(known) => Self::KnownRequest(known),
            Err(err) => Self::Driver(err),
        }
    }
}
