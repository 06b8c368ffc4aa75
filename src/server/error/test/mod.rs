use axum::{body::to_bytes, http::StatusCode, response::Response};
use serde_json::{json, Value};

use crate::{
    model::api::ErrorMessage,
    server::error::{
        database::KnownRequestError,
        http::HttpError,
        mapper::{Enveloped, ErrorMapper, ErrorReport},
        mapping::{derive_message, DatabaseErrorMapping, ErrorCodeMapping, ErrorCodesStatusMapping},
        AppError,
    },
};

mod mapping;

/// Raw diagnostic laid out the way the database client formats known request errors.
fn raw_diagnostic(detail: &str) -> String {
    format!("\nInvalid `users.create()` invocation:\n\n\n→ users.create()\n\n{detail}\n")
}

fn user_mapping(entries: &[(&str, ErrorCodeMapping)]) -> DatabaseErrorMapping {
    let user_defined: ErrorCodesStatusMapping = entries
        .iter()
        .map(|(code, mapping)| (code.to_string(), mapping.clone()))
        .collect();

    DatabaseErrorMapping::new(user_defined)
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
