//! Input validation for JSON request bodies.
//!
//! The bootstrap registers [`ValidationOptions`] as a request extension; the
//! [`ValidatedJson`] extractor reads them to decide how unknown properties are
//! treated before deserializing and validating the payload.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use utoipa::{
    openapi::{schema::Schema, RefOr},
    PartialSchema,
};
use validator::{Validate, ValidationErrors};

use crate::server::error::{http::HttpError, AppError};

/// Policy applied to incoming payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Strip properties the DTO does not declare.
    pub whitelist: bool,
    /// Reject payloads with undeclared properties instead of stripping them.
    pub forbid_non_whitelisted: bool,
}

impl ValidationOptions {
    /// Whitelists payloads and rejects unknown properties.
    pub fn strict() -> Self {
        Self {
            whitelist: true,
            forbid_non_whitelisted: true,
        }
    }

    /// Applies the whitelist policy to a JSON object.
    ///
    /// # Arguments
    /// - `payload` - Raw request body
    /// - `allowed` - Properties declared by the target DTO, `None` when unknown
    ///
    /// # Returns
    /// - `Ok(Value)` - Payload with undeclared properties removed when whitelisting
    /// - `Err(HttpError)` - 400 validation error listing every undeclared
    ///   property, when `forbid_non_whitelisted` is set
    pub fn apply(&self, payload: Value, allowed: Option<&[String]>) -> Result<Value, HttpError> {
        let (Value::Object(object), Some(allowed)) = (&payload, allowed) else {
            return Ok(payload);
        };
        if !self.whitelist && !self.forbid_non_whitelisted {
            return Ok(payload);
        }

        let unknown: Vec<&String> = object
            .keys()
            .filter(|key| !allowed.contains(key))
            .collect();
        if unknown.is_empty() {
            return Ok(payload);
        }

        if self.forbid_non_whitelisted {
            return Err(HttpError::validation(
                unknown
                    .into_iter()
                    .map(|key| format!("property {key} should not exist"))
                    .collect(),
            ));
        }

        let stripped: Map<String, Value> = object
            .iter()
            .filter(|(key, _)| allowed.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Value::Object(stripped))
    }
}

/// JSON body extractor that whitelists, deserializes and validates the payload.
///
/// Declared properties come from the DTO's OpenAPI schema, field rules from
/// its `validator` derive.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + PartialSchema + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let options = req
            .extensions()
            .get::<ValidationOptions>()
            .copied()
            .unwrap_or_default();

        let Json(payload) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::new(rejection.status(), rejection.body_text()))?;

        let allowed = declared_properties::<T>();
        let payload = options.apply(payload, allowed.as_deref())?;

        let dto: T = serde_json::from_value(payload)
            .map_err(|e| HttpError::validation(vec![e.to_string()]))?;

        dto.validate()
            .map_err(|errors| HttpError::validation(validation_messages(&errors)))?;

        Ok(Self(dto))
    }
}

/// Property names declared by a DTO's schema.
///
/// # Returns
/// - `Some(names)` - The schema is an inline object
/// - `None` - The schema is a reference or a composite; whitelisting is skipped
pub fn declared_properties<T: PartialSchema>() -> Option<Vec<String>> {
    match T::schema() {
        RefOr::T(Schema::Object(object)) => Some(object.properties.keys().cloned().collect()),
        _ => None,
    }
}

/// Flattens validator errors into one message per failed rule, ordered by field.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{field} failed {} validation", error.code))
            })
        })
        .collect()
}
