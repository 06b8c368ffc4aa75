use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{
    model::api::ResponseEnvelope,
    server::error::{mapper::Enveloped, InternalServerError},
};

const APPLICATION_JSON: &str = "application/json";

/// What the envelope stage does with a response body.
#[derive(Debug, PartialEq)]
pub enum EnvelopeBody {
    /// Embed the value as `data`, or omit `data` when `None`.
    Wrap(Option<Value>),
    /// Leave the body untouched (binary, HTML, malformed JSON).
    Passthrough,
}

/// Wraps successful handler responses in a [`ResponseEnvelope`].
///
/// Logs one line per request with method, status and URL, plus a warning for
/// 4xx statuses. Responses already rendered by the error mapper, and `204`/`304`
/// responses, are returned unchanged.
///
/// The request line and the 4xx warning cover the success path only. A failed
/// request is logged once, by the error mapper's exception line.
pub async fn wrap_success(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    if response.extensions().get::<Enveloped>().is_some() {
        return response;
    }

    let status = response.status();
    tracing::info!("HTTP ({}) - status: {} | URL: {}", method, status.as_u16(), uri);
    if status.is_client_error() {
        tracing::warn!("4xx response: {} - {} {}", status.as_u16(), method, uri);
    }

    // Bodiless by definition.
    if matches!(status, StatusCode::NO_CONTENT | StatusCode::NOT_MODIFIED) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => return InternalServerError(e).into_response(),
    };

    let data = match classify_body(&parts.headers, &bytes) {
        EnvelopeBody::Wrap(data) => data,
        EnvelopeBody::Passthrough => return Response::from_parts(parts, Body::from(bytes)),
    };

    let body = match serde_json::to_vec(&envelope(status, data)) {
        Ok(body) => body,
        Err(e) => return InternalServerError(e).into_response(),
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts
        .headers
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    parts.extensions.insert(Enveloped);

    Response::from_parts(parts, Body::from(body))
}

/// Builds the envelope for a handler body and response status.
pub fn envelope(status: StatusCode, data: Option<Value>) -> ResponseEnvelope<Value> {
    ResponseEnvelope::new(status, data)
}

/// Decides how a response body is embedded into the envelope.
///
/// # Returns
/// - `Wrap(None)` - Empty body
/// - `Wrap(Some(value))` - JSON body, or `text/plain` body as a JSON string
/// - `Passthrough` - Any other content type, or JSON that fails to parse
pub fn classify_body(headers: &HeaderMap, bytes: &Bytes) -> EnvelopeBody {
    if bytes.is_empty() {
        return EnvelopeBody::Wrap(None);
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with(APPLICATION_JSON) {
        return match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => EnvelopeBody::Wrap(Some(value)),
            Err(_) => EnvelopeBody::Passthrough,
        };
    }

    if content_type.starts_with("text/plain") {
        return match std::str::from_utf8(bytes) {
            Ok(text) => EnvelopeBody::Wrap(Some(Value::String(text.to_string()))),
            Err(_) => EnvelopeBody::Passthrough,
        };
    }

    EnvelopeBody::Passthrough
}
