use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::error::TestError;

/// In-process client for an axum application.
///
/// Each request is sent to a clone of the router through `oneshot`, so no
/// socket is bound and requests never interfere with each other.
///
/// # Example
///
/// ```rust,ignore
/// let client = TestClient::new(app);
/// let response = client.post_json("/api/users", &json!({"email": "a@b.c"})).await?;
///
/// assert_eq!(response.status, StatusCode::CREATED);
/// ```
pub struct TestClient {
    app: Router,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    /// Sends a `GET` request without a body.
    pub async fn get(&self, uri: &str) -> Result<TestResponse, TestError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())?;

        self.send(request).await
    }

    /// Sends a `POST` request with a JSON body.
    ///
    /// # Arguments
    /// - `uri` - Request path
    /// - `body` - Payload serialized as the request body
    ///
    /// # Returns
    /// - `Ok(TestResponse)` - Buffered response
    /// - `Err(TestError)` - The request could not be built or the body read
    pub async fn post_json(&self, uri: &str, body: &Value) -> Result<TestResponse, TestError> {
        self.post_raw(uri, "application/json", body.to_string())
            .await
    }

    /// Sends a `POST` request with an arbitrary body and content type.
    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: &str,
        body: impl Into<String>,
    ) -> Result<TestResponse, TestError> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.into()))?;

        self.send(request).await
    }

    /// Sends a prepared request and buffers the response.
    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse, TestError> {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|infallible| match infallible {});

        let (parts, body) = response.into_parts();
        let body = axum::body::to_bytes(body, usize::MAX).await?;

        Ok(TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}

/// Fully buffered response returned by [`TestClient`].
#[derive(Debug, Clone)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Parses the body as JSON.
    pub fn json(&self) -> Result<Value, TestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body decoded as UTF-8, lossy.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Value of a response header, `None` when absent or not valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// All `Set-Cookie` values, in order.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect()
    }
}
