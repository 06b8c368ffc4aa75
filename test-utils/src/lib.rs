//! API Boilerplate Test Utils
//!
//! Provides shared testing utilities for the API server's unit and integration tests.
//!
//! # Overview
//!
//! - **TestClient**: Drives an axum `Router` in-process, one request at a time
//! - **LogCapture**: Scoped tracing subscriber recording log lines in memory
//! - **fixture**: SQL schemas and request payloads shared across tests
//! - **TestError**: Error types that can occur while driving a test
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{client::TestClient, log::LogCapture};
//!
//! #[tokio::test]
//! async fn test_health() -> Result<(), TestError> {
//!     let (logs, _guard) = LogCapture::install();
//!     let client = TestClient::new(app);
//!
//!     let response = client.get("/api/health").await?;
//!     assert_eq!(response.status, StatusCode::OK);
//!     assert!(logs.contains("HTTP (GET) - status: 200"));
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod fixture;
pub mod log;
