//! Test fixtures shared across server tests.
//!
//! Fixtures are plain data: SQL statements to build a schema and JSON payloads
//! to send to handlers. Nothing here touches a database or a router.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let state = test_state(&[fixture::schema::USERS_TABLE]).await?;
//! let response = client.post_json("/users", &fixture::payload::user()).await?;
//! ```

pub mod payload;
pub mod schema;
