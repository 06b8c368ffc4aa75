//! HTTP request handlers.
//!
//! Handlers return their payload as-is; the success envelope and the error
//! mapper stages shape every response.

pub mod health;
pub mod preferences;
