//! Global request/response pipeline stages.
//!
//! Each stage is applied to every API route by the bootstrap, in a fixed order:
//!
//! - **CORS** - configured in `startup`
//! - **Validation** (`validation`) - payload whitelisting and field rules
//! - **Success envelope** (`envelope`) - wraps handler results
//! - **Error mapper** (`exception`) - renders request errors into error envelopes
//! - **Cookies** (`cookie`) - cookie parsing and signed cookie access

pub mod cookie;
pub mod envelope;
pub mod exception;
pub mod validation;

#[cfg(test)]
mod test;
