//! HTTP API server and its global pipeline.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers
//! - **Database** (`database/`) - Database client lifecycle, options and query middlewares
//! - **Error Layer** (`error/`) - Application error types, code mapping and error rendering
//! - **Middleware** (`middleware/`) - Global request/response pipeline stages
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (database client, cookie key)
//! - **Startup** (`startup`) - Database connection, pipeline installation and serving
//! - **Router** (`router`) - Route registration and API documentation
//!
//! # Request Flow
//!
//! 1. **CORS** answers preflight requests and adds CORS headers
//! 2. **Validation** options are made available to body extractors
//! 3. **Controller** produces a payload or fails with `AppError`
//! 4. **Error mapper** renders failures into error envelopes
//! 5. **Success envelope** wraps everything else in `{success, statusCode, data}`

pub mod config;
pub mod controller;
pub mod database;
pub mod error;
pub mod middleware;
pub mod router;
pub mod startup;
pub mod state;

#[cfg(test)]
mod fixture;
#[cfg(test)]
mod test;
