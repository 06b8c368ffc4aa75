//! API server skeleton: a fixed request pipeline around a shared database client.
//!
//! - **Model** (`model`) - Wire types shared by every endpoint
//! - **Server** (`server`) - Pipeline stages, database client, controllers and bootstrap

pub mod model;
pub mod server;
