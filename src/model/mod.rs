//! Wire types shared by every endpoint.

pub mod api;
pub mod health;
pub mod preferences;
