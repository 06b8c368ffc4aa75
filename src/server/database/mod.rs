//! Database client lifecycle.
//!
//! A single [`client::DatabaseClient`] is constructed at startup from options
//! resolved through a [`options::DatabaseOptionsProvider`], optionally connected
//! eagerly, shared with every request handler, and disconnected once at
//! shutdown. Every query runs through the [`middleware`] chain.

pub mod client;
pub mod middleware;
pub mod options;

#[cfg(test)]
mod test;
