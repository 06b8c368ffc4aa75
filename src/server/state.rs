//! State handed to every handler and extractor.
//!
//! Built by the bootstrap once the database client is ready. Handlers reach the
//! client through it, and the signed cookie extractor reads the signing key.

use std::sync::Arc;

use tower_cookies::Key;

use crate::server::database::client::DatabaseClient;

/// Database client and cookie key shared by all requests.
///
/// Cloning is cheap: the database client is shared behind an `Arc` and never
/// copied, and `Key` is a small fixed-size value.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide database client.
    ///
    /// Disconnected by the bootstrap after the server stops accepting requests.
    pub db: Arc<DatabaseClient>,

    /// Key used to sign and verify cookies.
    pub cookie_key: Key,
}

impl AppState {
    /// Bundles the ready client with the cookie signing key.
    ///
    /// # Arguments
    /// - `db` - Shared database client
    /// - `cookie_key` - Cookie signing key
    ///
    /// # Returns
    /// - `AppState` - State to install on the router
    pub fn new(db: Arc<DatabaseClient>, cookie_key: Key) -> Self {
        Self { db, cookie_key }
    }
}
