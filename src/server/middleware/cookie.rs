//! Signed cookie access on top of the cookie parsing stage.

use axum::{extract::FromRequestParts, http::request::Parts};
use sha2::{Digest, Sha512};
use tower_cookies::{Cookie, Cookies, Key};

use crate::server::{
    error::{http::HttpError, AppError},
    state::AppState,
};

/// Derives the cookie signing key from the configured secret.
///
/// The secret is stretched with SHA-512 to the 64 bytes the key requires.
/// Without a secret a random key is generated, so signed cookies do not
/// survive a restart.
///
/// # Arguments
/// - `secret` - Value of `COOKIE_SECRET`, if set
///
/// # Returns
/// - `Key` used to sign and verify cookies
pub fn cookie_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) => Key::from(Sha512::digest(secret.as_bytes()).as_slice()),
        None => {
            tracing::warn!("COOKIE_SECRET is not set, using a random cookie signing key");
            Key::generate()
        }
    }
}

/// Signed cookie jar for the current request.
///
/// Requires the cookie parsing stage; cookies whose signature does not verify
/// are treated as absent.
pub struct SignedCookies {
    cookies: Cookies,
    key: Key,
}

impl SignedCookies {
    /// Value of a signed cookie, `None` when missing or tampered with.
    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .signed(&self.key)
            .get(name)
            .map(|cookie| cookie.value().to_string())
    }

    /// Sets a signed cookie on the response.
    pub fn set(&self, name: &str, value: &str) {
        self.cookies
            .signed(&self.key)
            .add(Cookie::new(name.to_string(), value.to_string()));
    }

    pub fn remove(&self, name: &str) {
        self.cookies
            .signed(&self.key)
            .remove(Cookie::from(name.to_string()));
    }
}

impl FromRequestParts<AppState> for SignedCookies {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|(status, message)| HttpError::with_message(status, message))?;

        Ok(Self {
            cookies,
            key: state.cookie_key.clone(),
        })
    }
}
