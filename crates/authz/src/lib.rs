//! Authorization hooks and guards.
//!
//! Handlers never compare credentials themselves. They take a [`TokenGuard`]
//! argument, which pulls the `token` query parameter and asks the
//! [`TokenVerifier`] found in router state.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use subtle::ConstantTimeEq;

use libris_http::error::AppError;

/// Capability that decides whether a presented token grants access.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> bool;
}

/// Shared handle stored in router state.
pub type SharedVerifier = Arc<dyn TokenVerifier>;

/// Accepts exactly one configured shared secret.
#[derive(Clone)]
pub struct StaticTokenVerifier {
    secret: String,
}

impl StaticTokenVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn shared(secret: impl Into<String>) -> SharedVerifier {
        Arc::new(Self::new(secret))
    }
}

impl std::fmt::Debug for StaticTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenVerifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl TokenVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str) -> bool {
        let expected = self.secret.as_bytes();
        if expected.is_empty() {
            return false;
        }
        bool::from(expected.ct_eq(token.as_bytes()))
    }
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Extractor that only succeeds for requests carrying an accepted `?token=`.
#[derive(Debug)]
pub struct TokenGuard;

impl<S> FromRequestParts<S> for TokenGuard
where
    SharedVerifier: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let verifier = SharedVerifier::from_ref(state);

        let token = Query::<TokenQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.token);

        match token {
            Some(token) if verifier.verify(&token) => Ok(TokenGuard),
            Some(_) => {
                tracing::debug!(path = %parts.uri.path(), "token rejected");
                Err(AppError::unauthorized("Unauthorized"))
            }
            None => {
                tracing::debug!(path = %parts.uri.path(), "token missing");
                Err(AppError::unauthorized("Unauthorized"))
            }
        }
    }
}
