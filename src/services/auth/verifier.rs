//! Credential verification seam used by the authentication hook.
use async_trait::async_trait;
use thiserror::Error;

use crate::services::auth::types::Identity;

/// Verifier backend errors.
///
/// Not:
/// - "token not accepted" is `Ok(None)`, not an error. Errors are reserved for
///   the backend itself failing (transport, lookup, etc.).
#[derive(Debug, Error)]
pub enum VerifyError {
    // Raised by network-backed verifiers; the bundled static one never fails.
    #[allow(dead_code)]
    #[error("verifier backend error: {0}")]
    Backend(String),
}

/// Resolves a bearer token to an identity.
///
/// Returns:
/// - `Ok(Some(identity))` if the token is accepted
/// - `Ok(None)` if the token is not accepted
/// - `Err(_)` if the backend could not answer (caller fails closed)
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    // Backend name (for logging).
    fn name(&self) -> &'static str;

    async fn verify(&self, token: &str) -> Result<Option<Identity>, VerifyError>;
}

/// Accepts exactly one token and maps it to a fixed identity.
///
/// PLACEHOLDER for local development. A real deployment injects a verifier
/// that calls an account/token service instead.
#[derive(Clone)]
pub struct StaticTokenVerifier {
    token: String,
    identity: Identity,
}

impl std::fmt::Debug for StaticTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the accepted token
        f.debug_struct("StaticTokenVerifier")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl StaticTokenVerifier {
    pub fn new(token: impl Into<String>, identity: Identity) -> Self {
        Self {
            token: token.into(),
            identity,
        }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn verify(&self, token: &str) -> Result<Option<Identity>, VerifyError> {
        if token == self.token {
            Ok(Some(self.identity.clone()))
        } else {
            Ok(None)
        }
    }
}
