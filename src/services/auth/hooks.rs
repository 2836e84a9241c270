//! Gateway authentication / authorization hooks.
//!
//! Both are stateless decision functions:
//! - `authenticate`: `Authorization` header -> optional identity (or reject)
//! - `authorize`: resolved identity + action requirement -> allow (or reject)
//!
//! Wiring into the request pipeline lives in `middleware::auth`.

use crate::services::auth::types::{AuthRequirement, Identity, UnauthorizedError};
use crate::services::auth::verifier::TokenVerifier;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from a `Bearer <token>` header value.
///
/// The scheme match is exact and case-sensitive; anything else yields `None`.
pub fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix(BEARER_PREFIX)
}

/// Resolve the caller from the `Authorization` header value.
///
/// - no header / non-Bearer scheme: `Ok(None)` (anonymous, not an error)
/// - Bearer token accepted: `Ok(Some(identity))`
/// - Bearer token rejected, or verifier backend failure: `Err(invalid_token)`
pub async fn authenticate(
    verifier: &dyn TokenVerifier,
    header: Option<&str>,
) -> Result<Option<Identity>, UnauthorizedError> {
    let Some(token) = header.and_then(bearer_token) else {
        tracing::trace!("no bearer credential, continuing as anonymous");
        return Ok(None);
    };

    match verifier.verify(token).await {
        Ok(Some(identity)) => Ok(Some(identity)),
        Ok(None) => {
            tracing::debug!(verifier = verifier.name(), "bearer token rejected");
            Err(UnauthorizedError::invalid_token())
        }
        Err(err) => {
            // fail closed
            tracing::warn!(error = %err, verifier = verifier.name(), "token verifier failed");
            Err(UnauthorizedError::invalid_token())
        }
    }
}

/// Check the action's declared requirement against the resolved identity.
pub fn authorize(
    identity: Option<&Identity>,
    requirement: Option<AuthRequirement>,
) -> Result<(), UnauthorizedError> {
    if requirement == Some(AuthRequirement::Required) && identity.is_none() {
        return Err(UnauthorizedError::no_rights());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::services::auth::types::UnauthorizedReason;
    use crate::services::auth::verifier::{StaticTokenVerifier, VerifyError};

    fn verifier() -> StaticTokenVerifier {
        StaticTokenVerifier::new("123456", Identity::new(1, "John Doe"))
    }

    struct BrokenVerifier;

    #[async_trait]
    impl TokenVerifier for BrokenVerifier {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn verify(&self, _token: &str) -> Result<Option<Identity>, VerifyError> {
            Err(VerifyError::Backend("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn absent_header_is_anonymous() {
        assert_eq!(authenticate(&verifier(), None).await, Ok(None));
    }

    #[tokio::test]
    async fn non_bearer_headers_are_anonymous() {
        let v = verifier();
        for header in [
            "",
            "Basic dXNlcjpwYXNz",
            "bearer 123456",
            "BEARER 123456",
            "Bearer",
            "Token 123456",
            "123456",
        ] {
            assert_eq!(authenticate(&v, Some(header)).await, Ok(None), "{header}");
        }
    }

    #[tokio::test]
    async fn accepted_token_resolves_identity() {
        assert_eq!(
            authenticate(&verifier(), Some("Bearer 123456")).await,
            Ok(Some(Identity::new(1, "John Doe")))
        );
    }

    #[tokio::test]
    async fn rejected_token_is_invalid_token() {
        let v = verifier();
        for header in ["Bearer anything-else", "Bearer ", "Bearer  123456"] {
            let err = authenticate(&v, Some(header)).await.unwrap_err();
            assert_eq!(err.reason, UnauthorizedReason::InvalidToken, "{header}");
        }
    }

    #[tokio::test]
    async fn verifier_failure_fails_closed() {
        let err = authenticate(&BrokenVerifier, Some("Bearer 123456"))
            .await
            .unwrap_err();
        assert_eq!(err.reason, UnauthorizedReason::InvalidToken);

        // non-Bearer never reaches the backend
        assert_eq!(authenticate(&BrokenVerifier, Some("Basic x")).await, Ok(None));
    }

    #[tokio::test]
    async fn authenticate_is_idempotent() {
        let v = verifier();
        for header in [None, Some("Bearer 123456"), Some("Bearer nope"), Some("Basic x")] {
            let first = authenticate(&v, header).await;
            let second = authenticate(&v, header).await;
            assert_eq!(first, second);
        }
    }

    #[tokio::test]
    async fn concurrent_calls_do_not_interfere() {
        let v: Arc<dyn TokenVerifier> = Arc::new(verifier());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let v = Arc::clone(&v);
                tokio::spawn(async move {
                    let header = if i % 2 == 0 {
                        "Bearer 123456".to_string()
                    } else {
                        format!("Bearer wrong-{i}")
                    };
                    (i, authenticate(v.as_ref(), Some(header.as_str())).await)
                })
            })
            .collect();

        for handle in handles {
            let (i, result) = handle.await.unwrap();
            if i % 2 == 0 {
                assert_eq!(result, Ok(Some(Identity::new(1, "John Doe"))));
            } else {
                assert_eq!(result, Err(UnauthorizedError::invalid_token()));
            }
        }
    }

    #[test]
    fn authorize_required_without_identity_is_no_rights() {
        assert_eq!(
            authorize(None, Some(AuthRequirement::Required)),
            Err(UnauthorizedError::no_rights())
        );
    }

    #[test]
    fn authorize_allows_everything_else() {
        let user = Identity::new(1, "John Doe");

        assert_eq!(authorize(None, None), Ok(()));
        assert_eq!(authorize(None, Some(AuthRequirement::Optional)), Ok(()));
        assert_eq!(authorize(Some(&user), Some(AuthRequirement::Required)), Ok(()));
        assert_eq!(authorize(Some(&user), None), Ok(()));
    }

    #[test]
    fn bearer_token_strips_exact_prefix() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer "), Some(""));
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("bearer abc"), None);
    }
}
