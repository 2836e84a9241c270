/// Factory: build the `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{StaticTokenVerifier, TokenVerifier};

pub fn build_token_verifier(config: &Config) -> Arc<dyn TokenVerifier> {
    let verifier = StaticTokenVerifier::new(
        config.static_token.token.clone(),
        config.static_token.identity.clone(),
    );

    tracing::info!(verifier = verifier.name(), "token verifier ready");

    Arc::new(verifier)
}
