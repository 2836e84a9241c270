/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - verifier: Arc<dyn TokenVerifier>, gateway: GatewaySettings
 * - Clone 前提で持つ (内部は Arc/Copy)
 */
use std::sync::Arc;

use crate::config::GatewaySettings;
use crate::services::auth::TokenVerifier;

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<dyn TokenVerifier>,
    pub gateway: GatewaySettings,
}

impl AppState {
    pub fn new(verifier: Arc<dyn TokenVerifier>, gateway: GatewaySettings) -> Self {
        Self { verifier, gateway }
    }
}
