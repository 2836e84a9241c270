/*
 * Responsibility
 * - action の記述子 (名前 + 認証要件)
 * - route ごとに宣言し、authorization middleware が参照する
 */
use crate::services::auth::AuthRequirement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMeta {
    pub name: &'static str,
    pub auth: Option<AuthRequirement>,
}

impl ActionMeta {
    /// An action with no declared auth requirement.
    pub const fn new(name: &'static str) -> Self {
        Self { name, auth: None }
    }

    pub const fn auth(mut self, requirement: AuthRequirement) -> Self {
        self.auth = Some(requirement);
        self
    }
}
