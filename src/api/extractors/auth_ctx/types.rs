/*
 * Responsibility
 * - リクエスト単位の認証コンテキスト (元の ctx.meta.user に相当)
 * - authentication middleware が一度だけ extensions に格納し、以降は読み取り専用
 */
use crate::services::auth::Identity;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthCtx {
    pub user: Option<Identity>,
}

impl AuthCtx {
    pub fn new(user: Option<Identity>) -> Self {
        Self { user }
    }

    pub fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }
}
