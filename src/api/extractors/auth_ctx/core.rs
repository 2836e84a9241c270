use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::{Identity, UnauthorizedError};

use super::AuthCtx;

fn resolved_user(parts: &Parts) -> Option<Identity> {
    parts
        .extensions
        .get::<AuthCtx>()
        .and_then(|ctx| ctx.user().cloned())
}

/// Handler で、解決済み (かもしれない) 呼び出し元を受け取るための extractor
/// AuthCtx が無い (authentication 無効) 場合も匿名として扱う
pub struct CurrentUser(pub Option<Identity>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(resolved_user(parts)))
    }
}

/// Identity 必須の handler 用 extractor
/// 見つからない場合は 401 (no_rights) を返す
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        resolved_user(parts)
            .map(AuthUser)
            .ok_or_else(|| UnauthorizedError::no_rights().into())
    }
}
