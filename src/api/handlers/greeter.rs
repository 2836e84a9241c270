/*
 * Responsibility
 * - greeter.* action (匿名アクセス可)
 * - hello: 解決済みなら名前で挨拶、匿名なら anonymous
 * - welcome: merged params の `name` が必須
 */
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::action::ActionMeta;
use crate::api::extractors::{CurrentUser, Params};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: String,
}

pub async fn hello(
    Extension(action): Extension<ActionMeta>,
    CurrentUser(user): CurrentUser,
) -> Json<GreetingResponse> {
    let name = user.as_ref().map_or("anonymous", |u| u.name.as_str());
    tracing::debug!(action = action.name, anonymous = user.is_none(), "greeting");

    Json(GreetingResponse {
        message: format!("Hello, {name}"),
    })
}

pub async fn welcome(params: Params) -> Result<Json<GreetingResponse>, AppError> {
    let name = params
        .get_str("name")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::bad_request("MISSING_PARAM", "name is required"))?;

    Ok(Json(GreetingResponse {
        message: format!("Welcome, {name}"),
    }))
}
