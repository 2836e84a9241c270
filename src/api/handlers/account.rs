/*
 * Responsibility
 * - account.me action (auth: required)
 * - AuthCtx に格納された Identity をそのまま返す
 */
use axum::Json;

use crate::api::extractors::AuthUser;
use crate::services::auth::Identity;

pub async fn me(AuthUser(user): AuthUser) -> Json<Identity> {
    Json(user)
}
