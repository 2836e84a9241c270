//! Authentication hook → AuthCtx を extensions に入れる
//!
//! - `Authorization` ヘッダを読み、`services::auth::authenticate` に委譲する
//! - 結果 (匿名なら None) を `AuthCtx` としてリクエストごとに一度だけ格納する
//! - invalid_token は 401 で即座に打ち切る

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::authenticate;
use crate::state::AppState;

/// Gateway の全 action に authentication を掛ける。
///
/// `route_layer` を使うので、マッチしなかったリクエスト (静的ファイル等) には掛からない。
/// 全 route を登録した後に呼ぶこと。
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    if !state.gateway.authentication {
        tracing::info!("gateway authentication disabled");
        return router;
    }

    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // 非 ASCII なヘッダ値は「ヘッダ無し」と同じ扱い
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let user = authenticate(state.verifier.as_ref(), auth).await?;

    if let Some(user) = &user {
        tracing::debug!(user_id = user.id, "request authenticated");
    }

    // middleware → authorization / extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(user));

    Ok(next.run(req).await)
}
