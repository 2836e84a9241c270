/*
 * Responsibility
 * - gateway の action テーブル (URL → ActionMeta + handler)
 * - action ごとに authorization、全 action に authentication を route_layer で適用
 * - マッチしないパスは静的ファイル (assets) へ fallback
 */
use std::path::Path;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use crate::api::action::ActionMeta;
use crate::api::handlers::{account::me, greeter, health::health};
use crate::middleware::auth::{access, action::guard};
use crate::services::auth::AuthRequirement;
use crate::state::AppState;

pub const HEALTH: ActionMeta = ActionMeta::new("health.check");
pub const GREETER_HELLO: ActionMeta = ActionMeta::new("greeter.hello");
pub const GREETER_WELCOME: ActionMeta = ActionMeta::new("greeter.welcome");
pub const ACCOUNT_ME: ActionMeta = ActionMeta::new("account.me").auth(AuthRequirement::Required);

pub fn routes(state: AppState, assets_dir: &Path) -> Router {
    let actions = Router::new()
        .route("/health", guard(&state, HEALTH, get(health)))
        .route("/greeter/hello", guard(&state, GREETER_HELLO, get(greeter::hello)))
        .route(
            "/greeter/welcome",
            guard(
                &state,
                GREETER_WELCOME,
                get(greeter::welcome).post(greeter::welcome),
            ),
        )
        .route("/me", guard(&state, ACCOUNT_ME, get(me)));

    // must run after every action is registered (route_layer)
    access::apply(actions, state.clone())
        .fallback_service(ServeDir::new(assets_dir))
        .with_state(state)
}
