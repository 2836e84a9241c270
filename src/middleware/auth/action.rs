//! Authorization hook (per action).
//!
//! Each action route carries its own `ActionMeta`; this layer checks the declared
//! requirement against the `AuthCtx` written by `access` and exposes the meta to
//! the handler through extensions.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::action::ActionMeta;
use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{AuthRequirement, authorize};
use crate::state::AppState;

#[derive(Debug, Clone, Copy)]
struct ActionGuard {
    meta: ActionMeta,
    enabled: bool,
    default_auth: Option<AuthRequirement>,
}

impl ActionGuard {
    fn requirement(&self) -> Option<AuthRequirement> {
        self.meta.auth.or(self.default_auth)
    }
}

/// Wrap an action's method router with its authorization check.
pub fn guard(
    state: &AppState,
    meta: ActionMeta,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    let guard = ActionGuard {
        meta,
        enabled: state.gateway.authorization,
        default_auth: state.gateway.default_auth,
    };

    route.route_layer(middleware::from_fn_with_state(guard, action_middleware))
}

async fn action_middleware(
    State(guard): State<ActionGuard>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if guard.enabled {
        let user = req.extensions().get::<AuthCtx>().and_then(AuthCtx::user);

        if let Err(err) = authorize(user, guard.requirement()) {
            tracing::debug!(action = guard.meta.name, "action rejected: no identity");
            return Err(err.into());
        }
    }

    req.extensions_mut().insert(guard.meta);

    Ok(next.run(req).await)
}
