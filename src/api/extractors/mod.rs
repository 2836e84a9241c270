/*
 * Responsibility
 * - handler が使う extractor の公開インターフェース
 */
pub mod auth_ctx;
pub mod params;

pub use auth_ctx::{AuthCtx, AuthUser, CurrentUser};
pub use params::Params;
