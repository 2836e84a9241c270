/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証コンテキスト（AuthCtx）を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - AuthCtx
 * - CurrentUser / AuthUser
 */

mod core;
mod types;

pub use self::core::{AuthUser, CurrentUser};
pub use self::types::AuthCtx;
