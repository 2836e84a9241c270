pub mod factory;
pub mod hooks;
pub mod types;
pub mod verifier;

pub use factory::build_token_verifier;
pub use hooks::{authenticate, authorize};
pub use types::{AuthRequirement, Identity, UnauthorizedError};
pub use verifier::{StaticTokenVerifier, TokenVerifier};
