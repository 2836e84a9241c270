/*
 * Responsibility
 * - 認証/認可フックが扱う値型 (Identity, AuthRequirement, UnauthorizedError)
 * - HTTP/axum には依存しない (IntoResponse への変換は error.rs 側)
 */
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// 認証済みの呼び出し元
///
/// - リクエスト単位で生成され、`AuthCtx` に一度だけ格納される
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: i64,
    pub name: String,
}

impl Identity {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// action が宣言する認証要件
///
/// "absent" は `Option<AuthRequirement>::None` で表す
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    Required,
    Optional,
}

impl AuthRequirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown auth requirement: {0}")]
pub struct ParseAuthRequirementError(pub String);

impl FromStr for AuthRequirement {
    type Err = ParseAuthRequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "required" => Ok(Self::Required),
            "optional" | "none" => Ok(Self::Optional),
            other => Err(ParseAuthRequirementError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedReason {
    /// Bearer token was presented but not accepted
    InvalidToken,
    /// action requires an identity and none was resolved
    NoRights,
}

impl UnauthorizedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidToken => "invalid_token",
            Self::NoRights => "no_rights",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unauthorized: {}", .reason.as_str())]
pub struct UnauthorizedError {
    pub reason: UnauthorizedReason,
}

impl UnauthorizedError {
    pub fn invalid_token() -> Self {
        Self {
            reason: UnauthorizedReason::InvalidToken,
        }
    }

    pub fn no_rights() -> Self {
        Self {
            reason: UnauthorizedReason::NoRights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_serializes_as_id_and_name() {
        let json = serde_json::to_value(Identity::new(1, "John Doe")).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "John Doe"}));
    }

    #[test]
    fn auth_requirement_parses_case_insensitively() {
        assert_eq!(
            "required".parse::<AuthRequirement>(),
            Ok(AuthRequirement::Required)
        );
        assert_eq!(
            " Required ".parse::<AuthRequirement>(),
            Ok(AuthRequirement::Required)
        );
        assert_eq!(
            "none".parse::<AuthRequirement>(),
            Ok(AuthRequirement::Optional)
        );
        assert!("always".parse::<AuthRequirement>().is_err());
    }

    #[test]
    fn unauthorized_error_displays_reason() {
        assert_eq!(
            UnauthorizedError::invalid_token().to_string(),
            "unauthorized: invalid_token"
        );
        assert_eq!(
            UnauthorizedError::no_rights().to_string(),
            "unauthorized: no_rights"
        );
    }
}
