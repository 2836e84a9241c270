/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, gateway のフック設定, body limit, demo 認証情報など)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::services::auth::{AuthRequirement, Identity};

const DEV_STATIC_TOKEN: &str = "123456";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Which gateway hooks run, and the policy for actions that declare nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewaySettings {
    pub authentication: bool,
    pub authorization: bool,
    pub default_auth: Option<AuthRequirement>,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            authentication: true,
            authorization: true,
            default_auth: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,
    pub log_4xx_responses: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            body_limit_bytes: 1024 * 1024,
            request_timeout: Duration::from_secs(30),
            log_4xx_responses: false,
        }
    }
}

/// Credential accepted by the development `StaticTokenVerifier`.
#[derive(Clone)]
pub struct StaticTokenSettings {
    pub token: String,
    pub identity: Identity,
}

impl std::fmt::Debug for StaticTokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenSettings")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub assets_dir: PathBuf,

    pub gateway: GatewaySettings,
    pub http: HttpSettings,
    pub static_token: StaticTokenSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (env vars in production, a map in tests).
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match get("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(get("APP_ENV").as_deref());

        let assets_dir = get("ASSETS_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("public"));

        let gateway = GatewaySettings {
            authentication: parse_bool(&get, "GATEWAY_AUTHENTICATION", true)?,
            authorization: parse_bool(&get, "GATEWAY_AUTHORIZATION", true)?,
            default_auth: match get("GATEWAY_DEFAULT_AUTH").filter(|s| !s.trim().is_empty()) {
                Some(v) => Some(
                    v.parse::<AuthRequirement>()
                        .map_err(|_| ConfigError::Invalid("GATEWAY_DEFAULT_AUTH"))?,
                ),
                None => None,
            },
        };

        let defaults = HttpSettings::default();
        let http = HttpSettings {
            body_limit_bytes: parse_num(&get, "BODY_LIMIT_BYTES", defaults.body_limit_bytes)?,
            request_timeout: Duration::from_secs(parse_num(
                &get,
                "REQUEST_TIMEOUT_SECONDS",
                defaults.request_timeout.as_secs(),
            )?),
            log_4xx_responses: parse_bool(&get, "LOG_4XX_RESPONSES", defaults.log_4xx_responses)?,
        };

        // The demo token is only defaulted outside production
        let token = match get("AUTH_STATIC_TOKEN").filter(|s| !s.is_empty()) {
            Some(token) => token,
            None if app_env.is_production() => {
                return Err(ConfigError::Missing("AUTH_STATIC_TOKEN"));
            }
            None => DEV_STATIC_TOKEN.to_string(),
        };

        let identity = Identity::new(
            parse_num(&get, "AUTH_STATIC_USER_ID", 1_i64)?,
            get("AUTH_STATIC_USER_NAME").unwrap_or_else(|| "John Doe".to_string()),
        );

        Ok(Self {
            addr,
            app_env,
            assets_dir,
            gateway,
            http,
            static_token: StaticTokenSettings { token, identity },
        })
    }
}

fn parse_bool<F>(get: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = get(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(key)),
    }
}

fn parse_num<F, T>(get: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}
