/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, CORS 許可, Valkey, session, ルートのアクセス設定など)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::guard::GuardPaths;
use crate::services::route_table::RouteTable;

/// Liveness endpoint; always mounted outside the guard.
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
    Routes(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
            ConfigError::Routes(msg) => write!(f, "invalid configuration: ROUTE_ACCESS: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // None => in-process cache (development)
    pub valkey_url: Option<String>,

    pub session_cookie_name: String,
    pub session_cache_ttl_seconds: u64,
    pub login_user_key_prefix: String,

    pub guard_paths: GuardPaths,
    pub route_table: RouteTable,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let valkey_url = std::env::var("VALKEY_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let session_cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "SESSION".to_string());

        let session_cache_ttl_seconds = std::env::var("SESSION_CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(300);

        let login_user_key_prefix =
            std::env::var("LOGIN_USER_KEY_PREFIX").unwrap_or_else(|_| "login_user".to_string());

        let defaults = GuardPaths::default();
        let guard_paths = GuardPaths {
            login: std::env::var("LOGIN_PATH").unwrap_or(defaults.login),
            no_auth: std::env::var("NO_AUTH_PATH").unwrap_or(defaults.no_auth),
        };
        validate_guard_paths(&guard_paths)?;

        let route_table = RouteTable::parse(&std::env::var("ROUTE_ACCESS").unwrap_or_default())
            .map_err(|e| ConfigError::Routes(e.to_string()))?;

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            valkey_url,
            session_cookie_name,
            session_cache_ttl_seconds,
            login_user_key_prefix,
            guard_paths,
            route_table,
        })
    }
}

/// Login and no-auth pages are mounted as literal axum routes next to `/health`,
/// so they must be distinct plain paths.
fn validate_guard_paths(paths: &GuardPaths) -> Result<(), ConfigError> {
    let is_plain_path =
        |p: &str| p.starts_with('/') && !p.contains(['{', '}', '*', '?']) && p != HEALTH_PATH;

    if !is_plain_path(&paths.login) {
        return Err(ConfigError::Invalid("LOGIN_PATH"));
    }
    if !is_plain_path(&paths.no_auth) || paths.no_auth == paths.login {
        return Err(ConfigError::Invalid("NO_AUTH_PATH"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(login: &str, no_auth: &str) -> GuardPaths {
        GuardPaths {
            login: login.to_string(),
            no_auth: no_auth.to_string(),
        }
    }

    #[test]
    fn default_guard_paths_are_valid() {
        assert!(validate_guard_paths(&GuardPaths::default()).is_ok());
        assert!(validate_guard_paths(&paths("/signin", "/forbidden")).is_ok());
    }

    #[test]
    fn rejects_paths_that_collide_with_other_routes() {
        assert!(matches!(
            validate_guard_paths(&paths("/x", "/x")),
            Err(ConfigError::Invalid("NO_AUTH_PATH"))
        ));
        assert!(matches!(
            validate_guard_paths(&paths(HEALTH_PATH, "/noAuth")),
            Err(ConfigError::Invalid("LOGIN_PATH"))
        ));
        assert!(matches!(
            validate_guard_paths(&paths("/user/login", HEALTH_PATH)),
            Err(ConfigError::Invalid("NO_AUTH_PATH"))
        ));
    }

    #[test]
    fn rejects_non_literal_paths() {
        assert!(matches!(
            validate_guard_paths(&paths("user/login", "/noAuth")),
            Err(ConfigError::Invalid("LOGIN_PATH"))
        ));
        assert!(matches!(
            validate_guard_paths(&paths("/user/{id}", "/noAuth")),
            Err(ConfigError::Invalid("LOGIN_PATH"))
        ));
        assert!(matches!(
            validate_guard_paths(&paths("/user/login", "/no/*")),
            Err(ConfigError::Invalid("NO_AUTH_PATH"))
        ));
    }
}
