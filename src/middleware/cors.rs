//! CORS policy for browser clients of the guarded pages.
//!
//! Policy:
//! - Development: permissive (Allow-Origin: *), WITHOUT credentials. Session
//!   cookies are therefore not sent cross-origin in development.
//! - Production: allowlist origins from Config, WITH credentials so the session
//!   cookie reaches the guard.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

/// IMPORTANT:
/// - Do not combine wildcard origin (`Any`) with `allow_credentials(true)`.
pub fn apply(router: Router, config: &Config) -> Router {
    let methods = [Method::GET, Method::HEAD, Method::OPTIONS];
    let headers = [
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static("x-request-id"),
    ];

    let cors = if config.app_env.is_production() {
        // Empty allowlist => no CORS headers at all.
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_credentials(true)
            .allow_methods(methods)
            .allow_headers(headers)
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers)
    }
    .expose_headers([header::LOCATION])
    .max_age(std::time::Duration::from_secs(60 * 10));

    router.layer(cors)
}
