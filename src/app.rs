/*
 * Responsibility
 * - Config読み込み → 依存生成 (cache / login user source / session registry) → Router 組み立て
 * - Middleware の適用 (guard / HTTP / CORS)
 * - axum::serve() で起動
 */
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::{
    api,
    config::Config,
    middleware,
    services::{
        cache::{CacheClient, MemoryCache, ValkeyClient},
        session::{CacheLoginUserSource, LoginUserSource, SessionRegistry},
    },
    state::AppState,
};

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let login_users = login_user_source(&config).await?;
    let state = AppState::new(
        config.route_table.clone(),
        config.guard_paths.clone(),
        SessionRegistry::new(config.session_cache_ttl_seconds),
        login_users,
        config.session_cookie_name.as_str(),
    );

    tracing::info!(
        addr = %config.addr,
        guarded_routes = state.routes.len(),
        login = %config.guard_paths.login,
        no_auth = %config.guard_paths.no_auth,
        "starting route guard"
    );

    let app = build_router(state);
    let app = middleware::http::apply(app);
    let app = middleware::cors::apply(app, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn login_user_source(config: &Config) -> Result<Arc<dyn LoginUserSource>> {
    let prefix = config.login_user_key_prefix.clone();

    match config.valkey_url.as_deref() {
        Some(url) => {
            let cache = ValkeyClient::new(url).await?;
            tracing::info!(backend = cache.backend_name(), "session cache connected");
            Ok(Arc::new(CacheLoginUserSource::new(Arc::new(cache), prefix)))
        }
        None => {
            let cache = MemoryCache::new();
            tracing::warn!(
                backend = cache.backend_name(),
                "VALKEY_URL not set; login users are only visible to this process"
            );
            Ok(Arc::new(CacheLoginUserSource::new(Arc::new(cache), prefix)))
        }
    }
}

pub(crate) fn build_router(state: AppState) -> Router {
    api::routes(state.clone()).with_state(state)
}
