/*
 * Responsibility
 * - ページの URL 構造を定義
 * - guard を掛ける範囲 (fallback のページ全般) と 掛けない範囲 (health / login / noAuth) を分ける
 */
use axum::{Router, routing::get};

use crate::api::handlers::{health::health, login::login, no_auth::no_auth, page::page};
use crate::config::HEALTH_PATH;
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let guarded = middleware::guard::apply(Router::new().fallback(get(page)), state.clone());

    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(&state.guard_paths.login, get(login))
        .route(&state.guard_paths.no_auth, get(no_auth))
        .merge(guarded)
}
