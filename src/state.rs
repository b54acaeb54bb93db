/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: route table, guard のリダイレクト先, session registry, login user の取得元
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::guard::GuardPaths;
use crate::services::route_table::RouteTable;
use crate::services::session::{LoginUserSource, SessionRegistry};

#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub guard_paths: Arc<GuardPaths>,
    pub sessions: SessionRegistry,
    pub login_users: Arc<dyn LoginUserSource>,
    pub session_cookie_name: Arc<str>,
}

impl AppState {
    pub fn new(
        routes: RouteTable,
        guard_paths: GuardPaths,
        sessions: SessionRegistry,
        login_users: Arc<dyn LoginUserSource>,
        session_cookie_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            routes: Arc::new(routes),
            guard_paths: Arc::new(guard_paths),
            sessions,
            login_users,
            session_cookie_name: session_cookie_name.into(),
        }
    }
}
