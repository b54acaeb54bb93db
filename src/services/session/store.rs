use async_trait::async_trait;

use crate::access::LoginUser;

/// Read side of the session consumed by the navigation guard.
///
/// - `current_user` returns whatever identity is cached right now.
/// - `refresh_current_user` re-fetches the identity once. It is best-effort and
///   must not fail: on any backend error the identity is left absent.
#[async_trait]
pub trait SessionStore: Send + Sync {
    fn current_user(&self) -> Option<LoginUser>;

    async fn refresh_current_user(&self);
}
