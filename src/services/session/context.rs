use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::access::LoginUser;
use crate::services::session::{LoginUserSource, SessionStore};

/// Per-request session view handed to the guard.
///
/// Built by the router integration from the session cookie and whatever the
/// registry had cached. After the guard runs, `refreshed()` tells the caller
/// whether the cached identity should be written back.
pub struct SessionContext {
    session_id: Option<String>,
    source: Arc<dyn LoginUserSource>,
    user: RwLock<Option<LoginUser>>,
    refreshed: AtomicBool,
}

impl SessionContext {
    pub fn new(
        session_id: Option<String>,
        cached: Option<LoginUser>,
        source: Arc<dyn LoginUserSource>,
    ) -> Self {
        Self {
            session_id,
            source,
            user: RwLock::new(cached),
            refreshed: AtomicBool::new(false),
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn refreshed(&self) -> bool {
        self.refreshed.load(Ordering::Acquire)
    }

    fn set_user(&self, user: Option<LoginUser>) {
        // A poisoned lock still holds a valid Option; keep going with it.
        let mut guard = self.user.write().unwrap_or_else(|e| e.into_inner());
        *guard = user;
    }
}

#[async_trait]
impl SessionStore for SessionContext {
    fn current_user(&self) -> Option<LoginUser> {
        self.user.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    async fn refresh_current_user(&self) {
        self.refreshed.store(true, Ordering::Release);

        let Some(session_id) = self.session_id.as_deref() else {
            self.set_user(None);
            return;
        };

        let user = match self.source.fetch_login_user(session_id).await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "login user refresh failed; treating as logged out");
                None
            }
        };

        self.set_user(user);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::services::cache::CacheError;
    use crate::services::session::source::SessionError;

    struct FixedSource {
        result: fn() -> Result<Option<LoginUser>, SessionError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LoginUserSource for FixedSource {
        async fn fetch_login_user(
            &self,
            _session_id: &str,
        ) -> Result<Option<LoginUser>, SessionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn source(result: fn() -> Result<Option<LoginUser>, SessionError>) -> Arc<FixedSource> {
        Arc::new(FixedSource {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn refresh_loads_user_from_source() {
        let src = source(|| Ok(Some(LoginUser::with_role("user"))));
        let ctx = SessionContext::new(Some("sid".into()), None, src.clone());

        assert!(ctx.current_user().is_none());
        ctx.refresh_current_user().await;

        assert_eq!(ctx.current_user(), Some(LoginUser::with_role("user")));
        assert!(ctx.refreshed());
        assert_eq!(src.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refresh_failure_leaves_identity_absent() {
        let src = source(|| Err(CacheError::BackendConnection("down".into()).into()));
        let ctx = SessionContext::new(Some("sid".into()), Some(LoginUser::default()), src);

        ctx.refresh_current_user().await;

        assert!(ctx.current_user().is_none());
    }

    #[tokio::test]
    async fn refresh_without_session_skips_source() {
        let src = source(|| Ok(Some(LoginUser::with_role("admin"))));
        let ctx = SessionContext::new(None, None, src.clone());

        ctx.refresh_current_user().await;

        assert!(ctx.current_user().is_none());
        assert_eq!(src.calls.load(Ordering::SeqCst), 0);
    }
}
