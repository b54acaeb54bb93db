//! Where login users come from when the per-session cache misses.
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::access::LoginUser;
use crate::services::cache::{CacheClient, CacheError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error("login user decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Backend lookup of the login user bound to a session id.
///
/// Returns:
/// - `Ok(Some(_))` when the session is logged in
/// - `Ok(None)` when the session is unknown / logged out
/// - `Err(_)` on backend failure (callers decide how to degrade)
#[async_trait]
pub trait LoginUserSource: Send + Sync {
    async fn fetch_login_user(&self, session_id: &str) -> Result<Option<LoginUser>, SessionError>;
}

/// Reads login users stored as JSON under `<prefix>:<session_id>`.
///
/// Whoever performs the login writes these keys; this side only reads.
#[derive(Clone)]
pub struct CacheLoginUserSource<C: CacheClient> {
    cache: Arc<C>,
    prefix: String,
}

impl<C: CacheClient> CacheLoginUserSource<C> {
    pub fn new(cache: Arc<C>, prefix: impl Into<String>) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, session_id: &str) -> String {
        format!("{}:{}", self.prefix, session_id)
    }
}

#[async_trait]
impl<C: CacheClient> LoginUserSource for CacheLoginUserSource<C> {
    async fn fetch_login_user(&self, session_id: &str) -> Result<Option<LoginUser>, SessionError> {
        let key = self.key(session_id);

        let Some(raw) = self.cache.get_string(&key).await? else {
            return Ok(None);
        };

        let user = serde_json::from_str::<LoginUser>(&raw)?;
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::services::cache::MemoryCache;

    #[tokio::test]
    async fn reads_json_under_prefixed_key() {
        let cache = Arc::new(MemoryCache::new());
        cache
            .insert(
                "login_user:abc",
                r#"{"userName":"alice","userRole":"user"}"#,
                Duration::from_secs(60),
            )
            .await;

        let source = CacheLoginUserSource::new(cache, "login_user");
        let user = source.fetch_login_user("abc").await.unwrap().unwrap();

        assert_eq!(user.user_name.as_deref(), Some("alice"));
        assert_eq!(user.role(), Some("user"));
        assert!(source.fetch_login_user("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_json_is_a_decode_error() {
        let cache = Arc::new(MemoryCache::new());
        cache
            .insert("login_user:abc", "not json", Duration::from_secs(60))
            .await;

        let source = CacheLoginUserSource::new(cache, "login_user");
        let err = source.fetch_login_user("abc").await.unwrap_err();

        assert!(matches!(err, SessionError::Decode(_)));
    }
}
