use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::access::LoginUser;

#[derive(Debug, Clone)]
struct Entry {
    user: LoginUser,
    cached_at: DateTime<Utc>,
}

/// In-process cache of resolved login users, keyed by session id.
///
/// Cheap to clone (shared map behind `Arc`). Entries older than `ttl` are
/// reported as absent so the guard re-fetches them.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl SessionRegistry {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: i64::try_from(ttl_seconds)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
        }
    }

    pub async fn get(&self, session_id: &str) -> Option<LoginUser> {
        self.get_at(session_id, Utc::now()).await
    }

    async fn get_at(&self, session_id: &str, now: DateTime<Utc>) -> Option<LoginUser> {
        let entries = self.entries.read().await;
        let entry = entries.get(session_id)?;

        if now - entry.cached_at >= self.ttl {
            return None;
        }
        Some(entry.user.clone())
    }

    /// Store the result of a refresh. `None` evicts the session.
    pub async fn put(&self, session_id: &str, user: Option<LoginUser>) {
        self.put_at(session_id, user, Utc::now()).await
    }

    async fn put_at(&self, session_id: &str, user: Option<LoginUser>, now: DateTime<Utc>) {
        let mut entries = self.entries.write().await;
        match user {
            Some(user) => {
                entries.insert(
                    session_id.to_string(),
                    Entry {
                        user,
                        cached_at: now,
                    },
                );
            }
            None => {
                entries.remove(session_id);
            }
        }

        // Opportunistic sweep so abandoned sessions do not pile up.
        let ttl = self.ttl;
        entries.retain(|_, e| now - e.cached_at < ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_cached_user_until_ttl() {
        let registry = SessionRegistry::new(60);
        let t0 = Utc::now();

        registry
            .put_at("sid", Some(LoginUser::with_role("user")), t0)
            .await;

        assert_eq!(
            registry.get_at("sid", t0 + Duration::seconds(59)).await,
            Some(LoginUser::with_role("user"))
        );
        assert!(registry.get_at("sid", t0 + Duration::seconds(60)).await.is_none());
    }

    #[tokio::test]
    async fn putting_none_evicts() {
        let registry = SessionRegistry::new(60);
        registry.put("sid", Some(LoginUser::with_role("admin"))).await;
        registry.put("sid", None).await;

        assert!(registry.get("sid").await.is_none());
    }
}
