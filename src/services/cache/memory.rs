use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::services::cache::client::{CacheClient, CacheResult};

/// In-process cache for development and tests (no `VALKEY_URL`).
#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, (String, Instant)>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value that expires after `ttl`.
    #[cfg(test)]
    pub async fn insert(&self, key: &str, value: &str, ttl: std::time::Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
    }
}

#[async_trait]
impl CacheClient for MemoryCache {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get_string(&self, key: &str) -> CacheResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(value, _)| value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn returns_live_values() {
        let cache = MemoryCache::new();
        cache.insert("k", "v", Duration::from_secs(60)).await;

        assert_eq!(cache.get_string("k").await.unwrap().as_deref(), Some("v"));
        assert!(cache.get_string("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_values_are_hidden() {
        let cache = MemoryCache::new();
        cache.insert("k", "v", Duration::ZERO).await;

        assert!(cache.get_string("k").await.unwrap().is_none());
    }
}
