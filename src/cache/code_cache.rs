//! Read-through cache for code lookups
//!
//! Only hits are cached. Entries live for a short TTL and are dropped on
//! every local write, so the database stays the source of truth.

use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::config::CacheConfig;
use crate::storage::Shortcut;

pub struct CodeCache {
    inner: Cache<String, Shortcut>,
}

impl CodeCache {
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        debug!(
            "CodeCache initialized with max capacity: {}, TTL: {:?}",
            max_capacity, ttl
        );
        Self { inner }
    }

    /// `None` when caching is disabled
    pub fn from_config(config: &CacheConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(Duration::from_secs(config.ttl_secs), config.max_capacity))
    }

    pub async fn get(&self, code: &str) -> Option<Shortcut> {
        self.inner.get(code).await
    }

    pub async fn insert(&self, shortcut: Shortcut) {
        self.inner.insert(shortcut.code.clone(), shortcut).await;
    }

    pub async fn invalidate(&self, code: &str) {
        self.inner.invalidate(code).await;
    }
}
