//! Time-bounded cache for company news, keyed by symbol and range

use crate::model::{NewsItem, TimeRange};
use cached::{Cached, TimedCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache key for a company news request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NewsKey {
    /// Upper-cased ticker symbol
    pub symbol: String,
    pub range: TimeRange,
}

impl NewsKey {
    pub fn new(symbol: &str, range: TimeRange) -> Self {
        Self {
            symbol: symbol.trim().to_ascii_uppercase(),
            range,
        }
    }
}

/// Thread-safe news cache; clones share the same storage
#[derive(Clone)]
pub struct NewsCache {
    cache: Arc<RwLock<TimedCache<NewsKey, Vec<NewsItem>>>>,
}

impl NewsCache {
    /// Create a new cache with specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a value from the cache
    pub async fn get(&self, key: &NewsKey) -> Option<Vec<NewsItem>> {
        // cache_get updates hit/miss counters, so it needs the write lock
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a value into the cache
    pub async fn insert(&self, key: NewsKey, items: Vec<NewsItem>) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, items);
    }

    /// Return the cached items or run `fetcher` and cache its result.
    ///
    /// Errors are returned unchanged and never cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: NewsKey, fetcher: F) -> Result<Vec<NewsItem>, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Vec<NewsItem>, E>>,
    {
        if let Some(items) = self.get(&key).await {
            tracing::debug!(symbol = %key.symbol, range = %key.range, "news cache hit");
            return Ok(items);
        }

        tracing::debug!(symbol = %key.symbol, range = %key.range, "news cache miss");
        let items = fetcher().await?;
        self.insert(key, items.clone()).await;
        Ok(items)
    }

    /// Invalidate a specific cache entry
    pub async fn invalidate(&self, key: &NewsKey) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_remove(key);
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Get the number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> NewsItem {
        NewsItem {
            id: id.to_string(),
            title: format!("headline {id}"),
            source: "Test".to_string(),
            published_at: "2025-02-01T08:00:00Z".to_string(),
            url: format!("https://example.com/{id}"),
            summary: String::new(),
        }
    }

    #[test]
    fn test_key_normalizes_symbol() {
        assert_eq!(NewsKey::new(" aapl ", TimeRange::OneDay), NewsKey::new("AAPL", TimeRange::OneDay));
        assert_ne!(NewsKey::new("AAPL", TimeRange::OneDay), NewsKey::new("AAPL", TimeRange::OneWeek));
    }

    #[tokio::test]
    async fn test_cache_insert_and_get() {
        let cache = NewsCache::new(Duration::from_secs(60));
        let key = NewsKey::new("AAPL", TimeRange::OneWeek);

        cache.insert(key.clone(), vec![item("1")]).await;

        let retrieved = cache.get(&key).await.unwrap();
        assert_eq!(retrieved.len(), 1);
        assert_eq!(retrieved[0].id, "1");
    }

    #[tokio::test]
    async fn test_cache_get_or_fetch() {
        let cache = NewsCache::new(Duration::from_secs(60));
        let key = NewsKey::new("AAPL", TimeRange::OneWeek);

        let mut call_count = 0;
        let result = cache
            .get_or_fetch(key.clone(), || {
                call_count += 1;
                async { Ok::<_, String>(vec![item("1"), item("2")]) }
            })
            .await
            .unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(call_count, 1);

        // Second call should use cache
        let result = cache
            .get_or_fetch(key, || {
                call_count += 1;
                async { Ok::<_, String>(Vec::new()) }
            })
            .await
            .unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(call_count, 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = NewsCache::new(Duration::from_secs(60));
        let key = NewsKey::new("TSLA", TimeRange::OneDay);

        let result = cache
            .get_or_fetch(key.clone(), || async { Err::<Vec<NewsItem>, _>("boom") })
            .await;
        assert!(result.is_err());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_invalidation_and_clear() {
        let cache = NewsCache::new(Duration::from_secs(60));
        let key = NewsKey::new("AAPL", TimeRange::OneWeek);

        cache.insert(key.clone(), vec![item("1")]).await;
        cache.invalidate(&key).await;
        assert!(cache.get(&key).await.is_none());

        for symbol in ["AAPL", "MSFT", "NVDA"] {
            cache.insert(NewsKey::new(symbol, TimeRange::OneDay), Vec::new()).await;
        }
        assert_eq!(cache.len().await, 3);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
