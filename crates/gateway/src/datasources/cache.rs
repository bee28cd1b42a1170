//! Process-wide memo of upstream GET responses.
//!
//! Entries are keyed by full request URL and live for the configured TTL.
//! A zero TTL turns the cache off.

use std::time::Duration;

use moka::future::Cache;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct ResponseCache {
    entries: Option<Cache<String, Value>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        let entries = (!ttl.is_zero()).then(|| Cache::builder().time_to_live(ttl).build());
        Self { entries }
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.as_ref()?;
        let hit = entries.get(key).await;
        tracing::debug!("Launch cache {}: {}", if hit.is_some() { "HIT" } else { "MISS" }, key);
        hit
    }

    pub async fn put(&self, key: &str, body: Value) {
        if let Some(entries) = &self.entries {
            entries.insert(key.to_string(), body).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_hit_after_put() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        assert!(cache.get("http://x/launches").await.is_none());

        cache.put("http://x/launches", json!([{"flight_number": 1}])).await;
        assert_eq!(cache.get("http://x/launches").await, Some(json!([{"flight_number": 1}])));
        assert!(cache.get("http://x/launches?flight_number=1").await.is_none());
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let cache = ResponseCache::new(Duration::ZERO);
        assert!(cache.entries.is_none());
        cache.put("k", json!(1)).await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = ResponseCache::new(Duration::from_millis(20));
        cache.put("k", json!(1)).await;
        assert_eq!(cache.get("k").await, Some(json!(1)));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(cache.get("k").await.is_none());
    }
}
