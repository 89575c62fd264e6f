//! Secret Cache Module
//!
//! Single-value cache with an explicit expiration timestamp.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CachedSecret {
    value: String,
    expires_at: DateTime<Utc>,
}

// == Secret Cache ==
/// Holds one secret value until it expires.
///
/// Callers check the cache, fetch on a miss, then `store` the result. The lock
/// is released between the check and the store, so concurrent misses may each
/// fetch and overwrite the entry. Every fetch returns the current value, so the
/// last writer wins harmlessly.
#[derive(Debug)]
pub struct SecretCache {
    entry: RwLock<Option<CachedSecret>>,
    ttl: Duration,
}

impl SecretCache {
    // == Constructor ==
    /// Creates an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: RwLock::new(None),
            ttl,
        }
    }

    // == Get ==
    /// Returns the cached value if `now` is strictly before its expiration.
    pub async fn get(&self, now: DateTime<Utc>) -> Option<String> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|cached| now < cached.expires_at)
            .map(|cached| cached.value.clone())
    }

    // == Store ==
    /// Caches `value`, expiring `ttl` after `now`.
    pub async fn store(&self, value: String, now: DateTime<Utc>) {
        *self.entry.write().await = Some(CachedSecret {
            value,
            expires_at: now + self.ttl,
        });
    }

    /// Expiration of the current entry, if any.
    #[cfg(test)]
    pub(crate) async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.entry.read().await.as_ref().map(|c| c.expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_empty_cache_misses() {
        let cache = SecretCache::new(Duration::minutes(15));
        assert!(cache.get(start()).await.is_none());
        assert!(cache.expires_at().await.is_none());
    }

    #[tokio::test]
    async fn test_hit_before_expiry() {
        let cache = SecretCache::new(Duration::minutes(15));
        cache.store("k1".to_string(), start()).await;

        let almost = start() + Duration::minutes(15) - Duration::seconds(1);
        assert_eq!(cache.get(almost).await.as_deref(), Some("k1"));
    }

    #[tokio::test]
    async fn test_miss_at_expiry_boundary() {
        let cache = SecretCache::new(Duration::minutes(15));
        cache.store("k1".to_string(), start()).await;

        assert_eq!(cache.expires_at().await, Some(start() + Duration::minutes(15)));
        assert!(cache.get(start() + Duration::minutes(15)).await.is_none());
    }
}
