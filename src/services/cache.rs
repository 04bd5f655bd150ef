//! Redis-backed response cache.
//!
//! GET responses are stored under `cache:{path?query}` with a TTL; every
//! successful product mutation purges the whole product-listing namespace
//! with a cursor-based SCAN.

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};
use std::time::Duration;

/// Cached responses live under this prefix, keyed by full request path+query.
const CACHE_KEY_PREFIX: &str = "cache:";

const PRODUCT_LISTING_PATTERN: &str = "cache:/api/v1/products*";

const SCAN_BATCH_SIZE: usize = 100;

// A misbehaving server could hand back a cursor that never reaches zero;
// stop after this many rounds and let key expiry clean up the rest.
const MAX_SCAN_ROUNDS: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("redis command failed: {0}")]
    Command(#[from] redis::RedisError),
}

/// The seam the listing orchestrator invalidates through. Failures stay on
/// this side of the seam: a purge can never fail the mutation above it.
#[async_trait]
pub trait ListingCacheInvalidator: Send + Sync {
    async fn invalidate_product_listing(&self);
}

pub struct CacheService {
    client: RedisClient,
}

impl CacheService {
    pub fn new(redis_url: &str) -> Result<Self, CacheError> {
        let client = RedisClient::open(redis_url)?;
        Ok(Self { client })
    }

    pub fn response_key(uri: &str) -> String {
        format!("{}{}", CACHE_KEY_PREFIX, uri)
    }

    pub async fn get_response(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    pub async fn store_response(
        &self,
        key: &str,
        body: &str,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        if ttl.is_zero() {
            return Ok(());
        }

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex::<_, _, ()>(key, body, ttl.as_secs()).await?;
        Ok(())
    }

    async fn purge_pattern(&self, pattern: &str) -> Result<(), CacheError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let mut cursor: u64 = 0;

        for round in 1.. {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH_SIZE)
                .query_async(&mut conn)
                .await?;

            if !keys.is_empty() {
                let purged = keys.len();
                conn.del::<_, ()>(keys).await?;
                tracing::info!("Invalidated {} product cache keys", purged);
            }

            cursor = next;
            if cursor == 0 {
                break;
            }
            if round >= MAX_SCAN_ROUNDS {
                tracing::warn!(
                    "cache scan for {:?} still unfinished after {} rounds",
                    pattern,
                    round
                );
                break;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl ListingCacheInvalidator for CacheService {
    async fn invalidate_product_listing(&self) {
        if let Err(err) = self.purge_pattern(PRODUCT_LISTING_PATTERN).await {
            tracing::error!("Cache invalidation error: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_key_includes_the_query_string() {
        let key = CacheService::response_key("/api/v1/products?page=2&limit=10");
        assert_eq!(key, "cache:/api/v1/products?page=2&limit=10");
    }

    #[test]
    fn listing_keys_fall_under_the_purge_pattern() {
        let prefix = PRODUCT_LISTING_PATTERN.trim_end_matches('*');
        assert!(CacheService::response_key("/api/v1/products").starts_with(prefix));
        assert!(CacheService::response_key("/api/v1/products?category=Fruits").starts_with(prefix));
    }
}
