//! The result cache service: lookup, store, invalidate, clear, stats.

use crate::keys::fingerprint;
use chrono::Utc;
use sentio_core::cache::{CacheEntry, CacheStats, CACHE_TTL_DEFAULT_SECS};
use sentio_core::ports::CacheStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fingerprint-keyed result cache over a pluggable key-value backend.
///
/// Every operation fails open: a broken backend degrades to a miss on read
/// and a no-op on write, and never fails the primary request.
pub struct ResultCache {
    store: Arc<dyn CacheStore>,
    default_ttl_secs: i64,
}

impl ResultCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            default_ttl_secs: CACHE_TTL_DEFAULT_SECS,
        }
    }

    pub fn with_ttl(store: Arc<dyn CacheStore>, default_ttl_secs: i64) -> Self {
        Self {
            store,
            default_ttl_secs,
        }
    }

    /// Look up a previously computed result for this text.
    ///
    /// Expired entries are treated identically to absent ones; the stored
    /// expiry instant is always re-checked here because the backend's own
    /// sweep may lag.
    pub async fn lookup(&self, text: &str) -> Option<serde_json::Value> {
        let key = fingerprint(text);
        match self.store.get(&key).await {
            Ok(Some(entry)) => {
                if entry.is_expired(Utc::now()) {
                    debug!(cache_key = %key, "cache entry expired");
                    return None;
                }
                debug!(cache_key = %key, "cache hit");
                Some(entry.result)
            }
            Ok(None) => {
                debug!(cache_key = %key, "cache miss");
                None
            }
            Err(e) => {
                warn!(cache_key = %key, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Store a result with the default TTL. Last-writer-wins.
    pub async fn store(&self, text: &str, result: serde_json::Value) -> bool {
        self.store_with_ttl(text, result, self.default_ttl_secs).await
    }

    /// Store a result with an explicit TTL in seconds.
    pub async fn store_with_ttl(
        &self,
        text: &str,
        result: serde_json::Value,
        ttl_secs: i64,
    ) -> bool {
        let key = fingerprint(text);
        let entry = CacheEntry::new(key.clone(), result, ttl_secs);
        match self.store.put(entry).await {
            Ok(()) => {
                debug!(cache_key = %key, ttl_secs, "stored result in cache");
                true
            }
            Err(e) => {
                warn!(cache_key = %key, error = %e, "cache store failed");
                false
            }
        }
    }

    /// Remove the entry for this text. Absence is not an error.
    pub async fn invalidate(&self, text: &str) -> bool {
        let key = fingerprint(text);
        match self.store.delete(&key).await {
            Ok(()) => true,
            Err(e) => {
                warn!(cache_key = %key, error = %e, "cache invalidate failed");
                false
            }
        }
    }

    /// Remove all entries. Full scan plus per-key delete; maintenance path,
    /// not a hot path.
    pub async fn clear(&self) -> bool {
        let keys = match self.store.scan_keys().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "cache clear failed during scan");
                return false;
            }
        };
        let total = keys.len();
        for key in keys {
            if let Err(e) = self.store.delete(&key).await {
                warn!(cache_key = %key, error = %e, "cache clear failed during delete");
                return false;
            }
        }
        info!(cleared = total, "cleared cache");
        true
    }

    /// Best-effort entry count, not transactionally exact.
    pub async fn stats(&self) -> CacheStats {
        let total_entries = self.store.count().await.unwrap_or_else(|e| {
            warn!(error = %e, "cache stats failed");
            0
        });
        CacheStats {
            total_entries,
            store_name: self.store.name().to_string(),
            last_updated: Utc::now(),
        }
    }

    /// Probe the backend for the health endpoint.
    pub async fn health_check(&self) -> sentio_core::Result<()> {
        self.store.health_check().await
    }
}
