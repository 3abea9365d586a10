//! Cache entry types shared between the cache service and its backends.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default freshness window: 24 hours.
pub const CACHE_TTL_DEFAULT_SECS: i64 = 86_400;
/// Short-lived entries: 1 hour.
pub const CACHE_TTL_SHORT_SECS: i64 = 3_600;
/// Long-lived entries: 7 days.
pub const CACHE_TTL_LONG_SECS: i64 = 604_800;

/// A cached analysis result keyed by text fingerprint.
///
/// Entries are never mutated once written. An entry is logically absent once
/// `now > expires_at`, even if the backend has not yet purged the record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheEntry {
    pub key: String,
    pub result: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(key: String, result: serde_json::Value, ttl_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            key,
            result,
            created_at: now,
            expires_at: now + chrono::Duration::seconds(ttl_secs),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Best-effort cache statistics.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheStats {
    pub total_entries: u64,
    pub store_name: String,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_expiry_boundary() {
        let entry = CacheEntry::new("k".to_string(), serde_json::json!({}), 60);
        assert!(!entry.is_expired(entry.created_at));
        assert!(!entry.is_expired(entry.expires_at));
        assert!(entry.is_expired(entry.expires_at + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let entry = CacheEntry::new("k".to_string(), serde_json::json!({}), 0);
        assert!(entry.is_expired(Utc::now() + chrono::Duration::seconds(1)));
    }
}
