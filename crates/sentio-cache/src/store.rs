//! In-memory cache backend for local development and tests.

use async_trait::async_trait;
use sentio_core::cache::CacheEntry;
use sentio_core::ports::CacheStore;
use sentio_core::Result;
use std::collections::HashMap;
use std::sync::RwLock;

/// HashMap-backed `CacheStore`.
///
/// Per-key atomicity comes from the lock; expired entries are NOT purged
/// here — logical expiry is the cache service's job, which keeps this
/// backend honest about the "physical record may outlive logical expiry"
/// contract.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> sentio_core::Error {
        sentio_core::Error::Internal("cache store lock poisoned".to_string())
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let entries = self.entries.read().map_err(|_| Self::lock_poisoned())?;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, entry: CacheEntry) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| Self::lock_poisoned())?;
        entries.insert(entry.key.clone(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| Self::lock_poisoned())?;
        entries.remove(key);
        Ok(())
    }

    async fn scan_keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.read().map_err(|_| Self::lock_poisoned())?;
        Ok(entries.keys().cloned().collect())
    }

    async fn count(&self) -> Result<u64> {
        let entries = self.entries.read().map_err(|_| Self::lock_poisoned())?;
        Ok(entries.len() as u64)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
