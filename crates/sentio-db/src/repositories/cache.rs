//! PostgreSQL implementation of the cache backend.

use async_trait::async_trait;
use sentio_core::cache::CacheEntry;
use sentio_core::ports::CacheStore;
use sentio_core::{Error, Result};
use sqlx::{PgPool, Row};

/// PostgreSQL implementation of CacheStore.
///
/// Rows are never swept here; the cache service treats expired rows as
/// absent at read time and `clear` removes them explicitly.
pub struct PgCacheStore {
    pool: PgPool,
}

impl PgCacheStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CacheStore for PgCacheStore {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let row = sqlx::query(
            "SELECT text_hash, result, created_at, expires_at FROM sentiment_cache WHERE text_hash = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.map(|r| CacheEntry {
            key: r.get("text_hash"),
            result: r.get("result"),
            created_at: r.get("created_at"),
            expires_at: r.get("expires_at"),
        }))
    }

    async fn put(&self, entry: CacheEntry) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO sentiment_cache (text_hash, result, created_at, expires_at)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT (text_hash)
               DO UPDATE SET result = $2, created_at = $3, expires_at = $4"#,
        )
        .bind(&entry.key)
        .bind(&entry.result)
        .bind(entry.created_at)
        .bind(entry.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM sentiment_cache WHERE text_hash = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    async fn scan_keys(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT text_hash FROM sentiment_cache")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.iter().map(|r| r.get("text_hash")).collect())
    }

    async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM sentiment_cache")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row.get::<i64, _>("total") as u64)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "postgres"
    }
}
