//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the core domain and external
//! adapters. Every external collaborator the request paths touch — the job
//! store, the document store, the workflow engine, the cache backend, and
//! the managed NLP capability — is reached through one of these traits so
//! adapters can be swapped and substituted in tests.

use crate::analysis::{PiiOutcome, SentimentOutcome};
use crate::cache::CacheEntry;
use crate::ids::JobId;
use crate::job::{Job, JobUpdate};
use crate::Result;
use async_trait::async_trait;

/// Repository for async job records.
///
/// Backed by a key-value store with per-key atomicity; each job id is
/// written by the admission path once and by the worker callback once.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Persist a new job record.
    async fn create(&self, job: &Job) -> Result<()>;

    /// Fetch a job by id.
    async fn get(&self, id: JobId) -> Result<Option<Job>>;

    /// Apply a partial status update to an existing job.
    async fn update_status(&self, id: JobId, update: &JobUpdate) -> Result<()>;

    /// Check if the backing store is reachable.
    async fn health_check(&self) -> Result<()>;
}

/// Object store holding the raw input text for async jobs.
///
/// Written once at admission, read once by the downstream worker. No
/// versioning or conditional-write semantics required.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(&self, id: JobId, text: &str) -> Result<()>;

    async fn get(&self, id: JobId) -> Result<Option<String>>;
}

/// Starts the external multi-step processing pipeline for a job.
///
/// Fire-and-forget: the core never polls the execution. Progress is learned
/// exclusively through the worker's callback into `JobRepository`.
#[async_trait]
pub trait WorkflowTrigger: Send + Sync {
    async fn start(&self, execution_name: &str, input: serde_json::Value) -> Result<()>;
}

/// Key-value backend for the result cache.
///
/// Logical expiry is always re-checked at read time by the cache service;
/// any native TTL sweep the backend offers is a hint, not a dependency.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>>;

    async fn put(&self, entry: CacheEntry) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// All stored keys. Used only by clear, not the hot path.
    async fn scan_keys(&self) -> Result<Vec<String>>;

    /// Approximate count of stored entries.
    async fn count(&self) -> Result<u64>;

    /// Check if the backing store is reachable.
    async fn health_check(&self) -> Result<()>;

    /// Human-readable backend name for stats output.
    fn name(&self) -> &str;
}

/// The external sentiment capability.
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str, language_code: &str) -> Result<SentimentOutcome>;
}

/// The external PII-detection capability.
#[async_trait]
pub trait PiiDetector: Send + Sync {
    async fn detect(&self, text: &str, language_code: &str) -> Result<PiiOutcome>;
}
