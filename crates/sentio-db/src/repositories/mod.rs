//! Repository implementations.

pub mod cache;
pub mod job;

pub use cache::PgCacheStore;
pub use job::PgJobRepository;
