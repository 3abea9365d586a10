//! Document store adapters for Sentio.
//!
//! The raw input text of an async job is written once at admission and read
//! once by the downstream worker, keyed by job id.

pub mod filesystem;
pub mod memory;
pub mod s3;

pub use filesystem::FilesystemDocumentStore;
pub use memory::MemoryDocumentStore;
pub use s3::S3DocumentStore;

use sentio_core::ids::JobId;

/// Object key layout shared by all backends.
pub(crate) fn document_key(id: JobId) -> String {
    format!("documents/{}.txt", id)
}
