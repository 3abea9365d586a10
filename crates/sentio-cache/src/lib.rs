//! Analysis result cache for Sentio.
//!
//! Maps normalized input text to previously computed analysis results with
//! logical time-based expiry. The cache is an optimization, never a
//! correctness dependency: every operation fails open so a broken backend
//! degrades to a miss, not an error.

pub mod cache;
pub mod keys;
pub mod store;

pub use cache::ResultCache;
pub use keys::{fingerprint, normalize};
pub use store::MemoryCacheStore;
