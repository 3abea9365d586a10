//! Application state shared across handlers.
//!
//! Every external collaborator is an explicitly constructed handle injected
//! here; handlers never reach for globals.

use sentio_cache::ResultCache;
use sentio_core::ports::{PiiDetector, SentimentAnalyzer};
use sentio_jobs::JobService;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ResultCache>,
    pub jobs: Arc<JobService>,
    pub analyzer: Arc<dyn SentimentAnalyzer>,
    pub pii: Arc<dyn PiiDetector>,
}

impl AppState {
    pub fn new(
        cache: Arc<ResultCache>,
        jobs: Arc<JobService>,
        analyzer: Arc<dyn SentimentAnalyzer>,
        pii: Arc<dyn PiiDetector>,
    ) -> Self {
        Self {
            cache,
            jobs,
            analyzer,
            pii,
        }
    }
}
