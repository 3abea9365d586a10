//! Downstream document worker.
//!
//! Reads the stored document for a job, calls the external analysis
//! capability, and writes the terminal state back into the job store. The
//! out-of-process deployment invokes this from the workflow engine; the
//! local trigger spawns it in-process.

use chrono::Utc;
use sentio_core::analysis::AnalysisResult;
use sentio_core::ids::JobId;
use sentio_core::job::{JobError, JobUpdate};
use sentio_core::ports::{DocumentStore, JobRepository, PiiDetector, SentimentAnalyzer};
use sentio_core::{Error, Result};
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct DocumentProcessor {
    jobs: Arc<dyn JobRepository>,
    documents: Arc<dyn DocumentStore>,
    analyzer: Arc<dyn SentimentAnalyzer>,
    pii: Arc<dyn PiiDetector>,
}

fn error_type(error: &Error) -> &'static str {
    match error {
        Error::Validation(_) | Error::UnsupportedLanguage(_) => "ValidationError",
        Error::JobNotFound(_) => "NotFound",
        Error::Dependency { .. } | Error::Network(_) | Error::WorkflowTrigger(_) => {
            "DependencyFailure"
        }
        Error::Database(_) | Error::Storage(_) => "StorageError",
        _ => "InternalError",
    }
}

impl DocumentProcessor {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        documents: Arc<dyn DocumentStore>,
        analyzer: Arc<dyn SentimentAnalyzer>,
        pii: Arc<dyn PiiDetector>,
    ) -> Self {
        Self {
            jobs,
            documents,
            analyzer,
            pii,
        }
    }

    /// Process one job to a terminal state.
    ///
    /// On success the job transitions to COMPLETED with the result; on any
    /// failure it is marked FAILED with a structured error and the original
    /// error is propagated so the invoking workflow engine can apply its own
    /// retry policy.
    pub async fn process(&self, job_id: JobId) -> Result<AnalysisResult> {
        match self.run(job_id).await {
            Ok(result) => {
                self.jobs
                    .update_status(job_id, &JobUpdate::completed(result.clone()))
                    .await?;
                info!(job_id = %job_id, sentiment = ?result.sentiment, "job completed");
                Ok(result)
            }
            Err(e) => {
                error!(job_id = %job_id, error = %e, "job processing failed");
                let job_error = JobError::new(e.to_string(), error_type(&e));
                if let Err(update_err) = self
                    .jobs
                    .update_status(job_id, &JobUpdate::failed(job_error))
                    .await
                {
                    error!(job_id = %job_id, error = %update_err, "failed to mark job FAILED");
                }
                Err(e)
            }
        }
    }

    async fn run(&self, job_id: JobId) -> Result<AnalysisResult> {
        let started = Utc::now();
        let job = self
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| Error::JobNotFound(job_id.to_string()))?;

        let text = self
            .documents
            .get(job_id)
            .await?
            .ok_or_else(|| Error::Internal(format!("document not found for job {}", job_id)))?;

        let language_code = job.options.language_code.as_deref().unwrap_or("en");
        let outcome = self.analyzer.analyze(&text, language_code).await?;
        let mut result = AnalysisResult::from_outcome(&outcome);

        if job.options.include_confidence {
            result.confidence = Some(result.score);
        }
        if job.options.include_pii_detection {
            match self.pii.detect(&text, language_code).await {
                Ok(pii) => result.pii_detected = Some(pii.pii_detected()),
                Err(e) => {
                    // PII detection is best-effort on this path; the
                    // sentiment result still stands.
                    warn!(job_id = %job_id, error = %e, "PII detection failed");
                }
            }
        }
        result.processing_time_ms =
            Some((Utc::now() - started).num_milliseconds().max(0) as u64);
        Ok(result)
    }
}
