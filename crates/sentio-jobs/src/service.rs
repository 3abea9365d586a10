//! Job admission, status projection, and the worker-facing update path.

use chrono::{DateTime, Duration, Utc};
use sentio_core::analysis::AnalysisResult;
use sentio_core::ids::JobId;
use sentio_core::job::{Job, JobError, JobOptions, JobStatus, JobUpdate};
use sentio_core::ports::{DocumentStore, JobRepository, WorkflowTrigger};
use sentio_core::validate::validate_async_text;
use sentio_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Base processing time assumed for every job: 30 seconds.
const ESTIMATE_BASE_SECS: i64 = 30;
/// Throughput heuristic: 1000 characters per second.
const ESTIMATE_CHARS_PER_SEC: i64 = 1_000;

/// An admission request for the async path.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub text: String,
    pub source_id: Option<String>,
    #[serde(default)]
    pub options: JobOptions,
    pub request_id: Option<String>,
}

/// Returned on successful admission; the 202 body is shaped from this.
#[derive(Debug, Clone, Serialize)]
pub struct AdmissionTicket {
    pub job_id: JobId,
    pub status: JobStatus,
    pub estimated_completion: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Heuristic completion estimate, not a guarantee.
pub fn estimate_completion(text_length: u64, now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::seconds(ESTIMATE_BASE_SECS + text_length as i64 / ESTIMATE_CHARS_PER_SEC)
}

/// Coordinates the three external resources behind async admission: the job
/// store, the document store, and the workflow engine.
pub struct JobService {
    jobs: Arc<dyn JobRepository>,
    documents: Arc<dyn DocumentStore>,
    workflow: Arc<dyn WorkflowTrigger>,
}

impl JobService {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        documents: Arc<dyn DocumentStore>,
        workflow: Arc<dyn WorkflowTrigger>,
    ) -> Self {
        Self {
            jobs,
            documents,
            workflow,
        }
    }

    /// Admit an async analysis request.
    ///
    /// Steps run strictly in order: job write, document write, workflow
    /// trigger. A failing step aborts the remaining ones and surfaces a
    /// dependency error; earlier side effects are deliberately left in place
    /// (no compensating rollback). Adding compensation later only needs to
    /// touch this function.
    pub async fn submit(&self, request: SubmitRequest) -> Result<AdmissionTicket> {
        // Fail fast before any external call.
        validate_async_text(&request.text)?;

        let job_id = JobId::new();
        let text_length = request.text.chars().count() as u64;
        let job = Job::new(
            job_id,
            text_length,
            request.source_id.clone(),
            request.options.clone(),
            request.request_id.clone(),
        );

        self.jobs.create(&job).await.map_err(|e| {
            error!(job_id = %job_id, error = %e, "failed to store job record");
            Error::dependency("job store", e)
        })?;

        self.documents.put(job_id, &request.text).await.map_err(|e| {
            // The job record from the previous step stays behind in
            // PROCESSING with no document. Known accepted risk.
            error!(job_id = %job_id, error = %e, "failed to store document");
            Error::dependency("document store", e)
        })?;

        let input = serde_json::json!({
            "job_id": job_id.to_string(),
            "source_id": request.source_id,
            "options": job.options,
            "request_id": request.request_id,
        });
        self.workflow
            .start(&format!("sentio-{}", job_id), input)
            .await
            .map_err(|e| {
                error!(job_id = %job_id, error = %e, "failed to start workflow");
                Error::dependency("workflow engine", e)
            })?;

        info!(job_id = %job_id, text_length, "admitted async job");
        Ok(AdmissionTicket {
            job_id,
            status: JobStatus::Processing,
            estimated_completion: estimate_completion(text_length, Utc::now()),
            created_at: job.created_at,
        })
    }

    /// Fetch a job for the status endpoint.
    pub async fn get_status(&self, id: JobId) -> Result<Job> {
        self.jobs
            .get(id)
            .await?
            .ok_or_else(|| Error::JobNotFound(id.to_string()))
    }

    /// Apply a terminal update on behalf of the worker.
    pub async fn update_status(&self, id: JobId, update: &JobUpdate) -> Result<()> {
        self.jobs.update_status(id, update).await
    }

    /// PROCESSING -> COMPLETED.
    pub async fn complete(&self, id: JobId, result: AnalysisResult) -> Result<()> {
        self.update_status(id, &JobUpdate::completed(result)).await
    }

    /// PROCESSING -> FAILED.
    pub async fn fail(&self, id: JobId, error: JobError) -> Result<()> {
        self.update_status(id, &JobUpdate::failed(error)).await
    }

    /// Probe the job store for the health endpoint.
    pub async fn health_check(&self) -> Result<()> {
        self.jobs.health_check().await
    }
}
