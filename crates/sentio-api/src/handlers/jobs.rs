//! Async admission and job status handlers.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{DateTime, Utc};
use sentio_core::analysis::AnalysisResult;
use sentio_core::ids::JobId;
use sentio_core::job::{Job, JobError, JobOptions, JobStatus};
use sentio_jobs::SubmitRequest;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::handlers::request_id;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AsyncAnalyzeRequest {
    pub text: String,
    pub source_id: Option<String>,
    #[serde(default)]
    pub options: JobOptions,
}

#[derive(Serialize)]
pub struct AsyncJobResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub message: String,
    pub estimated_completion: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Admit an async job and return a tracking id with a 202.
pub async fn analyze_async(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<AsyncAnalyzeRequest>,
) -> Result<(StatusCode, Json<AsyncJobResponse>), ApiError> {
    let request_id = request_id(&headers);
    let ticket = state
        .jobs
        .submit(SubmitRequest {
            text: request.text,
            source_id: request.source_id,
            options: request.options,
            request_id: request_id.clone(),
        })
        .await
        .map_err(|e| ApiError::from_core(e, request_id))?;

    Ok((
        StatusCode::ACCEPTED,
        Json(AsyncJobResponse {
            job_id: ticket.job_id.to_string(),
            status: ticket.status,
            message: "Job submitted successfully".to_string(),
            estimated_completion: ticket.estimated_completion,
            created_at: ticket.created_at,
        }),
    ))
}

#[derive(Serialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JobError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl From<Job> for JobStatusResponse {
    fn from(job: Job) -> Self {
        Self {
            job_id: job.id.to_string(),
            status: job.status,
            created_at: job.created_at,
            completed_at: job.completed_at,
            result: job.result,
            error: job.error,
            source_id: job.source_id,
        }
    }
}

/// Project a stored job into a status response.
pub async fn job_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
) -> Result<Json<JobStatusResponse>, ApiError> {
    let request_id = request_id(&headers);

    // A malformed id is a validation failure, distinct from not-found.
    let id: JobId = job_id
        .parse()
        .map_err(|_| ApiError::validation("Invalid job ID format", request_id.clone()))?;

    let job = state
        .jobs
        .get_status(id)
        .await
        .map_err(|e| ApiError::from_core(e, request_id))?;
    Ok(Json(JobStatusResponse::from(job)))
}
