//! Job records and the async lifecycle state machine.

use crate::analysis::AnalysisResult;
use crate::ids::JobId;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Terminal states are absorbing: no transition leads out of them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Structured failure information attached to a FAILED job.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JobError {
    pub message: String,
    pub error_type: String,
    pub failed_at: DateTime<Utc>,
}

impl JobError {
    pub fn new(message: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: error_type.into(),
            failed_at: Utc::now(),
        }
    }
}

/// Admission-time analysis options, immutable after submit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JobOptions {
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default = "default_true")]
    pub include_confidence: bool,
    #[serde(default = "default_true")]
    pub include_pii_detection: bool,
}

fn default_true() -> bool {
    true
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            language_code: None,
            include_confidence: true,
            include_pii_detection: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub source_id: Option<String>,
    pub text_length: u64,
    pub options: JobOptions,
    pub request_id: Option<String>,
    pub result: Option<AnalysisResult>,
    pub error: Option<JobError>,
}

impl Job {
    /// Create a job in PROCESSING, the only admission-time state.
    pub fn new(
        id: JobId,
        text_length: u64,
        source_id: Option<String>,
        options: JobOptions,
        request_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: JobStatus::Processing,
            created_at: now,
            updated_at: now,
            completed_at: None,
            source_id,
            text_length,
            options,
            request_id,
            result: None,
            error: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Partial update applied by the worker callback path.
///
/// Always sets `status` and `updated_at`; sets `result` when provided and
/// `error` when provided. `completed_at` is stamped on entry into a terminal
/// state and never cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobUpdate {
    pub status: JobStatus,
    pub result: Option<AnalysisResult>,
    pub error: Option<JobError>,
}

impl JobUpdate {
    pub fn completed(result: AnalysisResult) -> Self {
        Self {
            status: JobStatus::Completed,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(error: JobError) -> Self {
        Self {
            status: JobStatus::Failed,
            result: None,
            error: Some(error),
        }
    }

    /// Apply this update to an in-memory job record.
    ///
    /// Shared by the in-memory repository and tests so both backends agree on
    /// the partial-update semantics the Postgres adapter builds in SQL.
    /// Terminal states are absorbing: an update against a COMPLETED or
    /// FAILED job leaves the record untouched.
    pub fn apply(&self, job: &mut Job, now: DateTime<Utc>) {
        if job.is_terminal() {
            return;
        }
        job.status = self.status;
        job.updated_at = now;
        if let Some(result) = &self.result {
            job.result = Some(result.clone());
        }
        if let Some(error) = &self.error {
            job.error = Some(error.clone());
        }
        if self.status.is_terminal() && job.completed_at.is_none() {
            job.completed_at = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Sentiment;
    use pretty_assertions::assert_eq;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            sentiment: Sentiment::Positive,
            score: 0.97,
            language_code: Some("en".to_string()),
            confidence: Some(0.97),
            pii_detected: Some(false),
            processing_time_ms: Some(12),
        }
    }

    #[test]
    fn test_new_job_is_processing() {
        let job = Job::new(JobId::new(), 11, None, JobOptions::default(), None);
        assert_eq!(job.status, JobStatus::Processing);
        assert!(job.completed_at.is_none());
        assert!(job.result.is_none());
        assert!(job.error.is_none());
    }

    #[test]
    fn test_complete_sets_result_and_completed_at() {
        let mut job = Job::new(JobId::new(), 11, None, JobOptions::default(), None);
        let now = Utc::now();
        JobUpdate::completed(sample_result()).apply(&mut job, now);

        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.completed_at, Some(now));
        assert!(job.result.is_some());
        assert!(job.error.is_none());
    }

    #[test]
    fn test_fail_sets_error_and_completed_at() {
        let mut job = Job::new(JobId::new(), 11, None, JobOptions::default(), None);
        let now = Utc::now();
        JobUpdate::failed(JobError::new("boom", "AnalysisError")).apply(&mut job, now);

        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.completed_at, Some(now));
        assert!(job.result.is_none());
        assert!(job.error.is_some());
    }

    #[test]
    fn test_terminal_update_is_idempotent_for_completed_at() {
        let mut job = Job::new(JobId::new(), 11, None, JobOptions::default(), None);
        let first = Utc::now();
        let update = JobUpdate::completed(sample_result());
        update.apply(&mut job, first);
        update.apply(&mut job, first + chrono::Duration::seconds(5));

        // Re-applying the same terminal update keeps the first completion time
        // and never leaves completed_at unset.
        assert_eq!(job.completed_at, Some(first));
        assert_eq!(job.status, JobStatus::Completed);
    }

    #[test]
    fn test_terminal_states_are_absorbing() {
        let mut job = Job::new(JobId::new(), 11, None, JobOptions::default(), None);
        let completed_at = Utc::now();
        JobUpdate::completed(sample_result()).apply(&mut job, completed_at);

        // A hand-built update cannot move a terminal job back to PROCESSING
        // or overwrite its outcome.
        let reversal = JobUpdate {
            status: JobStatus::Processing,
            result: None,
            error: Some(JobError::new("late failure", "InternalError")),
        };
        reversal.apply(&mut job, completed_at + chrono::Duration::seconds(5));

        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.completed_at, Some(completed_at));
        assert!(job.result.is_some());
        assert!(job.error.is_none());

        let mut failed = Job::new(JobId::new(), 11, None, JobOptions::default(), None);
        JobUpdate::failed(JobError::new("boom", "InternalError")).apply(&mut failed, completed_at);
        JobUpdate::completed(sample_result()).apply(&mut failed, completed_at);
        assert_eq!(failed.status, JobStatus::Failed);
        assert!(failed.result.is_none());
    }

    #[test]
    fn test_status_serializes_upper_case() {
        let json = serde_json::to_string(&JobStatus::Processing).unwrap();
        assert_eq!(json, "\"PROCESSING\"");
    }
}
