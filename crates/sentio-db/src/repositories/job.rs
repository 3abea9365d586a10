//! PostgreSQL implementation of JobRepository.

use async_trait::async_trait;
use chrono::Utc;
use sentio_core::ids::JobId;
use sentio_core::job::{Job, JobOptions, JobStatus, JobUpdate};
use sentio_core::ports::JobRepository;
use sentio_core::{Error, Result};
use sqlx::{PgPool, Row};

/// PostgreSQL implementation of JobRepository.
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    /// Create a new PgJobRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn status_to_str(status: JobStatus) -> &'static str {
        match status {
            JobStatus::Processing => "PROCESSING",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Failed => "FAILED",
        }
    }

    fn str_to_status(s: &str) -> JobStatus {
        match s {
            "COMPLETED" => JobStatus::Completed,
            "FAILED" => JobStatus::Failed,
            _ => JobStatus::Processing,
        }
    }

    fn row_to_job(&self, r: &sqlx::postgres::PgRow) -> Result<Job> {
        let status_str: String = r.get("status");
        let options: JobOptions = serde_json::from_value(r.get("options"))
            .map_err(|e| Error::Serialization(e.to_string()))?;
        let result = r
            .get::<Option<serde_json::Value>, _>("result")
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| Error::Serialization(e.to_string()))?;
        let error = r
            .get::<Option<serde_json::Value>, _>("error")
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| Error::Serialization(e.to_string()))?;

        Ok(Job {
            id: JobId::from_uuid(r.get::<uuid::Uuid, _>("id")),
            status: Self::str_to_status(&status_str),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
            completed_at: r.get("completed_at"),
            source_id: r.get("source_id"),
            text_length: r.get::<i64, _>("text_length") as u64,
            options,
            request_id: r.get("request_id"),
            result,
            error,
        })
    }

    /// Build the partial UPDATE statement for a status transition.
    ///
    /// Mirrors the conditional update semantics: status and updated_at are
    /// always set; result and error only when provided; completed_at is
    /// stamped on entry into a terminal state and kept thereafter. The WHERE
    /// clause only matches non-terminal rows, making terminal states
    /// absorbing at the database level.
    fn build_update_sql(has_result: bool, has_error: bool) -> String {
        let mut sql = String::from(
            "UPDATE jobs SET status = $2, updated_at = $3, \
             completed_at = COALESCE(completed_at, CASE WHEN $2 IN ('COMPLETED', 'FAILED') THEN $3 END)",
        );
        let mut idx = 4;
        if has_result {
            sql.push_str(&format!(", result = ${}", idx));
            idx += 1;
        }
        if has_error {
            sql.push_str(&format!(", error = ${}", idx));
        }
        sql.push_str(" WHERE id = $1 AND status NOT IN ('COMPLETED', 'FAILED')");
        sql
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn create(&self, job: &Job) -> Result<()> {
        let options = serde_json::to_value(&job.options)
            .map_err(|e| Error::Serialization(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO jobs (id, status, created_at, updated_at, completed_at, source_id, text_length, options, request_id, result, error)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NULL, NULL)"#,
        )
        .bind(job.id.as_uuid())
        .bind(Self::status_to_str(job.status))
        .bind(job.created_at)
        .bind(job.updated_at)
        .bind(job.completed_at)
        .bind(&job.source_id)
        .bind(job.text_length as i64)
        .bind(&options)
        .bind(&job.request_id)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, id: JobId) -> Result<Option<Job>> {
        let row = sqlx::query(
            "SELECT id, status, created_at, updated_at, completed_at, source_id, text_length, options, request_id, result, error FROM jobs WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(self.row_to_job(&r)?)),
            None => Ok(None),
        }
    }

    async fn update_status(&self, id: JobId, update: &JobUpdate) -> Result<()> {
        let result_json = update
            .result
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| Error::Serialization(e.to_string()))?;
        let error_json = update
            .error
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let sql = Self::build_update_sql(result_json.is_some(), error_json.is_some());
        let mut query = sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(Self::status_to_str(update.status))
            .bind(Utc::now());
        if let Some(value) = &result_json {
            query = query.bind(value);
        }
        if let Some(value) = &error_json {
            query = query.bind(value);
        }

        let outcome = query
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;
        if outcome.rows_affected() == 0 {
            // The guarded WHERE clause matches neither absent nor terminal
            // rows; read the row back to tell the two apart.
            return match self.get(id).await? {
                Some(_) => Err(Error::JobAlreadyTerminal(id.to_string())),
                None => Err(Error::JobNotFound(id.to_string())),
            };
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }
}
