//! In-memory job repository for local development and tests.

use async_trait::async_trait;
use chrono::Utc;
use sentio_core::ids::JobId;
use sentio_core::job::{Job, JobUpdate};
use sentio_core::ports::JobRepository;
use sentio_core::{Error, Result};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryJobRepository {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl MemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> Error {
        Error::Internal("job repository lock poisoned".to_string())
    }
}

#[async_trait]
impl JobRepository for MemoryJobRepository {
    async fn create(&self, job: &Job) -> Result<()> {
        let mut jobs = self.jobs.write().map_err(|_| Self::lock_poisoned())?;
        jobs.insert(job.id, job.clone());
        Ok(())
    }

    async fn get(&self, id: JobId) -> Result<Option<Job>> {
        let jobs = self.jobs.read().map_err(|_| Self::lock_poisoned())?;
        Ok(jobs.get(&id).cloned())
    }

    async fn update_status(&self, id: JobId, update: &JobUpdate) -> Result<()> {
        let mut jobs = self.jobs.write().map_err(|_| Self::lock_poisoned())?;
        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| Error::JobNotFound(id.to_string()))?;
        if job.is_terminal() {
            return Err(Error::JobAlreadyTerminal(id.to_string()));
        }
        update.apply(job, Utc::now());
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl MemoryJobRepository {
    pub(crate) fn all_jobs(&self) -> Vec<Job> {
        self.jobs.read().unwrap().values().cloned().collect()
    }
}
