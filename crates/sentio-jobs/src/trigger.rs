//! Workflow trigger adapters.

use crate::worker::DocumentProcessor;
use async_trait::async_trait;
use sentio_core::ids::JobId;
use sentio_core::ports::WorkflowTrigger;
use sentio_core::{Error, Result};
use std::sync::Arc;
use tracing::{error, info};

/// Starts executions by POSTing the payload to a workflow engine.
pub struct HttpWorkflowTrigger {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpWorkflowTrigger {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl WorkflowTrigger for HttpWorkflowTrigger {
    async fn start(&self, execution_name: &str, input: serde_json::Value) -> Result<()> {
        let body = serde_json::json!({
            "execution_name": execution_name,
            "input": input,
        });
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::WorkflowTrigger(format!(
                "workflow engine returned {}",
                response.status()
            )));
        }
        info!(execution_name, "started workflow execution");
        Ok(())
    }
}

/// Runs the processing pipeline in-process.
///
/// Local-development stand-in for the external workflow engine: spawns the
/// document worker on the runtime and returns immediately, preserving the
/// fire-and-forget contract.
pub struct LocalWorkflowTrigger {
    processor: Arc<DocumentProcessor>,
}

impl LocalWorkflowTrigger {
    pub fn new(processor: Arc<DocumentProcessor>) -> Self {
        Self { processor }
    }
}

#[async_trait]
impl WorkflowTrigger for LocalWorkflowTrigger {
    async fn start(&self, execution_name: &str, input: serde_json::Value) -> Result<()> {
        let job_id: JobId = input
            .get("job_id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::WorkflowTrigger("input is missing job_id".to_string()))?
            .parse()
            .map_err(|_| Error::WorkflowTrigger("input job_id is malformed".to_string()))?;

        let processor = self.processor.clone();
        let execution_name = execution_name.to_string();
        tokio::spawn(async move {
            if let Err(e) = processor.process(job_id).await {
                // The worker has already marked the job FAILED; the error is
                // re-raised for the engine's retry policy, which does not
                // exist locally.
                error!(execution_name, job_id = %job_id, error = %e, "local workflow execution failed");
            }
        });
        Ok(())
    }
}
