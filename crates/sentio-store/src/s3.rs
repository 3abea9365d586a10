//! S3-compatible document store.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use sentio_core::ids::JobId;
use sentio_core::ports::DocumentStore;
use sentio_core::{Error, Result};
use tracing::debug;

pub struct S3DocumentStore {
    client: Client,
    bucket: String,
}

impl S3DocumentStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a store from the ambient AWS environment.
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), bucket)
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn put(&self, id: JobId, text: &str) -> Result<()> {
        let key = crate::document_key(id);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type("text/plain")
            .metadata("job_id", id.to_string())
            .body(ByteStream::from(text.as_bytes().to_vec()))
            .send()
            .await
            .map_err(|e| Error::Storage(format!("failed to write document: {}", e)))?;
        debug!(job_id = %id, bucket = %self.bucket, key = %key, "stored document");
        Ok(())
    }

    async fn get(&self, id: JobId) -> Result<Option<String>> {
        let key = crate::document_key(id);
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false)
                {
                    return Ok(None);
                }
                return Err(Error::Storage(format!("failed to read document: {}", err)));
            }
        };

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| Error::Storage(format!("failed to read document body: {}", e)))?
            .into_bytes();
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::Storage(format!("document is not valid UTF-8: {}", e)))?;
        Ok(Some(text))
    }
}
