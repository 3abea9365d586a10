//! Filesystem-based document store for local development.

use async_trait::async_trait;
use sentio_core::ids::JobId;
use sentio_core::ports::DocumentStore;
use sentio_core::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

pub struct FilesystemDocumentStore {
    root_dir: PathBuf,
}

impl FilesystemDocumentStore {
    pub fn new(root_dir: PathBuf) -> Self {
        Self { root_dir }
    }

    fn document_path(&self, id: JobId) -> PathBuf {
        self.root_dir.join(crate::document_key(id))
    }
}

#[async_trait]
impl DocumentStore for FilesystemDocumentStore {
    async fn put(&self, id: JobId, text: &str) -> Result<()> {
        let path = self.document_path(id);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Storage(format!("failed to create document dir: {}", e)))?;
        }
        tokio::fs::write(&path, text.as_bytes())
            .await
            .map_err(|e| Error::Storage(format!("failed to write document: {}", e)))?;
        debug!(job_id = %id, path = %path.display(), "stored document");
        Ok(())
    }

    async fn get(&self, id: JobId) -> Result<Option<String>> {
        let path = self.document_path(id);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(format!("failed to read document: {}", e))),
        }
    }
}

impl Default for FilesystemDocumentStore {
    fn default() -> Self {
        Self::new(PathBuf::from("/var/sentio/documents"))
    }
}
