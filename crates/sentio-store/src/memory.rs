//! In-memory document store for tests and local development.

use async_trait::async_trait;
use sentio_core::ids::JobId;
use sentio_core::ports::DocumentStore;
use sentio_core::{Error, Result};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn put(&self, id: JobId, text: &str) -> Result<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| Error::Internal("document store lock poisoned".to_string()))?;
        documents.insert(crate::document_key(id), text.to_string());
        Ok(())
    }

    async fn get(&self, id: JobId) -> Result<Option<String>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| Error::Internal("document store lock poisoned".to_string()))?;
        Ok(documents.get(&crate::document_key(id)).cloned())
    }
}
