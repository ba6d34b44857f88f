use super::{Document, DocumentStore, Filter};
use crate::RecordResult;
use async_trait::async_trait;
use burrow_uuid::RecordId;
use indexmap::IndexMap;
use tokio::sync::RwLock;

/// Process-local store keeping documents in insertion order.
pub struct MemoryStore<D> {
    documents: RwLock<IndexMap<RecordId, D>>,
}

impl<D> MemoryStore<D> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(IndexMap::new()),
        }
    }
}

impl<D> Default for MemoryStore<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<D: Document> DocumentStore<D> for MemoryStore<D> {
    async fn find(&self, filter: &Filter<D>) -> RecordResult<Vec<D>> {
        let documents = self.documents.read().await;
        Ok(documents
            .values()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> RecordResult<Option<D>> {
        let Ok(id) = RecordId::parse(id) else {
            return Ok(None);
        };
        Ok(self.documents.read().await.get(&id).cloned())
    }

    async fn save(&self, mut document: D) -> RecordResult<D> {
        let id = document.assign_ids();
        tracing::debug!("memory store: saving {}/{}", D::COLLECTION, id);
        self.documents.write().await.insert(id, document.clone());
        Ok(document)
    }

    async fn delete_by_id(&self, id: &str) -> RecordResult<Option<D>> {
        let Ok(id) = RecordId::parse(id) else {
            return Ok(None);
        };
        Ok(self.documents.write().await.shift_remove(&id))
    }

    async fn delete_all(&self, filter: &Filter<D>) -> RecordResult<u64> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|_, d| !filter.matches(d));
        Ok((before - documents.len()) as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
