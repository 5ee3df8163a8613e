use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::backend::StoreBackend;
use crate::document::Document;
use crate::error::StoreResult;
use crate::memory::MemoryBackend;
use crate::query::QuerySpec;

/// Shared handle to a document store backend.
///
/// Constructed once at process start and passed by reference into the layers
/// that need it; there is no ambient global client.
#[derive(Clone)]
pub struct StoreClient {
    backend: Arc<dyn StoreBackend>,
}

impl StoreClient {
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Client over a fresh in-memory backend, for development and tests.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Get the underlying backend.
    pub fn backend(&self) -> &Arc<dyn StoreBackend> {
        &self.backend
    }

    /// Execute a query and return matching documents in sort order.
    pub async fn run_query(&self, spec: &QuerySpec) -> StoreResult<Vec<Document>> {
        debug!(
            collection = %spec.collection,
            filters = spec.filters.len(),
            limit = ?spec.limit,
            "Running store query"
        );
        self.backend.run_query(spec).await
    }

    /// Count documents matching the query's filters.
    pub async fn count(&self, spec: &QuerySpec) -> StoreResult<u64> {
        self.backend.count(spec).await
    }

    /// Insert a new document, assigning its identifier.
    pub async fn insert(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<Document> {
        let document = self.backend.insert(collection, fields).await?;
        debug!(collection = %collection, id = %document.id, "Inserted document");
        Ok(document)
    }

    /// Fetch a document by identifier.
    pub async fn get(&self, collection: &str, id: &str) -> StoreResult<Document> {
        self.backend.get(collection, id).await
    }

    /// Merge a partial field map into an existing document.
    pub async fn update_merge(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> StoreResult<Document> {
        let document = self.backend.update_merge(collection, id, patch).await?;
        debug!(collection = %collection, id = %id, "Merged document update");
        Ok(document)
    }

    /// Check if the store is reachable.
    pub async fn is_healthy(&self) -> bool {
        match self.backend.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Store health check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn in_memory_client_is_healthy() {
        let client = StoreClient::in_memory();
        assert!(client.is_healthy().await);
    }

    #[tokio::test]
    async fn client_forwards_to_backend() {
        let client = StoreClient::in_memory();

        let mut fields = Map::new();
        fields.insert("name".to_string(), json!("Asha"));
        let created = client.insert("patients", fields).await.unwrap();

        let fetched = client.get("patients", &created.id).await.unwrap();
        assert_eq!(fetched.field("name"), Some(&json!("Asha")));

        let count = client.count(&QuerySpec::new("patients")).await.unwrap();
        assert_eq!(count, 1);
    }
}
