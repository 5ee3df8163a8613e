use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::document::Document;
use crate::error::StoreResult;
use crate::query::QuerySpec;

/// Storage interface for collection-based document access.
///
/// Implementations never retry: transport failures surface as
/// `StoreError::Unavailable`, malformed filter/sort combinations as
/// `StoreError::QueryRejected`.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Execute a query and return matching documents in sort order.
    async fn run_query(&self, spec: &QuerySpec) -> StoreResult<Vec<Document>>;

    /// Count documents matching the query's filters.
    ///
    /// Limit, offset, and cursor are ignored here.
    async fn count(&self, spec: &QuerySpec) -> StoreResult<u64>;

    /// Insert a new document, assigning its identifier.
    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> StoreResult<Document>;

    /// Fetch a document by identifier.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Document>;

    /// Merge a partial field map into an existing document.
    ///
    /// Fails with `StoreError::NotFound` when the identifier does not resolve.
    async fn update_merge(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> StoreResult<Document>;

    /// Probe connectivity to the store.
    async fn health_check(&self) -> StoreResult<()>;
}
