//! The records engine
//!
//! One generic implementation behind every resource: validated creates with
//! server-assigned identifiers and timestamps, merge-semantics updates, and
//! filtered cursor-paginated lists, decoded into typed records at the
//! boundary. Construct once at process start and pass by reference; the DAL
//! holds no hidden globals.

use crate::activity::ActivityRecorder;
use crate::error::{DalError, DalResult};
use crate::page::{Page, PageRequest};
use crate::record::{iso_timestamp, Record, RecordDraft, RecordPatch, ResourceFilter};
use crate::resource::Resource;
use document_store::{Document, PageCursor, QuerySpec, StoreClient};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Typed data access over the practice-management collections
#[derive(Clone)]
pub struct RecordsDal {
    store: StoreClient,
    activity: ActivityRecorder,
}

impl RecordsDal {
    pub fn new(store: StoreClient) -> Self {
        let activity = ActivityRecorder::new(store.clone());
        Self { store, activity }
    }

    pub fn store(&self) -> &StoreClient {
        &self.store
    }

    /// Create a record from a validated draft.
    ///
    /// The engine stamps server-side timestamps, merges derived fields over
    /// the draft, persists, then appends any activity entry fire-and-forget.
    pub async fn create<D: RecordDraft>(&self, draft: &D) -> DalResult<D::Record> {
        draft.validate()?;

        let resource = D::Record::RESOURCE;
        let mut fields = serialize_fields(draft)?;
        let stamp = iso_timestamp();
        for field in draft.timestamp_fields() {
            fields.insert((*field).to_string(), Value::String(stamp.clone()));
        }
        for (field, value) in draft.derived_fields() {
            fields.insert(field, value);
        }

        let document = self
            .store
            .insert(resource.collection_name(), fields)
            .await?;
        debug!(resource = %resource, id = %document.id, "Record created");

        if let Some(entry) = draft.activity_entry(&document.id) {
            self.activity.record(entry).await;
        }

        decode(resource, document)
    }

    /// Fetch one record by identifier
    pub async fn get<R: Record>(&self, id: &str) -> DalResult<R> {
        let resource = R::RESOURCE;
        let document = self.store.get(resource.collection_name(), id).await?;
        decode(resource, document)
    }

    /// Apply a partial update; only the patch's supplied fields change
    pub async fn update<P: RecordPatch>(&self, id: &str, patch: &P) -> DalResult<P::Record> {
        patch.validate()?;

        let resource = <P::Record as Record>::RESOURCE;
        let mut fields = serialize_fields(patch)?;
        let stamp = iso_timestamp();
        for field in patch.touch_fields() {
            fields.insert((*field).to_string(), Value::String(stamp.clone()));
        }

        let document = self
            .store
            .update_merge(resource.collection_name(), id, fields)
            .await?;
        debug!(resource = %resource, id = %id, "Record updated");
        decode(resource, document)
    }

    /// Fetch one page of records matching the filter.
    ///
    /// The page carries a cursor referencing its last record; the cursor is
    /// absent exactly when the page is empty.
    pub async fn list<F: ResourceFilter>(
        &self,
        filter: &F,
        page: &PageRequest,
    ) -> DalResult<Page<F::Record>> {
        let resource = <F::Record as Record>::RESOURCE;

        let mut spec = filter
            .apply(QuerySpec::new(resource.collection_name()))
            .limit(page.page_size());
        if let Some((field, direction)) = resource.default_sort() {
            spec = spec.order_by(field, direction);
        }
        if let Some(offset) = page.offset {
            spec = spec.offset(offset);
        }
        if let Some(token) = &page.cursor {
            spec = spec.start_after(Some(PageCursor::decode(token)?));
        }

        let documents = self.store.run_query(&spec).await?;

        let next_cursor = match documents.last() {
            Some(last) => {
                let sort_value = spec
                    .sort
                    .as_ref()
                    .and_then(|(field, _)| last.field(field).cloned())
                    .unwrap_or(Value::Null);
                Some(PageCursor::new(sort_value, last.id.clone()).encode()?)
            }
            None => None,
        };

        let items = documents
            .into_iter()
            .map(|document| decode(resource, document))
            .collect::<DalResult<Vec<_>>>()?;
        Ok(Page { items, next_cursor })
    }

    /// Count records matching the filter, ignoring pagination
    pub async fn count<F: ResourceFilter>(&self, filter: &F) -> DalResult<u64> {
        let resource = <F::Record as Record>::RESOURCE;
        let spec = filter.apply(QuerySpec::new(resource.collection_name()));
        Ok(self.store.count(&spec).await?)
    }

    /// Collect every record matching the filter by walking pages to the end
    pub async fn list_all<F: ResourceFilter>(&self, filter: &F) -> DalResult<Vec<F::Record>> {
        let mut records = Vec::new();
        let mut request = PageRequest {
            page_size: Some(PageRequest::MAX_PAGE_SIZE),
            ..PageRequest::default()
        };
        loop {
            let page = self.list(filter, &request).await?;
            if page.is_end() {
                break;
            }
            request.cursor.clone_from(&page.next_cursor);
            records.extend(page.items);
        }
        Ok(records)
    }
}

fn serialize_fields<T: Serialize>(payload: &T) -> DalResult<Map<String, Value>> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DalError::validation("Payload must be a JSON object")),
        Err(err) => Err(DalError::Query(err.to_string())),
    }
}

fn decode<R: Record>(resource: Resource, document: Document) -> DalResult<R> {
    serde_json::to_value(document)
        .and_then(serde_json::from_value)
        .map_err(|err| DalError::Query(format!("Malformed {resource} document: {err}")))
}
