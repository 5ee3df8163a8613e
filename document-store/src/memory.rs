use std::cmp::Ordering;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};

use crate::backend::StoreBackend;
use crate::document::Document;
use crate::error::{StoreError, StoreResult};
use crate::query::{QuerySpec, SortDirection};

/// In-memory document store for testing and development.
///
/// Collections are created lazily on first insert. Query evaluation applies
/// the same ordering rules a hosted store would: documents sort by the
/// declared field with the identifier as tiebreaker, and a cursor resumes
/// strictly after its referenced document.
pub struct MemoryBackend {
    collections: DashMap<String, DashMap<String, Document>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            collections: DashMap::new(),
        }
    }

    fn matches(doc: &Document, spec: &QuerySpec) -> bool {
        for (field, expected) in &spec.filters {
            if doc.field(field) != Some(expected) {
                return false;
            }
        }
        if let Some((left, right)) = &spec.le_comparison {
            match (doc.field(left), doc.field(right)) {
                (Some(a), Some(b)) => {
                    if compare_values(a, b) == Ordering::Greater {
                        return false;
                    }
                }
                // Documents missing either field cannot satisfy the comparison
                _ => return false,
            }
        }
        true
    }

    fn sort_key(doc: &Document, spec: &QuerySpec) -> Value {
        match &spec.sort {
            Some((field, _)) => doc.field(field).cloned().unwrap_or(Value::Null),
            None => Value::Null,
        }
    }

    fn direction(spec: &QuerySpec) -> SortDirection {
        spec.sort
            .as_ref()
            .map_or(SortDirection::Ascending, |(_, dir)| *dir)
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn run_query(&self, spec: &QuerySpec) -> StoreResult<Vec<Document>> {
        let Some(collection) = self.collections.get(&spec.collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<(Value, Document)> = collection
            .iter()
            .filter(|entry| Self::matches(entry.value(), spec))
            .map(|entry| (Self::sort_key(entry.value(), spec), entry.value().clone()))
            .collect();
        drop(collection);

        let direction = Self::direction(spec);
        matched.sort_by(|(a_key, a_doc), (b_key, b_doc)| {
            ordered(a_key, &a_doc.id, b_key, &b_doc.id, direction)
        });

        let mut documents: Vec<Document> = match &spec.start_after {
            Some(cursor) => matched
                .into_iter()
                .filter(|(key, doc)| {
                    ordered(key, &doc.id, &cursor.sort_value, &cursor.doc_id, direction)
                        == Ordering::Greater
                })
                .map(|(_, doc)| doc)
                .collect(),
            None => matched.into_iter().map(|(_, doc)| doc).collect(),
        };

        if let Some(offset) = spec.offset {
            documents = documents.into_iter().skip(offset).collect();
        }
        if let Some(limit) = spec.limit {
            documents.truncate(limit);
        }

        Ok(documents)
    }

    async fn count(&self, spec: &QuerySpec) -> StoreResult<u64> {
        let Some(collection) = self.collections.get(&spec.collection) else {
            return Ok(0);
        };
        let count = collection
            .iter()
            .filter(|entry| Self::matches(entry.value(), spec))
            .count();
        Ok(count as u64)
    }

    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> StoreResult<Document> {
        let document = Document::new(fields);
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(document.id.clone(), document.clone());
        Ok(document)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Document> {
        self.collections
            .get(collection)
            .and_then(|coll| coll.get(id).map(|entry| entry.value().clone()))
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn update_merge(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> StoreResult<Document> {
        let coll = self
            .collections
            .get(collection)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        let mut entry = coll
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        entry.value_mut().merge(patch);
        Ok(entry.value().clone())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Total order over a (sort value, identifier) pair, direction applied to both
/// so cursors resume correctly on descending scans.
fn ordered(
    a_key: &Value,
    a_id: &str,
    b_key: &Value,
    b_id: &str,
    direction: SortDirection,
) -> Ordering {
    let base = compare_values(a_key, b_key).then_with(|| a_id.cmp(b_id));
    match direction {
        SortDirection::Ascending => base,
        SortDirection::Descending => base.reverse(),
    }
}

/// Compare two JSON values the way a document store orders mixed fields:
/// by type rank first, then within the type. ISO-8601 timestamps compare
/// correctly as plain strings.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
