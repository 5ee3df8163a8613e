//! Record family traits
//!
//! The DAL is one generic engine; these traits are what each resource
//! plugs into it. `Record` ties a stored type to its collection,
//! `RecordDraft`/`RecordPatch` describe writes, and `ResourceFilter`
//! contributes equality constraints to list queries.

use crate::activity::NewActivity;
use crate::error::DalResult;
use crate::resource::Resource;
use chrono::{SecondsFormat, Utc};
use document_store::QuerySpec;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Server-side ISO-8601 timestamp.
///
/// Fixed millisecond precision keeps lexicographic order identical to
/// chronological order across all stored timestamps.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A stored record type bound to one collection
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    const RESOURCE: Resource;
}

/// Create payload for one record family.
///
/// Drafts never carry identifiers or timestamps; the engine assigns both.
pub trait RecordDraft: Serialize + Send + Sync {
    type Record: Record;

    /// Rejects the draft before any store round trip
    fn validate(&self) -> DalResult<()>;

    /// Server-computed fields merged over the draft before persistence
    fn derived_fields(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Timestamp fields stamped at create time
    fn timestamp_fields(&self) -> &'static [&'static str] {
        &["createdAt"]
    }

    /// Activity feed entry appended after a successful create.
    ///
    /// `None` skips the append entirely.
    fn activity_entry(&self, _created_id: &str) -> Option<NewActivity> {
        None
    }
}

/// Partial update payload; only serialized fields reach the store
pub trait RecordPatch: Serialize + Send + Sync {
    type Record: Record;

    fn validate(&self) -> DalResult<()> {
        Ok(())
    }

    /// Timestamp fields refreshed on every patch
    fn touch_fields(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Equality constraints contributed to a list query
pub trait ResourceFilter: Send + Sync {
    type Record: Record;

    /// Adds the supplied constraints; absent fields are dropped, not
    /// matched against null
    fn apply(&self, spec: QuerySpec) -> QuerySpec;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Patient;
    use chrono::DateTime;

    #[derive(Serialize)]
    struct BareDraft;

    impl RecordDraft for BareDraft {
        type Record = Patient;

        fn validate(&self) -> DalResult<()> {
            Ok(())
        }
    }

    #[test]
    fn drafts_default_to_created_at_stamp_and_no_activity() {
        let draft = BareDraft;
        assert_eq!(draft.timestamp_fields(), &["createdAt"]);
        assert!(draft.derived_fields().is_empty());
        assert!(draft.activity_entry("p1").is_none());
    }

    #[test]
    fn timestamps_are_rfc3339_with_millisecond_precision() {
        let stamp = iso_timestamp();
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
        // "2026-01-10T08:00:00.000Z" keeps exactly three subsecond digits
        let fraction = stamp
            .rsplit_once('.')
            .map(|(_, rest)| rest.trim_end_matches('Z').len());
        assert_eq!(fraction, Some(3));
    }

    #[test]
    fn timestamps_sort_lexicographically_in_time_order() {
        let earlier = "2026-01-10T08:00:00.000Z";
        let later = iso_timestamp();
        assert!(earlier < later.as_str());
    }
}
