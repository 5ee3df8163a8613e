//! Activity feed appends
//!
//! Selected creations also append an entry to the `activityLogs`
//! collection. The append is fire-and-forget: a failed write is logged
//! and swallowed, never failing or rolling back the primary operation.

use crate::models::{ActivityType, AdmissionType};
use crate::record::iso_timestamp;
use crate::resource::Resource;
use document_store::StoreClient;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Draft activity entry; the recorder stamps the timestamp
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub title: String,
    pub description: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_id: Option<String>,
}

impl NewActivity {
    /// Entry appended when a patient is registered
    pub fn patient_registered(
        name: &str,
        user_id: impl Into<String>,
        patient_id: impl Into<String>,
    ) -> Self {
        Self {
            activity_type: ActivityType::PatientRegistered,
            title: "New Patient Registered".to_string(),
            description: format!("Patient {name} was registered"),
            user_id: user_id.into(),
            related_id: Some(patient_id.into()),
        }
    }

    /// Entry appended when a patient is admitted
    pub fn patient_admitted(
        admission_type: AdmissionType,
        user_id: impl Into<String>,
        admission_id: impl Into<String>,
    ) -> Self {
        Self {
            activity_type: ActivityType::PatientAdmitted,
            title: "Patient Admitted".to_string(),
            description: format!("Patient was admitted as {admission_type}"),
            user_id: user_id.into(),
            related_id: Some(admission_id.into()),
        }
    }

    /// Entry appended when a treatment log lands
    pub fn treatment_updated(
        title: Option<&str>,
        user_id: impl Into<String>,
        log_id: impl Into<String>,
    ) -> Self {
        Self {
            activity_type: ActivityType::TreatmentUpdated,
            title: "Treatment Updated".to_string(),
            description: title
                .map(str::to_string)
                .unwrap_or_else(|| "A treatment log was updated".to_string()),
            user_id: user_id.into(),
            related_id: Some(log_id.into()),
        }
    }
}

/// Appends activity entries after selected creations
#[derive(Clone)]
pub struct ActivityRecorder {
    store: StoreClient,
}

impl ActivityRecorder {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Appends the entry; failures are logged and swallowed
    pub async fn record(&self, entry: NewActivity) {
        let kind = activity_type_label(entry.activity_type);
        match self.append(entry).await {
            Ok(id) => debug!(kind, id = %id, "Activity recorded"),
            Err(err) => warn!("Activity log append failed: {err}"),
        }
    }

    async fn append(&self, entry: NewActivity) -> Result<String, document_store::StoreError> {
        let mut fields = match serde_json::to_value(&entry)? {
            Value::Object(map) => map,
            other => Map::from_iter([("entry".to_string(), other)]),
        };
        fields.insert("timestamp".to_string(), Value::String(iso_timestamp()));
        let doc = self
            .store
            .insert(Resource::ActivityLogs.collection_name(), fields)
            .await?;
        Ok(doc.id)
    }
}

fn activity_type_label(activity_type: ActivityType) -> &'static str {
    match activity_type {
        ActivityType::PatientRegistered => "patient_registered",
        ActivityType::PatientAdmitted => "patient_admitted",
        ActivityType::TreatmentUpdated => "treatment_updated",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use document_store::{Document, QuerySpec, StoreBackend, StoreError, StoreResult};
    use std::sync::Arc;

    #[tokio::test]
    async fn recorded_entry_lands_in_activity_collection() {
        let store = StoreClient::in_memory();
        let recorder = ActivityRecorder::new(store.clone());

        recorder
            .record(NewActivity::patient_registered("Raj Patel", "u1", "p1"))
            .await;

        let docs = store
            .run_query(&QuerySpec::new("activityLogs"))
            .await
            .expect("query");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].field("type"), Some(&serde_json::json!("patient_registered")));
        assert_eq!(docs[0].field("title"), Some(&serde_json::json!("New Patient Registered")));
        assert_eq!(
            docs[0].field("description"),
            Some(&serde_json::json!("Patient Raj Patel was registered"))
        );
        assert_eq!(docs[0].field("relatedId"), Some(&serde_json::json!("p1")));
        assert!(docs[0].field("timestamp").is_some());
    }

    #[tokio::test]
    async fn admission_entry_names_the_admission_type() {
        let store = StoreClient::in_memory();
        let recorder = ActivityRecorder::new(store.clone());

        recorder
            .record(NewActivity::patient_admitted(AdmissionType::Ipd, "u2", "adm-1"))
            .await;

        let docs = store
            .run_query(&QuerySpec::new("activityLogs"))
            .await
            .expect("query");
        assert_eq!(
            docs[0].field("description"),
            Some(&serde_json::json!("Patient was admitted as IPD"))
        );
    }

    #[tokio::test]
    async fn treatment_entry_falls_back_when_untitled() {
        let entry = NewActivity::treatment_updated(None, "u1", "t1");
        assert_eq!(entry.description, "A treatment log was updated");

        let titled = NewActivity::treatment_updated(Some("Post-op review"), "u1", "t2");
        assert_eq!(titled.description, "Post-op review");
    }

    struct DownBackend;

    #[async_trait]
    impl StoreBackend for DownBackend {
        async fn run_query(&self, _spec: &QuerySpec) -> StoreResult<Vec<Document>> {
            Err(StoreError::Unavailable("down".into()))
        }

        async fn count(&self, _spec: &QuerySpec) -> StoreResult<u64> {
            Err(StoreError::Unavailable("down".into()))
        }

        async fn insert(
            &self,
            _collection: &str,
            _fields: serde_json::Map<String, serde_json::Value>,
        ) -> StoreResult<Document> {
            Err(StoreError::Unavailable("down".into()))
        }

        async fn get(&self, _collection: &str, _id: &str) -> StoreResult<Document> {
            Err(StoreError::Unavailable("down".into()))
        }

        async fn update_merge(
            &self,
            _collection: &str,
            _id: &str,
            _patch: serde_json::Map<String, serde_json::Value>,
        ) -> StoreResult<Document> {
            Err(StoreError::Unavailable("down".into()))
        }

        async fn health_check(&self) -> StoreResult<()> {
            Err(StoreError::Unavailable("down".into()))
        }
    }

    #[tokio::test]
    async fn failed_append_is_swallowed() {
        let store = StoreClient::new(Arc::new(DownBackend));
        let recorder = ActivityRecorder::new(store);

        // Must return normally even though every write fails.
        recorder
            .record(NewActivity::patient_registered("Raj Patel", "u1", "p1"))
            .await;
    }
}
