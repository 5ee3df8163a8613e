use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored document: store-assigned identifier plus schemaless JSON fields.
///
/// Serializes to the flat `{id, ...fields}` shape consumers expect, so the
/// identifier travels inside the document on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Mint a document with a freshly assigned identifier.
    ///
    /// Backends call this at insert time; callers never supply identifiers.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            fields,
        }
    }

    /// Rehydrate a document with a known identifier.
    pub fn with_id(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Look up a field value by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Merge a partial field map into this document.
    ///
    /// Only supplied fields change; all others are left untouched.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        for (key, value) in patch {
            self.fields.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn new_assigns_nonempty_identifier() {
        let doc = Document::new(fields(json!({"name": "Raj Patel"})));
        assert!(!doc.id.is_empty());

        let other = Document::new(fields(json!({"name": "Raj Patel"})));
        assert_ne!(doc.id, other.id);
    }

    #[test]
    fn merge_changes_only_supplied_fields() {
        let mut doc = Document::new(fields(json!({
            "status": "pending",
            "amount": 1200,
            "invoiceNumber": "INV-2026-4821"
        })));

        doc.merge(fields(json!({"status": "paid", "paidAt": "2026-08-25T10:00:00Z"})));

        assert_eq!(doc.field("status"), Some(&json!("paid")));
        assert_eq!(doc.field("paidAt"), Some(&json!("2026-08-25T10:00:00Z")));
        assert_eq!(doc.field("amount"), Some(&json!(1200)));
        assert_eq!(doc.field("invoiceNumber"), Some(&json!("INV-2026-4821")));
    }

    #[test]
    fn serializes_with_inline_identifier() {
        let doc = Document::with_id("p1", fields(json!({"name": "Asha"})));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value, json!({"id": "p1", "name": "Asha"}));
    }
}
