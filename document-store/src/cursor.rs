use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// Opaque resume-after-this-record token for forward-only pagination.
///
/// Carries the sort value and identifier of the last document a page returned;
/// the identifier breaks ties when the sort field has duplicate values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageCursor {
    /// Value of the sort field on the last returned document
    pub sort_value: Value,
    /// Identifier of the last returned document
    pub doc_id: String,
}

impl PageCursor {
    pub fn new(sort_value: Value, doc_id: impl Into<String>) -> Self {
        Self {
            sort_value,
            doc_id: doc_id.into(),
        }
    }

    /// Encode as an opaque transport token.
    pub fn encode(&self) -> StoreResult<String> {
        let json = serde_json::to_vec(self)?;
        Ok(BASE64.encode(json))
    }

    /// Decode a token previously produced by [`PageCursor::encode`].
    pub fn decode(token: &str) -> StoreResult<Self> {
        let bytes = BASE64
            .decode(token)
            .map_err(|e| StoreError::InvalidCursor(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::InvalidCursor(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_survives_transport() {
        let cursor = PageCursor::new(json!("2026-08-25T10:00:00Z"), "doc-42");
        let token = cursor.encode().unwrap();
        assert_eq!(PageCursor::decode(&token).unwrap(), cursor);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let err = PageCursor::decode("not a cursor").unwrap_err();
        assert!(matches!(err, StoreError::InvalidCursor(_)));
    }

    #[test]
    fn valid_base64_with_wrong_shape_is_rejected() {
        let token = BASE64.encode(b"{\"foo\": 1}");
        let err = PageCursor::decode(&token).unwrap_err();
        assert!(matches!(err, StoreError::InvalidCursor(_)));
    }
}
