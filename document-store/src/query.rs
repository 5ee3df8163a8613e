//! Store-native query construction
//!
//! One `QuerySpec` per collection read: optional equality filters (combined
//! with AND, dropped when the value is absent), at most one field-against-field
//! comparison, a single sort field, and pagination via limit/offset or a
//! resume-after cursor.

use serde_json::Value;

use crate::cursor::PageCursor;

/// Sort direction for an ordered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A query over one collection.
///
/// Example usage:
/// ```rust
/// use document_store::{QuerySpec, SortDirection};
///
/// let spec = QuerySpec::new("admissions")
///     .filter_eq("patientId", Some("p1"))
///     .filter_eq("status", Some("active"))
///     .order_by("admissionDate", SortDirection::Descending)
///     .limit(10);
/// assert_eq!(spec.filters.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub collection: String,
    /// Equality constraints, combined with AND
    pub filters: Vec<(String, Value)>,
    /// Optional `left <= right` constraint comparing two fields on the document
    pub le_comparison: Option<(String, String)>,
    pub sort: Option<(String, SortDirection)>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Resume strictly after the document this cursor references
    pub start_after: Option<PageCursor>,
}

impl QuerySpec {
    /// Create a query over the named collection.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            le_comparison: None,
            sort: None,
            limit: None,
            offset: None,
            start_after: None,
        }
    }

    /// Add an equality filter (only if value is Some).
    pub fn filter_eq<T: Into<Value>>(mut self, field: &str, value: Option<T>) -> Self {
        if let Some(val) = value {
            self.filters.push((field.to_string(), val.into()));
        }
        self
    }

    /// Constrain `field <= other_field`, comparing two fields on each document.
    pub fn filter_le_field(mut self, field: &str, other_field: &str) -> Self {
        self.le_comparison = Some((field.to_string(), other_field.to_string()));
        self
    }

    /// Order results by a field.
    pub fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort = Some((field.to_string(), direction));
        self
    }

    /// Order by `createdAt` descending (common pattern).
    pub fn order_by_created_desc(self) -> Self {
        self.order_by("createdAt", SortDirection::Descending)
    }

    /// Cap the number of returned documents.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` matching documents.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Resume strictly after the document referenced by the cursor, if any.
    pub fn start_after(mut self, cursor: Option<PageCursor>) -> Self {
        self.start_after = cursor;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_eq_with_none_is_dropped() {
        let spec = QuerySpec::new("patients").filter_eq("doctorId", None::<String>);
        assert!(spec.filters.is_empty());
    }

    #[test]
    fn filter_eq_with_some_is_kept() {
        let spec = QuerySpec::new("patients").filter_eq("doctorId", Some("d1"));
        assert_eq!(spec.filters, vec![("doctorId".to_string(), json!("d1"))]);
    }

    #[test]
    fn filters_combine_in_order() {
        let spec = QuerySpec::new("admissions")
            .filter_eq("patientId", Some("p1"))
            .filter_eq("status", Some("active"))
            .order_by("admissionDate", SortDirection::Descending)
            .limit(10);

        assert_eq!(spec.filters.len(), 2);
        assert_eq!(
            spec.sort,
            Some(("admissionDate".to_string(), SortDirection::Descending))
        );
        assert_eq!(spec.limit, Some(10));
    }

    #[test]
    fn le_comparison_records_both_fields() {
        let spec = QuerySpec::new("inventoryItems").filter_le_field("quantity", "reorderLevel");
        assert_eq!(
            spec.le_comparison,
            Some(("quantity".to_string(), "reorderLevel".to_string()))
        );
    }

    #[test]
    fn order_by_created_desc_is_shorthand() {
        let spec = QuerySpec::new("patients").order_by_created_desc();
        assert_eq!(
            spec.sort,
            Some(("createdAt".to_string(), SortDirection::Descending))
        );
    }
}
