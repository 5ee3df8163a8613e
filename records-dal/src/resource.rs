//! Resource catalog
//!
//! Maps each record family to its collection name and default sort. List
//! calls apply the default sort unconditionally; callers cannot override it.

use document_store::SortDirection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The record families served by the DAL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Users,
    Patients,
    Admissions,
    TreatmentLogs,
    Billings,
    InventoryItems,
    DietPlans,
    AffiliateTracking,
    ActivityLogs,
    Accounts,
}

impl Resource {
    /// Collection name in the backing store
    pub fn collection_name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Patients => "patients",
            Self::Admissions => "admissions",
            Self::TreatmentLogs => "treatmentLogs",
            Self::Billings => "billings",
            Self::InventoryItems => "inventoryItems",
            Self::DietPlans => "dietPlans",
            Self::AffiliateTracking => "affiliateTracking",
            Self::ActivityLogs => "activityLogs",
            Self::Accounts => "accounts",
        }
    }

    /// Fixed sort applied to every list call for this resource.
    ///
    /// `None` means insertion-id ordering; cursors still work there because
    /// page boundaries fall back to the document id.
    pub fn default_sort(&self) -> Option<(&'static str, SortDirection)> {
        match self {
            Self::Users => None,
            Self::Patients
            | Self::TreatmentLogs
            | Self::Billings
            | Self::AffiliateTracking
            | Self::Accounts => Some(("createdAt", SortDirection::Descending)),
            Self::Admissions => Some(("admissionDate", SortDirection::Descending)),
            Self::InventoryItems | Self::DietPlans => Some(("updatedAt", SortDirection::Descending)),
            Self::ActivityLogs => Some(("timestamp", SortDirection::Descending)),
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.collection_name())
    }
}

impl From<Resource> for String {
    fn from(resource: Resource) -> Self {
        resource.collection_name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_are_stable() {
        assert_eq!(Resource::TreatmentLogs.collection_name(), "treatmentLogs");
        assert_eq!(Resource::InventoryItems.collection_name(), "inventoryItems");
        assert_eq!(Resource::AffiliateTracking.collection_name(), "affiliateTracking");
    }

    #[test]
    fn every_sorted_resource_is_descending() {
        for resource in [
            Resource::Patients,
            Resource::Admissions,
            Resource::TreatmentLogs,
            Resource::Billings,
            Resource::InventoryItems,
            Resource::DietPlans,
            Resource::AffiliateTracking,
            Resource::ActivityLogs,
            Resource::Accounts,
        ] {
            let (_, direction) = resource.default_sort().unwrap();
            assert_eq!(direction, SortDirection::Descending);
        }
    }

    #[test]
    fn users_have_no_default_sort() {
        assert!(Resource::Users.default_sort().is_none());
    }
}
