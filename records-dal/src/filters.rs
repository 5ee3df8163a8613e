//! Per-resource list filters
//!
//! Each filter holds the equality constraints a list call may supply.
//! Absent fields are dropped from the query, never matched against null,
//! and supplied fields combine with logical AND.

use crate::models::{
    Account, ActivityLog, ActivityType, Admission, AdmissionStatus, AffiliateTracking, Billing,
    BillingStatus, CommissionStatus, DietPlan, InventoryItem, ItemType, Patient, Role,
    TreatmentLog, User,
};
use crate::record::ResourceFilter;
use document_store::QuerySpec;
use serde::Serialize;
use serde_json::Value;

fn to_filter_value<T: Serialize>(value: &Option<T>) -> Option<Value> {
    value.as_ref().and_then(|v| serde_json::to_value(v).ok())
}

/// Patient list constraints
#[derive(Debug, Clone, Default)]
pub struct PatientFilter {
    pub doctor_id: Option<String>,
}

impl ResourceFilter for PatientFilter {
    type Record = Patient;

    fn apply(&self, spec: QuerySpec) -> QuerySpec {
        spec.filter_eq("doctorId", self.doctor_id.clone())
    }
}

/// Admission list constraints
#[derive(Debug, Clone, Default)]
pub struct AdmissionFilter {
    pub patient_id: Option<String>,
    pub status: Option<AdmissionStatus>,
}

impl ResourceFilter for AdmissionFilter {
    type Record = Admission;

    fn apply(&self, spec: QuerySpec) -> QuerySpec {
        spec.filter_eq("patientId", self.patient_id.clone())
            .filter_eq("status", to_filter_value(&self.status))
    }
}

/// Treatment log list constraints.
///
/// `admissionId` wins when both references are supplied.
#[derive(Debug, Clone, Default)]
pub struct TreatmentLogFilter {
    pub patient_id: Option<String>,
    pub admission_id: Option<String>,
}

impl ResourceFilter for TreatmentLogFilter {
    type Record = TreatmentLog;

    fn apply(&self, spec: QuerySpec) -> QuerySpec {
        if self.admission_id.is_some() {
            spec.filter_eq("admissionId", self.admission_id.clone())
        } else {
            spec.filter_eq("patientId", self.patient_id.clone())
        }
    }
}

/// Billing list constraints
#[derive(Debug, Clone, Default)]
pub struct BillingFilter {
    pub patient_id: Option<String>,
    pub status: Option<BillingStatus>,
}

impl ResourceFilter for BillingFilter {
    type Record = Billing;

    fn apply(&self, spec: QuerySpec) -> QuerySpec {
        spec.filter_eq("patientId", self.patient_id.clone())
            .filter_eq("status", to_filter_value(&self.status))
    }
}

/// Inventory list constraints.
///
/// `reorder_needed` lowers to the field-vs-field comparison
/// `quantity <= reorderLevel`.
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    pub item_type: Option<ItemType>,
    pub reorder_needed: bool,
}

impl ResourceFilter for InventoryFilter {
    type Record = InventoryItem;

    fn apply(&self, spec: QuerySpec) -> QuerySpec {
        let spec = spec.filter_eq("type", to_filter_value(&self.item_type));
        if self.reorder_needed {
            spec.filter_le_field("quantity", "reorderLevel")
        } else {
            spec
        }
    }
}

/// Diet plan list constraints
#[derive(Debug, Clone, Default)]
pub struct DietPlanFilter {
    pub patient_id: Option<String>,
}

impl ResourceFilter for DietPlanFilter {
    type Record = DietPlan;

    fn apply(&self, spec: QuerySpec) -> QuerySpec {
        spec.filter_eq("patientId", self.patient_id.clone())
    }
}

/// Staff/partner profile list constraints.
///
/// `affiliate_id` scopes partner lookups to one affiliate's onboarded
/// doctors and hospitals; the staff listing itself filters by practice.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub doctor_id: Option<String>,
    pub hospital_id: Option<String>,
    pub role: Option<Role>,
    pub affiliate_id: Option<String>,
}

impl ResourceFilter for UserFilter {
    type Record = User;

    fn apply(&self, spec: QuerySpec) -> QuerySpec {
        spec.filter_eq("doctorId", self.doctor_id.clone())
            .filter_eq("hospitalId", self.hospital_id.clone())
            .filter_eq("affiliateId", self.affiliate_id.clone())
            .filter_eq("role", to_filter_value(&self.role))
    }
}

/// Commission entry list constraints
#[derive(Debug, Clone, Default)]
pub struct AffiliateTrackingFilter {
    pub affiliate_id: Option<String>,
    pub status: Option<CommissionStatus>,
}

impl ResourceFilter for AffiliateTrackingFilter {
    type Record = AffiliateTracking;

    fn apply(&self, spec: QuerySpec) -> QuerySpec {
        spec.filter_eq("affiliateId", self.affiliate_id.clone())
            .filter_eq("status", to_filter_value(&self.status))
    }
}

/// Activity feed list constraints
#[derive(Debug, Clone, Default)]
pub struct ActivityLogFilter {
    pub user_id: Option<String>,
    pub activity_type: Option<ActivityType>,
}

impl ResourceFilter for ActivityLogFilter {
    type Record = ActivityLog;

    fn apply(&self, spec: QuerySpec) -> QuerySpec {
        spec.filter_eq("userId", self.user_id.clone())
            .filter_eq("type", to_filter_value(&self.activity_type))
    }
}

/// Subscription account list constraints
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub affiliate_id: Option<String>,
}

impl ResourceFilter for AccountFilter {
    type Record = Account;

    fn apply(&self, spec: QuerySpec) -> QuerySpec {
        spec.filter_eq("affiliateId", self.affiliate_id.clone())
    }
}
