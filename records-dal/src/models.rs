//! Stored record types
//!
//! One struct per collection, deserialized at the DAL boundary so callers
//! never see raw document maps. Timestamps are ISO-8601 strings with fixed
//! millisecond precision; the store sorts them lexicographically, which
//! matches chronological order only while the precision stays fixed.

use crate::record::Record;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Caller role held on the user profile record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Nurse,
    Staff,
    Affiliate,
    Hospital,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Doctor => "doctor",
            Self::Nurse => "nurse",
            Self::Staff => "staff",
            Self::Affiliate => "affiliate",
            Self::Hospital => "hospital",
        };
        f.write_str(name)
    }
}

/// Patient gender marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    M,
    F,
    O,
}

/// Outpatient or inpatient admission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdmissionType {
    Opd,
    Ipd,
}

impl std::fmt::Display for AdmissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opd => f.write_str("OPD"),
            Self::Ipd => f.write_str("IPD"),
        }
    }
}

/// Admission status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionStatus {
    Active,
    Discharged,
}

/// Billing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BillingStatus {
    Pending,
    Paid,
}

/// Inventory item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Medicine,
    Supply,
    Equipment,
}

/// Commission payout status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommissionStatus {
    Pending,
    Paid,
}

/// Kind of partner an affiliate onboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PartnerType {
    Doctor,
    Hospital,
}

impl std::fmt::Display for PartnerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Doctor => f.write_str("doctor"),
            Self::Hospital => f.write_str("hospital"),
        }
    }
}

/// Subscription standing of an onboarded account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Trial,
    Active,
    Expired,
}

/// Activity log entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    PatientRegistered,
    PatientAdmitted,
    TreatmentUpdated,
}

/// Staff or partner profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_id: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub created_at: String,
}

/// Patient record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    pub created_by_id: String,
    pub created_at: String,
}

/// OPD/IPD admission record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    pub id: String,
    pub patient_id: String,
    pub admission_type: AdmissionType,
    pub admission_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharge_date: Option<String>,
    pub status: AdmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    pub doctor_id: String,
    pub created_by_id: String,
}

/// Clinical treatment note, append-only
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentLog {
    pub id: String,
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vitals: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<String>>,
    pub created_by_id: String,
    pub created_at: String,
}

/// One line item on an invoice
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillingItem {
    pub description: String,
    pub amount: f64,
    pub quantity: u32,
}

/// Invoice record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    pub id: String,
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_id: Option<String>,
    pub invoice_number: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<BillingItem>>,
    pub status: BillingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
    pub created_by_id: String,
    pub created_at: String,
}

/// Stock item record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub quantity: i64,
    pub unit: String,
    pub reorder_level: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub created_by_id: String,
    pub updated_at: String,
}

/// Meal plan keyed by meal name
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    pub id: String,
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_id: Option<String>,
    pub plan: HashMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    pub created_by_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Monthly commission entry for an affiliate
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateTracking {
    pub id: String,
    pub affiliate_id: String,
    pub user_id: String,
    pub user_type: PartnerType,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
    pub status: CommissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
    pub created_at: String,
}

/// Append-only activity feed entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub title: String,
    pub description: String,
    pub timestamp: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_id: Option<String>,
}

/// Subscription account onboarded by an affiliate
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub plan_type: PartnerType,
    pub plan_amount: f64,
    pub plan_start: String,
    pub plan_end: String,
    pub account_type: String,
    pub status: AccountStatus,
    /// Always present on the wire; null until the first payment lands
    pub last_payment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_id: Option<String>,
    pub created_at: String,
}

impl Record for User {
    const RESOURCE: Resource = Resource::Users;
}

impl Record for Patient {
    const RESOURCE: Resource = Resource::Patients;
}

impl Record for Admission {
    const RESOURCE: Resource = Resource::Admissions;
}

impl Record for TreatmentLog {
    const RESOURCE: Resource = Resource::TreatmentLogs;
}

impl Record for Billing {
    const RESOURCE: Resource = Resource::Billings;
}

impl Record for InventoryItem {
    const RESOURCE: Resource = Resource::InventoryItems;
}

impl Record for DietPlan {
    const RESOURCE: Resource = Resource::DietPlans;
}

impl Record for AffiliateTracking {
    const RESOURCE: Resource = Resource::AffiliateTracking;
}

impl Record for ActivityLog {
    const RESOURCE: Resource = Resource::ActivityLogs;
}

impl Record for Account {
    const RESOURCE: Resource = Resource::Accounts;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_to_wire_casing() {
        assert_eq!(
            serde_json::to_value(AdmissionType::Opd).expect("serialize"),
            serde_json::json!("OPD")
        );
        assert_eq!(
            serde_json::to_value(Role::Affiliate).expect("serialize"),
            serde_json::json!("affiliate")
        );
        assert_eq!(
            serde_json::to_value(ActivityType::PatientRegistered).expect("serialize"),
            serde_json::json!("patient_registered")
        );
    }

    #[test]
    fn inventory_type_field_uses_reserved_name() {
        let item = InventoryItem {
            id: "i1".into(),
            name: "Paracetamol".into(),
            item_type: ItemType::Medicine,
            quantity: 40,
            unit: "tablets".into(),
            reorder_level: 10,
            price: Some(2.5),
            created_by_id: "u1".into(),
            updated_at: "2026-01-10T08:00:00.000Z".into(),
        };
        let value = serde_json::to_value(&item).expect("serialize");
        assert_eq!(value["type"], serde_json::json!("medicine"));
        assert_eq!(value["reorderLevel"], serde_json::json!(10));
    }

    #[test]
    fn account_last_payment_serializes_as_null_until_paid() {
        let account = Account {
            id: "a1".into(),
            name: "Dr. Mehta Clinic".into(),
            email: "clinic@example.com".into(),
            contact: "9990001111".into(),
            plan_type: PartnerType::Doctor,
            plan_amount: 3500.0,
            plan_start: "2026-01-01T00:00:00.000Z".into(),
            plan_end: "2026-01-08T00:00:00.000Z".into(),
            account_type: "doctor".into(),
            status: AccountStatus::Trial,
            last_payment: None,
            affiliate_id: Some("aff-1".into()),
            created_at: "2026-01-01T00:00:00.000Z".into(),
        };
        let value = serde_json::to_value(&account).expect("serialize");
        assert!(value.get("lastPayment").is_some());
        assert!(value["lastPayment"].is_null());
    }

    #[test]
    fn patient_omits_absent_optionals() {
        let patient = Patient {
            id: "p1".into(),
            name: "Raj Patel".into(),
            age: 42,
            gender: Gender::M,
            contact: "9990001111".into(),
            address: None,
            allergies: None,
            blood_group: None,
            doctor_id: None,
            created_by_id: "u1".into(),
            created_at: "2026-01-10T08:00:00.000Z".into(),
        };
        let value = serde_json::to_value(&patient).expect("serialize");
        assert!(value.get("address").is_none());
        assert!(value.get("bloodGroup").is_none());
        assert_eq!(value["createdById"], serde_json::json!("u1"));
    }
}
