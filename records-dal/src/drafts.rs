//! Create and update payloads
//!
//! Drafts carry exactly the caller-supplied fields; identifiers and
//! timestamps are stamped by the engine, and per-resource derived fields
//! (invoice numbers, initial statuses) are computed here before the write.
//! Patches serialize only their supplied fields so merges never disturb
//! the rest of the document.

use crate::activity::NewActivity;
use crate::error::DalResult;
use crate::models::{
    Account, AccountStatus, AdmissionStatus, AdmissionType, AffiliateTracking, Admission, Billing,
    BillingItem, BillingStatus, CommissionStatus, DietPlan, Gender, InventoryItem, ItemType,
    Patient, PartnerType, Role, TreatmentLog, User,
};
use crate::record::{RecordDraft, RecordPatch};
use crate::{validate_email, validate_field, validate_required};
use chrono::{Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Invoice number in the `INV-{year}-{4 digits}` shape.
///
/// The random suffix is not checked against the store; collisions within
/// a year are possible.
pub fn generate_invoice_number() -> String {
    let year = Utc::now().year();
    let suffix = rand::thread_rng().gen_range(1000..=9999);
    format!("INV-{year}-{suffix}")
}

fn default_reorder_level() -> i64 {
    10
}

/// Create payload for a patient
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
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
    /// Stamped with the authenticated caller by the HTTP layer
    #[serde(default)]
    pub created_by_id: String,
}

impl RecordDraft for NewPatient {
    type Record = Patient;

    fn validate(&self) -> DalResult<()> {
        validate_required!(self.name, "Name is required");
        validate_required!(self.contact, "Contact is required");
        validate_field!(self.age, self.age <= 150, "Age must be at most 150");
        validate_required!(self.created_by_id, "Creator id is required");
        Ok(())
    }

    fn activity_entry(&self, created_id: &str) -> Option<NewActivity> {
        Some(NewActivity::patient_registered(
            &self.name,
            &self.created_by_id,
            created_id,
        ))
    }
}

/// Create payload for an admission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAdmission {
    pub patient_id: String,
    pub admission_type: AdmissionType,
    /// ISO-8601 intake date supplied by the caller
    pub admission_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    pub doctor_id: String,
    /// Stamped with the authenticated caller by the HTTP layer
    #[serde(default)]
    pub created_by_id: String,
}

impl RecordDraft for NewAdmission {
    type Record = Admission;

    fn validate(&self) -> DalResult<()> {
        validate_required!(self.patient_id, "Patient id is required");
        validate_required!(self.admission_date, "Admission date is required");
        validate_required!(self.doctor_id, "Doctor id is required");
        validate_required!(self.created_by_id, "Creator id is required");
        Ok(())
    }

    fn derived_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("status".to_string(), json!(AdmissionStatus::Active));
        fields
    }

    // Admissions sort by admissionDate, not a server stamp
    fn timestamp_fields(&self) -> &'static [&'static str] {
        &[]
    }

    fn activity_entry(&self, created_id: &str) -> Option<NewActivity> {
        Some(NewActivity::patient_admitted(
            self.admission_type,
            &self.created_by_id,
            created_id,
        ))
    }
}

/// Create payload for a treatment log
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTreatmentLog {
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
    /// Stamped with the authenticated caller by the HTTP layer
    #[serde(default)]
    pub created_by_id: String,
}

impl RecordDraft for NewTreatmentLog {
    type Record = TreatmentLog;

    fn validate(&self) -> DalResult<()> {
        validate_required!(self.patient_id, "Patient id is required");
        validate_required!(self.notes, "Notes are required");
        validate_required!(self.created_by_id, "Creator id is required");
        Ok(())
    }

    fn activity_entry(&self, created_id: &str) -> Option<NewActivity> {
        Some(NewActivity::treatment_updated(
            self.title.as_deref(),
            &self.created_by_id,
            created_id,
        ))
    }
}

/// Create payload for a billing; invoice number and status are derived
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBilling {
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_id: Option<String>,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<BillingItem>>,
    /// Stamped with the authenticated caller by the HTTP layer
    #[serde(default)]
    pub created_by_id: String,
}

impl RecordDraft for NewBilling {
    type Record = Billing;

    fn validate(&self) -> DalResult<()> {
        validate_required!(self.patient_id, "Patient id is required");
        validate_field!(self.amount, self.amount >= 0.0, "Amount cannot be negative");
        validate_required!(self.created_by_id, "Creator id is required");
        Ok(())
    }

    fn derived_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert(
            "invoiceNumber".to_string(),
            Value::String(generate_invoice_number()),
        );
        fields.insert("status".to_string(), json!(BillingStatus::Pending));
        fields
    }
}

/// Create payload for an inventory item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub quantity: i64,
    pub unit: String,
    #[serde(default = "default_reorder_level")]
    pub reorder_level: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Stamped with the authenticated caller by the HTTP layer
    #[serde(default)]
    pub created_by_id: String,
}

impl RecordDraft for NewInventoryItem {
    type Record = InventoryItem;

    fn validate(&self) -> DalResult<()> {
        validate_required!(self.name, "Name is required");
        validate_required!(self.unit, "Unit is required");
        validate_field!(self.quantity, self.quantity >= 0, "Quantity cannot be negative");
        validate_field!(
            self.reorder_level,
            self.reorder_level >= 0,
            "Reorder level cannot be negative"
        );
        validate_required!(self.created_by_id, "Creator id is required");
        Ok(())
    }

    fn timestamp_fields(&self) -> &'static [&'static str] {
        &["updatedAt"]
    }
}

/// Create payload for a diet plan
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDietPlan {
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_id: Option<String>,
    pub plan: HashMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    /// Stamped with the authenticated caller by the HTTP layer
    #[serde(default)]
    pub created_by_id: String,
}

impl RecordDraft for NewDietPlan {
    type Record = DietPlan;

    fn validate(&self) -> DalResult<()> {
        validate_required!(self.patient_id, "Patient id is required");
        validate_field!(self.plan, !self.plan.is_empty(), "Plan must contain at least one meal");
        validate_required!(self.created_by_id, "Creator id is required");
        Ok(())
    }

    fn timestamp_fields(&self) -> &'static [&'static str] {
        &["createdAt", "updatedAt"]
    }
}

/// Create payload for a staff or partner profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub display_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_id: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl RecordDraft for NewUser {
    type Record = User;

    fn validate(&self) -> DalResult<()> {
        validate_required!(self.display_name, "Display name is required");
        validate_email!(self.email, "Invalid email format");
        Ok(())
    }

    fn derived_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("isActive".to_string(), Value::Bool(true));
        fields
    }
}

/// Create payload for a monthly commission entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAffiliateTracking {
    pub affiliate_id: String,
    pub user_id: String,
    pub user_type: PartnerType,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

impl RecordDraft for NewAffiliateTracking {
    type Record = AffiliateTracking;

    fn validate(&self) -> DalResult<()> {
        validate_required!(self.affiliate_id, "Affiliate id is required");
        validate_required!(self.user_id, "User id is required");
        validate_field!(self.amount, self.amount >= 0.0, "Amount cannot be negative");
        validate_field!(self.month, (1..=12).contains(&self.month), "Month must be 1-12");
        Ok(())
    }

    fn derived_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("status".to_string(), json!(CommissionStatus::Pending));
        fields
    }
}

/// Create payload for an onboarded subscription account.
///
/// Plan amount, period, and initial status are computed by the caller
/// from the chosen plan before this draft reaches the DAL.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub plan_type: PartnerType,
    pub plan_amount: f64,
    pub plan_start: String,
    pub plan_end: String,
    pub account_type: String,
    pub status: AccountStatus,
    /// Always stored; null until the first payment lands
    #[serde(default)]
    pub last_payment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_id: Option<String>,
}

impl RecordDraft for NewAccount {
    type Record = Account;

    fn validate(&self) -> DalResult<()> {
        validate_required!(self.name, "Name is required");
        validate_required!(self.contact, "Contact is required");
        validate_email!(self.email, "Invalid email format");
        validate_field!(self.plan_amount, self.plan_amount > 0.0, "Plan amount must be positive");
        Ok(())
    }
}

/// Partial update for a patient
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
}

impl RecordPatch for UpdatePatient {
    type Record = Patient;

    fn validate(&self) -> DalResult<()> {
        if let Some(name) = &self.name {
            validate_required!(name, "Name cannot be blank");
        }
        if let Some(age) = self.age {
            validate_field!(age, age <= 150, "Age must be at most 150");
        }
        Ok(())
    }
}

/// Partial update for an admission
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AdmissionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharge_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
}

impl RecordPatch for UpdateAdmission {
    type Record = Admission;
}

/// Partial update for a billing
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBilling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BillingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<BillingItem>>,
}

impl RecordPatch for UpdateBilling {
    type Record = Billing;

    fn validate(&self) -> DalResult<()> {
        if let Some(amount) = self.amount {
            validate_field!(amount, amount >= 0.0, "Amount cannot be negative");
        }
        Ok(())
    }
}

/// Partial update for an inventory item
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl RecordPatch for UpdateInventoryItem {
    type Record = InventoryItem;

    fn validate(&self) -> DalResult<()> {
        if let Some(quantity) = self.quantity {
            validate_field!(quantity, quantity >= 0, "Quantity cannot be negative");
        }
        Ok(())
    }

    fn touch_fields(&self) -> &'static [&'static str] {
        &["updatedAt"]
    }
}

/// Partial update for a diet plan
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDietPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl RecordPatch for UpdateDietPlan {
    type Record = DietPlan;

    fn validate(&self) -> DalResult<()> {
        if let Some(plan) = &self.plan {
            validate_field!(plan, !plan.is_empty(), "Plan must contain at least one meal");
        }
        Ok(())
    }

    fn touch_fields(&self) -> &'static [&'static str] {
        &["updatedAt"]
    }
}

/// Partial update for a staff or partner profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl RecordPatch for UpdateUser {
    type Record = User;

    fn validate(&self) -> DalResult<()> {
        if let Some(display_name) = &self.display_name {
            validate_required!(display_name, "Display name cannot be blank");
        }
        Ok(())
    }
}

/// Partial update for a commission entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAffiliateTracking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CommissionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
}

impl RecordPatch for UpdateAffiliateTracking {
    type Record = AffiliateTracking;
}

/// Partial update for a subscription account, typically recording a payment
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment: Option<String>,
}

impl RecordPatch for UpdateAccount {
    type Record = Account;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DalError;

    fn patient_draft() -> NewPatient {
        NewPatient {
            name: "Raj Patel".into(),
            age: 42,
            gender: Gender::M,
            contact: "9990001111".into(),
            address: None,
            allergies: None,
            blood_group: None,
            doctor_id: None,
            created_by_id: "u1".into(),
        }
    }

    #[test]
    fn invoice_numbers_follow_the_yearly_shape() {
        let number = generate_invoice_number();
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "INV");
        assert_eq!(parts[1], Utc::now().year().to_string());
        assert_eq!(parts[2].len(), 4);
        let suffix: u32 = parts[2].parse().expect("numeric suffix");
        assert!((1000..=9999).contains(&suffix));
    }

    #[test]
    fn billing_draft_derives_invoice_number_and_pending_status() {
        let draft = NewBilling {
            patient_id: "p1".into(),
            admission_id: None,
            amount: 1200.0,
            items: None,
            created_by_id: "u1".into(),
        };
        let derived = draft.derived_fields();
        assert_eq!(derived["status"], json!("pending"));
        assert!(derived["invoiceNumber"]
            .as_str()
            .expect("string invoice number")
            .starts_with("INV-"));
    }

    #[test]
    fn admission_draft_starts_active_and_skips_created_at() {
        let draft = NewAdmission {
            patient_id: "p1".into(),
            admission_type: AdmissionType::Opd,
            admission_date: "2026-02-01T09:00:00.000Z".into(),
            room_number: None,
            doctor_id: "d1".into(),
            created_by_id: "u1".into(),
        };
        assert_eq!(draft.derived_fields()["status"], json!("active"));
        assert!(draft.timestamp_fields().is_empty());
    }

    #[test]
    fn new_users_start_active() {
        let draft = NewUser {
            email: "nurse@example.com".into(),
            display_name: "Meera Pillai".into(),
            role: Role::Nurse,
            username: None,
            doctor_id: None,
            hospital_id: None,
            affiliate_id: None,
            permissions: vec![],
        };
        assert_eq!(draft.derived_fields()["isActive"], json!(true));
    }

    #[test]
    fn patient_draft_rejects_blank_required_fields() {
        let mut draft = patient_draft();
        draft.name = "   ".into();
        assert!(matches!(draft.validate(), Err(DalError::Validation(_))));

        let mut draft = patient_draft();
        draft.contact = String::new();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn commission_month_must_be_calendar_month() {
        let draft = NewAffiliateTracking {
            affiliate_id: "aff-1".into(),
            user_id: "acc-1".into(),
            user_type: PartnerType::Doctor,
            amount: 700.0,
            month: 13,
            year: 2026,
        };
        assert!(matches!(draft.validate(), Err(DalError::Validation(_))));
    }

    #[test]
    fn patch_serializes_only_supplied_fields() {
        let patch = UpdateBilling {
            status: Some(BillingStatus::Paid),
            paid_at: Some("2026-02-01T09:00:00.000Z".into()),
            amount: None,
            items: None,
        };
        let value = serde_json::to_value(&patch).expect("serialize");
        let map = value.as_object().expect("object");
        assert_eq!(map.len(), 2);
        assert_eq!(map["status"], json!("paid"));
    }

    #[test]
    fn inventory_draft_fills_stock_defaults() {
        let draft: NewInventoryItem = serde_json::from_value(json!({
            "name": "Paracetamol",
            "type": "medicine",
            "unit": "tablets"
        }))
        .expect("deserialize");
        assert_eq!(draft.quantity, 0);
        assert_eq!(draft.reorder_level, 10);
    }

    #[test]
    fn diet_plan_stamps_both_timestamps() {
        let draft = NewDietPlan {
            patient_id: "p1".into(),
            admission_id: None,
            plan: HashMap::from([("breakfast".to_string(), vec!["idli".to_string()])]),
            special_instructions: None,
            created_by_id: "u1".into(),
        };
        assert_eq!(draft.timestamp_fields(), &["createdAt", "updatedAt"]);
    }

    #[test]
    fn treatment_activity_uses_the_log_title() {
        let draft = NewTreatmentLog {
            patient_id: "p1".into(),
            admission_id: None,
            title: Some("Post-op review".into()),
            notes: "Stable".into(),
            vitals: None,
            medications: None,
            created_by_id: "u1".into(),
        };
        let entry = draft.activity_entry("t1").expect("activity entry");
        assert_eq!(entry.description, "Post-op review");
        assert_eq!(entry.related_id.as_deref(), Some("t1"));
    }
}
