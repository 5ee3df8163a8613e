//! Centralized API route path constants
//!
//! Runtime route definitions use the colon-parameter constants, nested
//! under [`API`]. The `api` module carries the brace forms the OpenAPI
//! annotations reference; the two must stay in step.

/// API base path
pub const API: &str = "/api";

/// Liveness endpoint, outside the API tree
pub const HEALTH: &str = "/health";

/// Staff management endpoints
pub mod users {
    pub const ME: &str = "/users/me";
    pub const USERS: &str = "/users";
    pub const USER_BY_ID: &str = "/users/:user_id";
}

/// Patient registry endpoints
pub mod patients {
    pub const PATIENTS: &str = "/patients";
    pub const PATIENT_BY_ID: &str = "/patients/:patient_id";
}

/// Admission endpoints
pub mod admissions {
    pub const ADMISSIONS: &str = "/admissions";
    pub const ADMISSION_BY_ID: &str = "/admissions/:admission_id";
}

/// Treatment log endpoints (append-only)
pub mod treatment_logs {
    pub const TREATMENT_LOGS: &str = "/treatment-logs";
    pub const TREATMENT_LOG_BY_ID: &str = "/treatment-logs/:log_id";
}

/// Billing endpoints
pub mod billings {
    pub const BILLINGS: &str = "/billings";
    pub const BILLING_BY_ID: &str = "/billings/:billing_id";
}

/// Inventory endpoints
pub mod inventory {
    pub const INVENTORY: &str = "/inventory";
    pub const ITEM_BY_ID: &str = "/inventory/:item_id";
}

/// Diet plan endpoints
pub mod diet_plans {
    pub const DIET_PLANS: &str = "/diet-plans";
    pub const DIET_PLAN_BY_ID: &str = "/diet-plans/:plan_id";
}

/// Affiliate commission tracking endpoints
pub mod affiliate {
    pub const TRACKING: &str = "/affiliate-tracking";
    pub const TRACKING_BY_ID: &str = "/affiliate-tracking/:tracking_id";
}

/// Partner account endpoints
pub mod accounts {
    pub const ACCOUNTS: &str = "/accounts";
    pub const ACCOUNT_BY_ID: &str = "/accounts/:account_id";
}

/// Activity feed endpoints
pub mod activity {
    pub const ACTIVITY_LOGS: &str = "/activity-logs";
}

/// Dashboard endpoints
pub mod dashboard {
    pub const STATS: &str = "/dashboard/stats";
}

/// Full paths in OpenAPI form, referenced by `#[utoipa::path]` annotations
pub mod api {
    pub const HEALTH: &str = "/health";

    pub const USERS_ME: &str = "/api/users/me";
    pub const USERS: &str = "/api/users";
    pub const USER_BY_ID: &str = "/api/users/{user_id}";

    pub const PATIENTS: &str = "/api/patients";
    pub const PATIENT_BY_ID: &str = "/api/patients/{patient_id}";

    pub const ADMISSIONS: &str = "/api/admissions";
    pub const ADMISSION_BY_ID: &str = "/api/admissions/{admission_id}";

    pub const TREATMENT_LOGS: &str = "/api/treatment-logs";
    pub const TREATMENT_LOG_BY_ID: &str = "/api/treatment-logs/{log_id}";

    pub const BILLINGS: &str = "/api/billings";
    pub const BILLING_BY_ID: &str = "/api/billings/{billing_id}";

    pub const INVENTORY: &str = "/api/inventory";
    pub const INVENTORY_ITEM_BY_ID: &str = "/api/inventory/{item_id}";

    pub const DIET_PLANS: &str = "/api/diet-plans";
    pub const DIET_PLAN_BY_ID: &str = "/api/diet-plans/{plan_id}";

    pub const AFFILIATE_TRACKING: &str = "/api/affiliate-tracking";
    pub const AFFILIATE_TRACKING_BY_ID: &str = "/api/affiliate-tracking/{tracking_id}";

    pub const ACCOUNTS: &str = "/api/accounts";
    pub const ACCOUNT_BY_ID: &str = "/api/accounts/{account_id}";

    pub const ACTIVITY_LOGS: &str = "/api/activity-logs";

    pub const DASHBOARD_STATS: &str = "/api/dashboard/stats";
}
