pub mod paths;

use crate::{
    handlers::{
        accounts, activity, admissions, affiliate, billings, dashboard, diet_plans, health,
        inventory, patients, treatment_logs, users,
    },
    openapi,
    server::MediTrackServer,
};
use axum::{
    routing::{get, patch, post},
    Router,
};

/// Create health check routes
pub fn health_routes() -> Router<MediTrackServer> {
    Router::new().route(paths::HEALTH, get(health::health_check))
}

/// Create staff management routes
pub fn user_routes() -> Router<MediTrackServer> {
    Router::new()
        .route(paths::users::ME, get(users::current_user))
        .route(paths::users::USERS, get(users::list_users))
        .route(paths::users::USERS, post(users::create_user))
        .route(paths::users::USER_BY_ID, get(users::get_user))
        .route(paths::users::USER_BY_ID, patch(users::update_user))
}

/// Create patient registry routes
pub fn patient_routes() -> Router<MediTrackServer> {
    Router::new()
        .route(paths::patients::PATIENTS, get(patients::list_patients))
        .route(paths::patients::PATIENTS, post(patients::create_patient))
        .route(paths::patients::PATIENT_BY_ID, get(patients::get_patient))
        .route(paths::patients::PATIENT_BY_ID, patch(patients::update_patient))
}

/// Create admission routes
pub fn admission_routes() -> Router<MediTrackServer> {
    Router::new()
        .route(paths::admissions::ADMISSIONS, get(admissions::list_admissions))
        .route(paths::admissions::ADMISSIONS, post(admissions::create_admission))
        .route(paths::admissions::ADMISSION_BY_ID, get(admissions::get_admission))
        .route(paths::admissions::ADMISSION_BY_ID, patch(admissions::update_admission))
}

/// Create treatment log routes; append-only, so no update route
pub fn treatment_log_routes() -> Router<MediTrackServer> {
    Router::new()
        .route(
            paths::treatment_logs::TREATMENT_LOGS,
            get(treatment_logs::list_treatment_logs),
        )
        .route(
            paths::treatment_logs::TREATMENT_LOGS,
            post(treatment_logs::create_treatment_log),
        )
        .route(
            paths::treatment_logs::TREATMENT_LOG_BY_ID,
            get(treatment_logs::get_treatment_log),
        )
}

/// Create billing routes
pub fn billing_routes() -> Router<MediTrackServer> {
    Router::new()
        .route(paths::billings::BILLINGS, get(billings::list_billings))
        .route(paths::billings::BILLINGS, post(billings::create_billing))
        .route(paths::billings::BILLING_BY_ID, get(billings::get_billing))
        .route(paths::billings::BILLING_BY_ID, patch(billings::update_billing))
}

/// Create inventory routes
pub fn inventory_routes() -> Router<MediTrackServer> {
    Router::new()
        .route(paths::inventory::INVENTORY, get(inventory::list_inventory))
        .route(paths::inventory::INVENTORY, post(inventory::create_inventory_item))
        .route(paths::inventory::ITEM_BY_ID, get(inventory::get_inventory_item))
        .route(paths::inventory::ITEM_BY_ID, patch(inventory::update_inventory_item))
}

/// Create diet plan routes
pub fn diet_plan_routes() -> Router<MediTrackServer> {
    Router::new()
        .route(paths::diet_plans::DIET_PLANS, get(diet_plans::list_diet_plans))
        .route(paths::diet_plans::DIET_PLANS, post(diet_plans::create_diet_plan))
        .route(paths::diet_plans::DIET_PLAN_BY_ID, get(diet_plans::get_diet_plan))
        .route(paths::diet_plans::DIET_PLAN_BY_ID, patch(diet_plans::update_diet_plan))
}

/// Create affiliate commission tracking routes
pub fn affiliate_routes() -> Router<MediTrackServer> {
    Router::new()
        .route(paths::affiliate::TRACKING, get(affiliate::list_tracking))
        .route(paths::affiliate::TRACKING, post(affiliate::create_tracking))
        .route(paths::affiliate::TRACKING_BY_ID, get(affiliate::get_tracking))
        .route(paths::affiliate::TRACKING_BY_ID, patch(affiliate::update_tracking))
}

/// Create partner account routes
pub fn account_routes() -> Router<MediTrackServer> {
    Router::new()
        .route(paths::accounts::ACCOUNTS, get(accounts::list_accounts))
        .route(paths::accounts::ACCOUNTS, post(accounts::register_account))
        .route(paths::accounts::ACCOUNT_BY_ID, get(accounts::get_account))
        .route(paths::accounts::ACCOUNT_BY_ID, patch(accounts::update_account))
}

/// Create activity feed routes
pub fn activity_routes() -> Router<MediTrackServer> {
    Router::new().route(paths::activity::ACTIVITY_LOGS, get(activity::list_activity))
}

/// Create dashboard routes
pub fn dashboard_routes() -> Router<MediTrackServer> {
    Router::new().route(paths::dashboard::STATS, get(dashboard::dashboard_stats))
}

/// Create the /api route tree
pub fn api_routes() -> Router<MediTrackServer> {
    Router::new()
        .merge(user_routes())
        .merge(patient_routes())
        .merge(admission_routes())
        .merge(treatment_log_routes())
        .merge(billing_routes())
        .merge(inventory_routes())
        .merge(diet_plan_routes())
        .merge(affiliate_routes())
        .merge(account_routes())
        .merge(activity_routes())
        .merge(dashboard_routes())
}

/// Create all application routes
pub fn create_routes() -> Router<MediTrackServer> {
    Router::new()
        // Health check routes (no authentication required)
        .merge(health_routes())
        // API documentation routes
        .merge(openapi::create_docs_routes())
        // API routes (authentication required)
        .nest(paths::API, api_routes())
}
