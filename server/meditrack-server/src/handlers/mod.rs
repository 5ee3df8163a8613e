//! HTTP request handlers, one module per resource

pub mod accounts;
pub mod activity;
pub mod admissions;
pub mod affiliate;
pub mod billings;
pub mod dashboard;
pub mod diet_plans;
pub mod health;
pub mod inventory;
pub mod patients;
pub mod treatment_logs;
pub mod users;
