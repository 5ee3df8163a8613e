use crate::server::MediTrackServer;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::health_check,

        // Staff endpoints
        crate::handlers::users::current_user,
        crate::handlers::users::list_users,
        crate::handlers::users::get_user,
        crate::handlers::users::create_user,
        crate::handlers::users::update_user,

        // Patient endpoints
        crate::handlers::patients::list_patients,
        crate::handlers::patients::get_patient,
        crate::handlers::patients::create_patient,
        crate::handlers::patients::update_patient,

        // Admission endpoints
        crate::handlers::admissions::list_admissions,
        crate::handlers::admissions::get_admission,
        crate::handlers::admissions::create_admission,
        crate::handlers::admissions::update_admission,

        // Treatment log endpoints
        crate::handlers::treatment_logs::list_treatment_logs,
        crate::handlers::treatment_logs::get_treatment_log,
        crate::handlers::treatment_logs::create_treatment_log,

        // Billing endpoints
        crate::handlers::billings::list_billings,
        crate::handlers::billings::get_billing,
        crate::handlers::billings::create_billing,
        crate::handlers::billings::update_billing,

        // Inventory endpoints
        crate::handlers::inventory::list_inventory,
        crate::handlers::inventory::get_inventory_item,
        crate::handlers::inventory::create_inventory_item,
        crate::handlers::inventory::update_inventory_item,

        // Diet plan endpoints
        crate::handlers::diet_plans::list_diet_plans,
        crate::handlers::diet_plans::get_diet_plan,
        crate::handlers::diet_plans::create_diet_plan,
        crate::handlers::diet_plans::update_diet_plan,

        // Affiliate commission endpoints
        crate::handlers::affiliate::list_tracking,
        crate::handlers::affiliate::get_tracking,
        crate::handlers::affiliate::create_tracking,
        crate::handlers::affiliate::update_tracking,

        // Partner account endpoints
        crate::handlers::accounts::list_accounts,
        crate::handlers::accounts::register_account,
        crate::handlers::accounts::get_account,
        crate::handlers::accounts::update_account,

        // Activity feed endpoints
        crate::handlers::activity::list_activity,

        // Dashboard endpoints
        crate::handlers::dashboard::dashboard_stats,
    ),
    components(
        schemas(
            // Shared response schemas
            crate::error::ApiErrorResponse,
            crate::error::ListEnvelope<records_dal::User>,
            crate::error::ListEnvelope<records_dal::Patient>,
            crate::error::ListEnvelope<records_dal::Admission>,
            crate::error::ListEnvelope<records_dal::TreatmentLog>,
            crate::error::ListEnvelope<records_dal::Billing>,
            crate::error::ListEnvelope<records_dal::InventoryItem>,
            crate::error::ListEnvelope<records_dal::DietPlan>,
            crate::error::ListEnvelope<records_dal::AffiliateTracking>,
            crate::error::ListEnvelope<records_dal::Account>,
            crate::error::ListEnvelope<records_dal::ActivityLog>,

            // Stored record schemas
            records_dal::User,
            records_dal::Patient,
            records_dal::Admission,
            records_dal::TreatmentLog,
            records_dal::Billing,
            records_dal::BillingItem,
            records_dal::InventoryItem,
            records_dal::DietPlan,
            records_dal::AffiliateTracking,
            records_dal::Account,
            records_dal::ActivityLog,
            records_dal::Role,
            records_dal::Gender,
            records_dal::AdmissionType,
            records_dal::AdmissionStatus,
            records_dal::BillingStatus,
            records_dal::ItemType,
            records_dal::CommissionStatus,
            records_dal::PartnerType,
            records_dal::AccountStatus,
            records_dal::ActivityType,

            // Create request schemas
            records_dal::NewUser,
            records_dal::NewPatient,
            records_dal::NewAdmission,
            records_dal::NewTreatmentLog,
            records_dal::NewBilling,
            records_dal::NewInventoryItem,
            records_dal::NewDietPlan,
            records_dal::NewAffiliateTracking,

            // Update request schemas
            records_dal::UpdateUser,
            records_dal::UpdatePatient,
            records_dal::UpdateAdmission,
            records_dal::UpdateBilling,
            records_dal::UpdateInventoryItem,
            records_dal::UpdateDietPlan,
            records_dal::UpdateAffiliateTracking,
            records_dal::UpdateAccount,

            // Handler-specific schemas
            crate::handlers::health::HealthResponse,
            crate::handlers::accounts::RegisterAccountRequest,
            crate::handlers::dashboard::DashboardStats,
            crate::handlers::dashboard::ClinicalStats,
            crate::handlers::dashboard::AdmissionCounts,
            crate::handlers::dashboard::AffiliateStats,
            crate::handlers::dashboard::AccountCounts,
            accounting_service::CommissionSummary,
            accounting_service::MonthlyRevenue,
        )
    ),
    tags(
        (name = "health", description = "System health and status endpoints"),
        (name = "users", description = "Staff profiles and role assignment"),
        (name = "patients", description = "Patient registry"),
        (name = "admissions", description = "OPD and IPD admissions"),
        (name = "treatment-logs", description = "Append-only clinical treatment notes"),
        (name = "billings", description = "Invoices and payment status"),
        (name = "inventory", description = "Medicine, supply and equipment stock"),
        (name = "diet-plans", description = "Patient meal plans"),
        (name = "affiliate", description = "Affiliate commission tracking"),
        (name = "accounts", description = "Partner account onboarding"),
        (name = "activity", description = "Operational activity feed"),
        (name = "dashboard", description = "Role-dependent dashboard statistics"),
    ),
    info(
        title = "MediTrack API",
        version = "0.1.0",
        description = "Practice management API for clinics and hospitals: patient records, admissions, treatment logs, billing, inventory, diet plans and affiliate onboarding.",
        contact(
            name = "MediTrack Team",
            email = "team@meditrack.health",
            url = "https://meditrack.health"
        ),
        license(
            name = "AGPL-3.0-only",
            url = "https://github.com/meditrack-hq/meditrack/blob/main/LICENSE"
        ),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
        (url = "https://api.meditrack.health", description = "Production server"),
    ),
)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes
pub fn create_docs_routes() -> Router<MediTrackServer> {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
