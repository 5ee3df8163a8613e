use crate::auth::AuthContext;
use crate::error::ApiError;
use crate::server::MediTrackServer;
use accounting_service::{monthly_rollup, summarize, CommissionSummary, MonthlyRevenue};
use axum::{extract::State, Json};
use chrono::{DateTime, Datelike, Duration, SecondsFormat, Utc};
use records_dal::{
    AdmissionFilter, AdmissionType, AffiliateTracking, AffiliateTrackingFilter, BillingFilter,
    PatientFilter, Role, TreatmentLogFilter, UserFilter,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Admission counts over the reporting window
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionCounts {
    pub total: u64,
    pub opd: u64,
    pub ipd: u64,
}

/// Statistics shown to doctors, nurses, and staff
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalStats {
    /// All patients on record
    pub total_patients: u64,
    /// Admissions over the last thirty days
    pub admissions: AdmissionCounts,
    /// Billed amounts over the last thirty days
    pub revenue: f64,
    /// Treatment logs recorded today
    pub appointments: u64,
}

/// Partner profiles onboarded by one affiliate
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountCounts {
    pub total: u64,
    pub doctors: u64,
    pub hospitals: u64,
}

/// Statistics shown to affiliates
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateStats {
    pub accounts: AccountCounts,
    /// Commission over the last thirty days
    pub commission: CommissionSummary,
    /// Commission per month of the current year
    pub monthly_revenue: Vec<MonthlyRevenue>,
}

/// Role-dependent dashboard payload
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum DashboardStats {
    Clinical(ClinicalStats),
    Affiliate(AffiliateStats),
}

/// Role-dependent dashboard statistics.
///
/// Clinical roles see the practice-wide view; affiliates see their own
/// onboarding and commission figures.
#[utoipa::path(
    get,
    path = crate::routes::paths::api::DASHBOARD_STATS,
    responses(
        (status = 200, description = "Dashboard statistics for the caller's role", body = DashboardStats),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No dashboard for the caller's role")
    ),
    tag = "dashboard",
    security(("bearer_auth" = []))
)]
pub async fn dashboard_stats(
    State(server): State<MediTrackServer>,
    auth: AuthContext,
) -> Result<Json<DashboardStats>, ApiError> {
    match auth.role {
        Role::Doctor | Role::Nurse | Role::Staff => {
            Ok(Json(DashboardStats::Clinical(clinical_stats(&server).await?)))
        }
        Role::Affiliate => Ok(Json(DashboardStats::Affiliate(
            affiliate_stats(&server, &auth.user_id).await?,
        ))),
        Role::Hospital => Err(ApiError::authorization(
            "No dashboard is defined for the hospital role",
        )),
    }
}

fn stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn clinical_stats(server: &MediTrackServer) -> Result<ClinicalStats, ApiError> {
    let now = Utc::now();
    let window_start = stamp(now - Duration::days(30));
    let today = now.format("%Y-%m-%d").to_string();

    let total_patients = server.dal.count(&PatientFilter::default()).await?;

    let admissions = server.dal.list_all(&AdmissionFilter::default()).await?;
    let recent_total = admissions
        .iter()
        .filter(|a| a.admission_date >= window_start)
        .count() as u64;
    let opd = admissions
        .iter()
        .filter(|a| a.admission_date >= window_start && a.admission_type == AdmissionType::Opd)
        .count() as u64;

    let billings = server.dal.list_all(&BillingFilter::default()).await?;
    let revenue: f64 = billings
        .iter()
        .filter(|b| b.created_at >= window_start)
        .map(|b| b.amount)
        .sum();

    let treatments = server.dal.list_all(&TreatmentLogFilter::default()).await?;
    let appointments = treatments
        .iter()
        .filter(|t| t.created_at.starts_with(&today))
        .count() as u64;

    Ok(ClinicalStats {
        total_patients,
        admissions: AdmissionCounts {
            total: recent_total,
            opd,
            ipd: recent_total - opd,
        },
        revenue,
        appointments,
    })
}

async fn affiliate_stats(
    server: &MediTrackServer,
    affiliate_id: &str,
) -> Result<AffiliateStats, ApiError> {
    let now = Utc::now();
    let window_start = stamp(now - Duration::days(30));

    // Onboarded partners live in the users collection, keyed by affiliateId
    let doctors = server
        .dal
        .count(&UserFilter {
            role: Some(Role::Doctor),
            affiliate_id: Some(affiliate_id.to_string()),
            ..Default::default()
        })
        .await?;
    let hospitals = server
        .dal
        .count(&UserFilter {
            role: Some(Role::Hospital),
            affiliate_id: Some(affiliate_id.to_string()),
            ..Default::default()
        })
        .await?;

    let tracking_filter = AffiliateTrackingFilter {
        affiliate_id: Some(affiliate_id.to_string()),
        status: None,
    };
    let entries = server.dal.list_all(&tracking_filter).await?;
    let recent: Vec<AffiliateTracking> = entries
        .iter()
        .filter(|e| e.created_at >= window_start)
        .cloned()
        .collect();

    Ok(AffiliateStats {
        accounts: AccountCounts {
            total: doctors + hospitals,
            doctors,
            hospitals,
        },
        commission: summarize(&recent),
        monthly_revenue: monthly_rollup(&entries, now.year()),
    })
}
