use crate::auth::AuthContext;
use crate::error::{api_paginated, ApiError, ListEnvelope};
use crate::server::MediTrackServer;
use crate::types::PaginationParams;
use access_guard::Operation;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use records_dal::{NewTreatmentLog, Resource, TreatmentLog, TreatmentLogFilter};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for listing treatment logs
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListTreatmentLogsParams {
    /// Restrict to one patient's treatment history
    pub patient_id: Option<String>,
    /// Restrict to one admission; takes precedence over `patientId`
    pub admission_id: Option<String>,
}

/// List treatment logs, newest first
#[utoipa::path(
    get,
    path = crate::routes::paths::api::TREATMENT_LOGS,
    responses(
        (status = 200, description = "Page of treatment logs", body = ListEnvelope<TreatmentLog>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(ListTreatmentLogsParams, PaginationParams),
    tag = "treatment-logs",
    security(("bearer_auth" = []))
)]
pub async fn list_treatment_logs(
    State(server): State<MediTrackServer>,
    Query(params): Query<ListTreatmentLogsParams>,
    Query(pagination): Query<PaginationParams>,
    auth: AuthContext,
) -> Result<Json<ListEnvelope<TreatmentLog>>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::TreatmentLogs, Operation::Read)?;

    let filter = TreatmentLogFilter {
        patient_id: params.patient_id,
        admission_id: params.admission_id,
    };
    let page = server.dal.list(&filter, &pagination.page_request()).await?;
    let total = server.dal.count(&filter).await?;

    Ok(Json(api_paginated(
        page.items,
        total,
        pagination.page(),
        pagination.limit(),
        page.next_cursor,
    )))
}

/// Get a specific treatment log by ID
#[utoipa::path(
    get,
    path = crate::routes::paths::api::TREATMENT_LOG_BY_ID,
    responses(
        (status = 200, description = "Treatment log retrieved successfully", body = TreatmentLog),
        (status = 404, description = "Treatment log not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("log_id" = String, Path, description = "Treatment log ID")
    ),
    tag = "treatment-logs",
    security(("bearer_auth" = []))
)]
pub async fn get_treatment_log(
    State(server): State<MediTrackServer>,
    Path(log_id): Path<String>,
    auth: AuthContext,
) -> Result<Json<TreatmentLog>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::TreatmentLogs, Operation::Read)?;

    let log = server.dal.get::<TreatmentLog>(&log_id).await?;
    Ok(Json(log))
}

/// Append a treatment log entry.
///
/// Treatment logs are append-only; there is no update endpoint. The entry
/// is also appended to the activity feed.
#[utoipa::path(
    post,
    path = crate::routes::paths::api::TREATMENT_LOGS,
    request_body = NewTreatmentLog,
    responses(
        (status = 201, description = "Treatment log recorded successfully", body = TreatmentLog),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    tag = "treatment-logs",
    security(("bearer_auth" = []))
)]
pub async fn create_treatment_log(
    State(server): State<MediTrackServer>,
    auth: AuthContext,
    Json(mut req): Json<NewTreatmentLog>,
) -> Result<(StatusCode, Json<TreatmentLog>), ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::TreatmentLogs, Operation::Write)?;

    req.created_by_id = auth.user_id.clone();
    let log = server.dal.create(&req).await?;

    Ok((StatusCode::CREATED, Json(log)))
}
