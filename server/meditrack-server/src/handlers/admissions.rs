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
use records_dal::{Admission, AdmissionFilter, AdmissionStatus, NewAdmission, Resource, UpdateAdmission};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for listing admissions
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListAdmissionsParams {
    /// Restrict to one patient's admissions
    pub patient_id: Option<String>,
    /// Restrict by admission status
    pub status: Option<AdmissionStatus>,
}

/// List admissions, most recent admission date first
#[utoipa::path(
    get,
    path = crate::routes::paths::api::ADMISSIONS,
    responses(
        (status = 200, description = "Page of admissions", body = ListEnvelope<Admission>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(ListAdmissionsParams, PaginationParams),
    tag = "admissions",
    security(("bearer_auth" = []))
)]
pub async fn list_admissions(
    State(server): State<MediTrackServer>,
    Query(params): Query<ListAdmissionsParams>,
    Query(pagination): Query<PaginationParams>,
    auth: AuthContext,
) -> Result<Json<ListEnvelope<Admission>>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Admissions, Operation::Read)?;

    let filter = AdmissionFilter {
        patient_id: params.patient_id,
        status: params.status,
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

/// Get a specific admission by ID
#[utoipa::path(
    get,
    path = crate::routes::paths::api::ADMISSION_BY_ID,
    responses(
        (status = 200, description = "Admission retrieved successfully", body = Admission),
        (status = 404, description = "Admission not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("admission_id" = String, Path, description = "Admission ID")
    ),
    tag = "admissions",
    security(("bearer_auth" = []))
)]
pub async fn get_admission(
    State(server): State<MediTrackServer>,
    Path(admission_id): Path<String>,
    auth: AuthContext,
) -> Result<Json<Admission>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Admissions, Operation::Read)?;

    let admission = server.dal.get::<Admission>(&admission_id).await?;
    Ok(Json(admission))
}

/// Admit a patient.
///
/// New admissions start in `active` status; the admission is also appended
/// to the activity feed.
#[utoipa::path(
    post,
    path = crate::routes::paths::api::ADMISSIONS,
    request_body = NewAdmission,
    responses(
        (status = 201, description = "Patient admitted successfully", body = Admission),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    tag = "admissions",
    security(("bearer_auth" = []))
)]
pub async fn create_admission(
    State(server): State<MediTrackServer>,
    auth: AuthContext,
    Json(mut req): Json<NewAdmission>,
) -> Result<(StatusCode, Json<Admission>), ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Admissions, Operation::Write)?;

    req.created_by_id = auth.user_id.clone();
    let admission = server.dal.create(&req).await?;

    Ok((StatusCode::CREATED, Json(admission)))
}

/// Update an admission, typically to discharge or move the patient
#[utoipa::path(
    patch,
    path = crate::routes::paths::api::ADMISSION_BY_ID,
    request_body = UpdateAdmission,
    responses(
        (status = 200, description = "Admission updated successfully", body = Admission),
        (status = 404, description = "Admission not found"),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("admission_id" = String, Path, description = "Admission ID")
    ),
    tag = "admissions",
    security(("bearer_auth" = []))
)]
pub async fn update_admission(
    State(server): State<MediTrackServer>,
    Path(admission_id): Path<String>,
    auth: AuthContext,
    Json(req): Json<UpdateAdmission>,
) -> Result<Json<Admission>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Admissions, Operation::Write)?;

    let admission = server.dal.update(&admission_id, &req).await?;
    Ok(Json(admission))
}
