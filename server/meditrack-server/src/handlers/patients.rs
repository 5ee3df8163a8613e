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
use records_dal::{NewPatient, Patient, PatientFilter, Resource, UpdatePatient};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for listing patients
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListPatientsParams {
    /// Restrict to patients assigned to this doctor
    pub doctor_id: Option<String>,
}

/// List patients, newest first
#[utoipa::path(
    get,
    path = crate::routes::paths::api::PATIENTS,
    responses(
        (status = 200, description = "Page of patients", body = ListEnvelope<Patient>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(ListPatientsParams, PaginationParams),
    tag = "patients",
    security(("bearer_auth" = []))
)]
pub async fn list_patients(
    State(server): State<MediTrackServer>,
    Query(params): Query<ListPatientsParams>,
    Query(pagination): Query<PaginationParams>,
    auth: AuthContext,
) -> Result<Json<ListEnvelope<Patient>>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Patients, Operation::Read)?;

    let filter = PatientFilter {
        doctor_id: params.doctor_id,
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

/// Get a specific patient by ID
#[utoipa::path(
    get,
    path = crate::routes::paths::api::PATIENT_BY_ID,
    responses(
        (status = 200, description = "Patient retrieved successfully", body = Patient),
        (status = 404, description = "Patient not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("patient_id" = String, Path, description = "Patient ID")
    ),
    tag = "patients",
    security(("bearer_auth" = []))
)]
pub async fn get_patient(
    State(server): State<MediTrackServer>,
    Path(patient_id): Path<String>,
    auth: AuthContext,
) -> Result<Json<Patient>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Patients, Operation::Read)?;

    let patient = server.dal.get::<Patient>(&patient_id).await?;
    Ok(Json(patient))
}

/// Register a new patient.
///
/// The registration is also appended to the activity feed.
#[utoipa::path(
    post,
    path = crate::routes::paths::api::PATIENTS,
    request_body = NewPatient,
    responses(
        (status = 201, description = "Patient registered successfully", body = Patient),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    tag = "patients",
    security(("bearer_auth" = []))
)]
pub async fn create_patient(
    State(server): State<MediTrackServer>,
    auth: AuthContext,
    Json(mut req): Json<NewPatient>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Patients, Operation::Write)?;

    req.created_by_id = auth.user_id.clone();
    let patient = server.dal.create(&req).await?;

    Ok((StatusCode::CREATED, Json(patient)))
}

/// Update a patient; only the supplied fields change
#[utoipa::path(
    patch,
    path = crate::routes::paths::api::PATIENT_BY_ID,
    request_body = UpdatePatient,
    responses(
        (status = 200, description = "Patient updated successfully", body = Patient),
        (status = 404, description = "Patient not found"),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("patient_id" = String, Path, description = "Patient ID")
    ),
    tag = "patients",
    security(("bearer_auth" = []))
)]
pub async fn update_patient(
    State(server): State<MediTrackServer>,
    Path(patient_id): Path<String>,
    auth: AuthContext,
    Json(req): Json<UpdatePatient>,
) -> Result<Json<Patient>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Patients, Operation::Write)?;

    let patient = server.dal.update(&patient_id, &req).await?;
    Ok(Json(patient))
}
