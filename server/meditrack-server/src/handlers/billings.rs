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
use records_dal::{Billing, BillingFilter, BillingStatus, NewBilling, Resource, UpdateBilling};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for listing billing records
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListBillingsParams {
    /// Restrict to one patient's invoices
    pub patient_id: Option<String>,
    /// Restrict by payment status
    pub status: Option<BillingStatus>,
}

/// List billing records, newest first
#[utoipa::path(
    get,
    path = crate::routes::paths::api::BILLINGS,
    responses(
        (status = 200, description = "Page of billing records", body = ListEnvelope<Billing>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(ListBillingsParams, PaginationParams),
    tag = "billings",
    security(("bearer_auth" = []))
)]
pub async fn list_billings(
    State(server): State<MediTrackServer>,
    Query(params): Query<ListBillingsParams>,
    Query(pagination): Query<PaginationParams>,
    auth: AuthContext,
) -> Result<Json<ListEnvelope<Billing>>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Billings, Operation::Read)?;

    let filter = BillingFilter {
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

/// Get a specific billing record by ID
#[utoipa::path(
    get,
    path = crate::routes::paths::api::BILLING_BY_ID,
    responses(
        (status = 200, description = "Billing record retrieved successfully", body = Billing),
        (status = 404, description = "Billing record not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("billing_id" = String, Path, description = "Billing record ID")
    ),
    tag = "billings",
    security(("bearer_auth" = []))
)]
pub async fn get_billing(
    State(server): State<MediTrackServer>,
    Path(billing_id): Path<String>,
    auth: AuthContext,
) -> Result<Json<Billing>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Billings, Operation::Read)?;

    let billing = server.dal.get::<Billing>(&billing_id).await?;
    Ok(Json(billing))
}

/// Create an invoice.
///
/// The invoice number is generated server-side and the record starts in
/// `pending` status.
#[utoipa::path(
    post,
    path = crate::routes::paths::api::BILLINGS,
    request_body = NewBilling,
    responses(
        (status = 201, description = "Invoice created successfully", body = Billing),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    tag = "billings",
    security(("bearer_auth" = []))
)]
pub async fn create_billing(
    State(server): State<MediTrackServer>,
    auth: AuthContext,
    Json(mut req): Json<NewBilling>,
) -> Result<(StatusCode, Json<Billing>), ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Billings, Operation::Write)?;

    req.created_by_id = auth.user_id.clone();
    let billing = server.dal.create(&req).await?;

    Ok((StatusCode::CREATED, Json(billing)))
}

/// Update a billing record, typically to mark it paid
#[utoipa::path(
    patch,
    path = crate::routes::paths::api::BILLING_BY_ID,
    request_body = UpdateBilling,
    responses(
        (status = 200, description = "Billing record updated successfully", body = Billing),
        (status = 404, description = "Billing record not found"),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("billing_id" = String, Path, description = "Billing record ID")
    ),
    tag = "billings",
    security(("bearer_auth" = []))
)]
pub async fn update_billing(
    State(server): State<MediTrackServer>,
    Path(billing_id): Path<String>,
    auth: AuthContext,
    Json(req): Json<UpdateBilling>,
) -> Result<Json<Billing>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Billings, Operation::Write)?;

    let billing = server.dal.update(&billing_id, &req).await?;
    Ok(Json(billing))
}
