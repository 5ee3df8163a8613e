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
use records_dal::{
    AffiliateTracking, AffiliateTrackingFilter, CommissionStatus, NewAffiliateTracking, Resource,
    UpdateAffiliateTracking,
};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for listing commission entries
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListTrackingParams {
    /// Restrict to one affiliate's entries
    pub affiliate_id: Option<String>,
    /// Restrict by payout status
    pub status: Option<CommissionStatus>,
}

/// List commission entries, newest first
#[utoipa::path(
    get,
    path = crate::routes::paths::api::AFFILIATE_TRACKING,
    responses(
        (status = 200, description = "Page of commission entries", body = ListEnvelope<AffiliateTracking>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(ListTrackingParams, PaginationParams),
    tag = "affiliate",
    security(("bearer_auth" = []))
)]
pub async fn list_tracking(
    State(server): State<MediTrackServer>,
    Query(params): Query<ListTrackingParams>,
    Query(pagination): Query<PaginationParams>,
    auth: AuthContext,
) -> Result<Json<ListEnvelope<AffiliateTracking>>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::AffiliateTracking, Operation::Read)?;

    let filter = AffiliateTrackingFilter {
        affiliate_id: params.affiliate_id,
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

/// Get a specific commission entry by ID
#[utoipa::path(
    get,
    path = crate::routes::paths::api::AFFILIATE_TRACKING_BY_ID,
    responses(
        (status = 200, description = "Commission entry retrieved successfully", body = AffiliateTracking),
        (status = 404, description = "Commission entry not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("tracking_id" = String, Path, description = "Commission entry ID")
    ),
    tag = "affiliate",
    security(("bearer_auth" = []))
)]
pub async fn get_tracking(
    State(server): State<MediTrackServer>,
    Path(tracking_id): Path<String>,
    auth: AuthContext,
) -> Result<Json<AffiliateTracking>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::AffiliateTracking, Operation::Read)?;

    let entry = server.dal.get::<AffiliateTracking>(&tracking_id).await?;
    Ok(Json(entry))
}

/// Record a commission entry.
///
/// New entries start in `pending` payout status.
#[utoipa::path(
    post,
    path = crate::routes::paths::api::AFFILIATE_TRACKING,
    request_body = NewAffiliateTracking,
    responses(
        (status = 201, description = "Commission entry recorded successfully", body = AffiliateTracking),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    tag = "affiliate",
    security(("bearer_auth" = []))
)]
pub async fn create_tracking(
    State(server): State<MediTrackServer>,
    auth: AuthContext,
    Json(req): Json<NewAffiliateTracking>,
) -> Result<(StatusCode, Json<AffiliateTracking>), ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::AffiliateTracking, Operation::Write)?;

    let entry = server.dal.create(&req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Update a commission entry, typically to mark it paid
#[utoipa::path(
    patch,
    path = crate::routes::paths::api::AFFILIATE_TRACKING_BY_ID,
    request_body = UpdateAffiliateTracking,
    responses(
        (status = 200, description = "Commission entry updated successfully", body = AffiliateTracking),
        (status = 404, description = "Commission entry not found"),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("tracking_id" = String, Path, description = "Commission entry ID")
    ),
    tag = "affiliate",
    security(("bearer_auth" = []))
)]
pub async fn update_tracking(
    State(server): State<MediTrackServer>,
    Path(tracking_id): Path<String>,
    auth: AuthContext,
    Json(req): Json<UpdateAffiliateTracking>,
) -> Result<Json<AffiliateTracking>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::AffiliateTracking, Operation::Write)?;

    let entry = server.dal.update(&tracking_id, &req).await?;
    Ok(Json(entry))
}
