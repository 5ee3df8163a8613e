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
use chrono::Utc;
use records_dal::{Account, AccountFilter, PartnerType, Resource, UpdateAccount};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing partner accounts
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsParams {
    /// Restrict to accounts onboarded by this affiliate
    pub affiliate_id: Option<String>,
}

/// Registration request for a new partner account.
///
/// Plan amount, trial window, and starting status are derived server-side
/// from the chosen plan.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountRequest {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub plan_type: PartnerType,
    /// Affiliate credited with the onboarding; defaults to the caller
    pub affiliate_id: Option<String>,
}

/// List partner accounts, newest first
#[utoipa::path(
    get,
    path = crate::routes::paths::api::ACCOUNTS,
    responses(
        (status = 200, description = "Page of partner accounts", body = ListEnvelope<Account>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(ListAccountsParams, PaginationParams),
    tag = "accounts",
    security(("bearer_auth" = []))
)]
pub async fn list_accounts(
    State(server): State<MediTrackServer>,
    Query(params): Query<ListAccountsParams>,
    Query(pagination): Query<PaginationParams>,
    auth: AuthContext,
) -> Result<Json<ListEnvelope<Account>>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Accounts, Operation::Read)?;

    let filter = AccountFilter {
        affiliate_id: params.affiliate_id,
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

/// Register a partner account on a seven-day trial
#[utoipa::path(
    post,
    path = crate::routes::paths::api::ACCOUNTS,
    request_body = RegisterAccountRequest,
    responses(
        (status = 201, description = "Account registered successfully", body = Account),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    tag = "accounts",
    security(("bearer_auth" = []))
)]
pub async fn register_account(
    State(server): State<MediTrackServer>,
    auth: AuthContext,
    Json(req): Json<RegisterAccountRequest>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Accounts, Operation::Write)?;

    let affiliate_id = req.affiliate_id.or_else(|| Some(auth.user_id.clone()));
    let draft = accounting_service::registration(
        req.name,
        req.email,
        req.contact,
        req.plan_type,
        affiliate_id,
        Utc::now(),
    );
    let account = server.dal.create(&draft).await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// Fetch one partner account by identifier
#[utoipa::path(
    get,
    path = crate::routes::paths::api::ACCOUNT_BY_ID,
    responses(
        (status = 200, description = "Partner account found", body = Account),
        (status = 404, description = "Partner account not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("account_id" = String, Path, description = "Partner account ID")
    ),
    tag = "accounts",
    security(("bearer_auth" = []))
)]
pub async fn get_account(
    State(server): State<MediTrackServer>,
    Path(account_id): Path<String>,
    auth: AuthContext,
) -> Result<Json<Account>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Accounts, Operation::Read)?;

    let account = server.dal.get::<Account>(&account_id).await?;
    Ok(Json(account))
}

/// Update a partner account, typically to record a payment.
///
/// Marking a paid account sets `status` to `active` and stamps
/// `lastPayment`; standing thereafter derives from those fields.
#[utoipa::path(
    patch,
    path = crate::routes::paths::api::ACCOUNT_BY_ID,
    request_body = UpdateAccount,
    responses(
        (status = 200, description = "Partner account updated successfully", body = Account),
        (status = 404, description = "Partner account not found"),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("account_id" = String, Path, description = "Partner account ID")
    ),
    tag = "accounts",
    security(("bearer_auth" = []))
)]
pub async fn update_account(
    State(server): State<MediTrackServer>,
    Path(account_id): Path<String>,
    auth: AuthContext,
    Json(req): Json<UpdateAccount>,
) -> Result<Json<Account>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Accounts, Operation::Write)?;

    let account = server.dal.update(&account_id, &req).await?;
    Ok(Json(account))
}
