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
use records_dal::{NewUser, Resource, Role, UpdateUser, User, UserFilter};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for listing staff profiles
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersParams {
    /// Restrict to staff working under this doctor
    pub doctor_id: Option<String>,
    /// Restrict to staff attached to this hospital
    pub hospital_id: Option<String>,
    /// Restrict by role
    pub role: Option<Role>,
}

/// The authenticated caller's own profile.
///
/// Available to every authenticated role, independent of the users policy.
#[utoipa::path(
    get,
    path = crate::routes::paths::api::USERS_ME,
    responses(
        (status = 200, description = "Caller profile", body = User),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn current_user(
    State(server): State<MediTrackServer>,
    auth: AuthContext,
) -> Result<Json<User>, ApiError> {
    let user = server.dal.get::<User>(&auth.user_id).await?;
    Ok(Json(user))
}

/// List staff profiles
#[utoipa::path(
    get,
    path = crate::routes::paths::api::USERS,
    responses(
        (status = 200, description = "Page of staff profiles", body = ListEnvelope<User>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(ListUsersParams, PaginationParams),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(server): State<MediTrackServer>,
    Query(params): Query<ListUsersParams>,
    Query(pagination): Query<PaginationParams>,
    auth: AuthContext,
) -> Result<Json<ListEnvelope<User>>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Users, Operation::Read)?;

    let filter = UserFilter {
        doctor_id: params.doctor_id,
        hospital_id: params.hospital_id,
        role: params.role,
        affiliate_id: None,
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

/// Get a specific staff profile by ID
#[utoipa::path(
    get,
    path = crate::routes::paths::api::USER_BY_ID,
    responses(
        (status = 200, description = "Staff profile retrieved successfully", body = User),
        (status = 404, description = "User not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(server): State<MediTrackServer>,
    Path(user_id): Path<String>,
    auth: AuthContext,
) -> Result<Json<User>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Users, Operation::Read)?;

    let user = server.dal.get::<User>(&user_id).await?;
    Ok(Json(user))
}

/// Create a staff profile.
///
/// New profiles start active.
#[utoipa::path(
    post,
    path = crate::routes::paths::api::USERS,
    request_body = NewUser,
    responses(
        (status = 201, description = "Staff profile created successfully", body = User),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    State(server): State<MediTrackServer>,
    auth: AuthContext,
    Json(req): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Users, Operation::Write)?;

    let user = server.dal.create(&req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a staff profile, typically its role or active flag
#[utoipa::path(
    patch,
    path = crate::routes::paths::api::USER_BY_ID,
    request_body = UpdateUser,
    responses(
        (status = 200, description = "Staff profile updated successfully", body = User),
        (status = 404, description = "User not found"),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(server): State<MediTrackServer>,
    Path(user_id): Path<String>,
    auth: AuthContext,
    Json(req): Json<UpdateUser>,
) -> Result<Json<User>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::Users, Operation::Write)?;

    let user = server.dal.update(&user_id, &req).await?;
    Ok(Json(user))
}
