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
use records_dal::{DietPlan, DietPlanFilter, NewDietPlan, Resource, UpdateDietPlan};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for listing diet plans
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListDietPlansParams {
    /// Restrict to one patient's plans
    pub patient_id: Option<String>,
}

/// List diet plans, most recently updated first
#[utoipa::path(
    get,
    path = crate::routes::paths::api::DIET_PLANS,
    responses(
        (status = 200, description = "Page of diet plans", body = ListEnvelope<DietPlan>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(ListDietPlansParams, PaginationParams),
    tag = "diet-plans",
    security(("bearer_auth" = []))
)]
pub async fn list_diet_plans(
    State(server): State<MediTrackServer>,
    Query(params): Query<ListDietPlansParams>,
    Query(pagination): Query<PaginationParams>,
    auth: AuthContext,
) -> Result<Json<ListEnvelope<DietPlan>>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::DietPlans, Operation::Read)?;

    let filter = DietPlanFilter {
        patient_id: params.patient_id,
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

/// Get a specific diet plan by ID
#[utoipa::path(
    get,
    path = crate::routes::paths::api::DIET_PLAN_BY_ID,
    responses(
        (status = 200, description = "Diet plan retrieved successfully", body = DietPlan),
        (status = 404, description = "Diet plan not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("plan_id" = String, Path, description = "Diet plan ID")
    ),
    tag = "diet-plans",
    security(("bearer_auth" = []))
)]
pub async fn get_diet_plan(
    State(server): State<MediTrackServer>,
    Path(plan_id): Path<String>,
    auth: AuthContext,
) -> Result<Json<DietPlan>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::DietPlans, Operation::Read)?;

    let plan = server.dal.get::<DietPlan>(&plan_id).await?;
    Ok(Json(plan))
}

/// Create a diet plan for a patient
#[utoipa::path(
    post,
    path = crate::routes::paths::api::DIET_PLANS,
    request_body = NewDietPlan,
    responses(
        (status = 201, description = "Diet plan created successfully", body = DietPlan),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    tag = "diet-plans",
    security(("bearer_auth" = []))
)]
pub async fn create_diet_plan(
    State(server): State<MediTrackServer>,
    auth: AuthContext,
    Json(mut req): Json<NewDietPlan>,
) -> Result<(StatusCode, Json<DietPlan>), ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::DietPlans, Operation::Write)?;

    req.created_by_id = auth.user_id.clone();
    let plan = server.dal.create(&req).await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// Update a diet plan; only the supplied fields change
#[utoipa::path(
    patch,
    path = crate::routes::paths::api::DIET_PLAN_BY_ID,
    request_body = UpdateDietPlan,
    responses(
        (status = 200, description = "Diet plan updated successfully", body = DietPlan),
        (status = 404, description = "Diet plan not found"),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("plan_id" = String, Path, description = "Diet plan ID")
    ),
    tag = "diet-plans",
    security(("bearer_auth" = []))
)]
pub async fn update_diet_plan(
    State(server): State<MediTrackServer>,
    Path(plan_id): Path<String>,
    auth: AuthContext,
    Json(req): Json<UpdateDietPlan>,
) -> Result<Json<DietPlan>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::DietPlans, Operation::Write)?;

    let plan = server.dal.update(&plan_id, &req).await?;
    Ok(Json(plan))
}
