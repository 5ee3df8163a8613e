use crate::auth::AuthContext;
use crate::error::{api_paginated, ApiError, ListEnvelope};
use crate::server::MediTrackServer;
use crate::types::PaginationParams;
use access_guard::Operation;
use axum::{
    extract::{Query, State},
    Json,
};
use records_dal::{ActivityLog, ActivityLogFilter, ActivityType, Resource};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for the activity feed
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListActivityParams {
    /// Restrict to entries recorded by this user
    pub user_id: Option<String>,
    /// Restrict by activity kind
    #[serde(rename = "type")]
    pub activity_type: Option<ActivityType>,
}

/// Activity feed, newest first.
///
/// Entries are appended by the DAL when patients are registered, patients
/// are admitted, and treatment logs are recorded; this endpoint only reads.
#[utoipa::path(
    get,
    path = crate::routes::paths::api::ACTIVITY_LOGS,
    responses(
        (status = 200, description = "Page of activity entries", body = ListEnvelope<ActivityLog>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(ListActivityParams, PaginationParams),
    tag = "activity",
    security(("bearer_auth" = []))
)]
pub async fn list_activity(
    State(server): State<MediTrackServer>,
    Query(params): Query<ListActivityParams>,
    Query(pagination): Query<PaginationParams>,
    auth: AuthContext,
) -> Result<Json<ListEnvelope<ActivityLog>>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::ActivityLogs, Operation::Read)?;

    let filter = ActivityLogFilter {
        user_id: params.user_id,
        activity_type: params.activity_type,
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
