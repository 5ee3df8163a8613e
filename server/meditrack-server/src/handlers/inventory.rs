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
use records_dal::{InventoryFilter, InventoryItem, ItemType, NewInventoryItem, Resource, UpdateInventoryItem};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for listing inventory items
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListInventoryParams {
    /// Restrict by item category
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    /// Only items at or below their reorder level
    pub reorder_needed: Option<bool>,
}

/// List inventory items, most recently updated first
#[utoipa::path(
    get,
    path = crate::routes::paths::api::INVENTORY,
    responses(
        (status = 200, description = "Page of inventory items", body = ListEnvelope<InventoryItem>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(ListInventoryParams, PaginationParams),
    tag = "inventory",
    security(("bearer_auth" = []))
)]
pub async fn list_inventory(
    State(server): State<MediTrackServer>,
    Query(params): Query<ListInventoryParams>,
    Query(pagination): Query<PaginationParams>,
    auth: AuthContext,
) -> Result<Json<ListEnvelope<InventoryItem>>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::InventoryItems, Operation::Read)?;

    let filter = InventoryFilter {
        item_type: params.item_type,
        reorder_needed: params.reorder_needed.unwrap_or(false),
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

/// Get a specific inventory item by ID
#[utoipa::path(
    get,
    path = crate::routes::paths::api::INVENTORY_ITEM_BY_ID,
    responses(
        (status = 200, description = "Inventory item retrieved successfully", body = InventoryItem),
        (status = 404, description = "Inventory item not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("item_id" = String, Path, description = "Inventory item ID")
    ),
    tag = "inventory",
    security(("bearer_auth" = []))
)]
pub async fn get_inventory_item(
    State(server): State<MediTrackServer>,
    Path(item_id): Path<String>,
    auth: AuthContext,
) -> Result<Json<InventoryItem>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::InventoryItems, Operation::Read)?;

    let item = server.dal.get::<InventoryItem>(&item_id).await?;
    Ok(Json(item))
}

/// Add an inventory item
#[utoipa::path(
    post,
    path = crate::routes::paths::api::INVENTORY,
    request_body = NewInventoryItem,
    responses(
        (status = 201, description = "Inventory item added successfully", body = InventoryItem),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    tag = "inventory",
    security(("bearer_auth" = []))
)]
pub async fn create_inventory_item(
    State(server): State<MediTrackServer>,
    auth: AuthContext,
    Json(mut req): Json<NewInventoryItem>,
) -> Result<(StatusCode, Json<InventoryItem>), ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::InventoryItems, Operation::Write)?;

    req.created_by_id = auth.user_id.clone();
    let item = server.dal.create(&req).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Update an inventory item, typically its stock level
#[utoipa::path(
    patch,
    path = crate::routes::paths::api::INVENTORY_ITEM_BY_ID,
    request_body = UpdateInventoryItem,
    responses(
        (status = 200, description = "Inventory item updated successfully", body = InventoryItem),
        (status = 404, description = "Inventory item not found"),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not allowed")
    ),
    params(
        ("item_id" = String, Path, description = "Inventory item ID")
    ),
    tag = "inventory",
    security(("bearer_auth" = []))
)]
pub async fn update_inventory_item(
    State(server): State<MediTrackServer>,
    Path(item_id): Path<String>,
    auth: AuthContext,
    Json(req): Json<UpdateInventoryItem>,
) -> Result<Json<InventoryItem>, ApiError> {
    server
        .guard
        .ensure(auth.role, Resource::InventoryItems, Operation::Write)?;

    let item = server.dal.update(&item_id, &req).await?;
    Ok(Json(item))
}
