use crate::server::MediTrackServer;
use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service name
    #[schema(example = "MediTrack")]
    pub service: String,
    /// Overall system health status
    #[schema(example = "healthy")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2026-01-15T10:30:00.000Z")]
    pub timestamp: String,
    /// API version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Individual service health checks
    pub checks: HashMap<String, String>,
}

/// Liveness probe: reports overall status plus the store's own check
#[utoipa::path(
    get,
    path = crate::routes::paths::api::HEALTH,
    responses(
        (status = 200, description = "Service health report", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(server): State<MediTrackServer>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let store_status = if server.store.is_healthy().await {
        "up"
    } else {
        "down"
    };
    checks.insert("documentStore".to_string(), store_status.to_string());

    let status = if checks.values().all(|check| check == "up") {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        service: server.config.service_name.clone(),
        status: status.to_string(),
        timestamp: records_dal::iso_timestamp(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    })
}
