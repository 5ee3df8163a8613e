//! MediTrack Server - practice management HTTP API
//!
//! This library provides the core functionality of the MediTrack HTTP server:
//! bearer-token authentication, role-based authorization, and RESTful
//! endpoints over the practice management collections.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use error::*;
pub use server::{MediTrackServer, ServerConfig};

use axum::{
    http::{header, Method},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the CORS layer shared by all routes
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Create the main application router with all routes and middleware
pub fn create_app(server: MediTrackServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer()),
        )
        .with_state(server)
}
