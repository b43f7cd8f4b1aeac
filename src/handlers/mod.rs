//! HTTP API surface
//!
//! Thin axum handlers over the service layer: parse the request, call one
//! service method, shape the response. All authorization goes through the
//! middleware extractors; handlers never inspect tokens themselves.

pub mod auth;
pub mod events;
pub mod payments;
pub mod admin;
pub mod users;

use std::sync::Arc;

use axum::{
    extract::State,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::database::{self, DatabasePool};
use crate::middleware::{auth_middleware, log_requests};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceFactory>,
    pub pool: DatabasePool,
}

/// Build the API router with all routes and middleware attached
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/signin", post(auth::signin))
        .route("/api/events", get(events::list_events).post(events::create_event))
        .route("/api/events/register", post(events::register))
        .route("/api/events/:event_id", get(events::get_event))
        .route("/api/payments/process", post(payments::process_payment))
        .route("/api/payments", get(payments::list_own_payments))
        .route("/api/user/registrations", get(users::list_own_registrations))
        .route("/api/user/dashboard", get(users::dashboard))
        .route("/api/admin/registrations", get(admin::list_registrations))
        .route("/api/admin/registrations/approve", post(admin::decide_registration))
        .route("/api/admin/payments", get(admin::list_payments))
        .route("/api/admin/payments/refund", post(admin::refund_payment))
        .route("/api/admin/analytics", get(admin::analytics))
        .route("/api/admin/dashboard", get(admin::dashboard))
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .layer(from_fn(log_requests))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness probe including database connectivity
async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    database::health_check(&state.pool).await?;
    Ok(Json(json!({ "status": "ok" })))
}
