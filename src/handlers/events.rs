//! Event catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::handlers::AppState;
use crate::middleware::{AdminUser, AuthUser};
use crate::models::event::{CreateEventRequest, Event};
use crate::models::registration::Registration;
use crate::utils::errors::Result;

/// List active events, soonest first
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>> {
    let events = state.services.event_service.list_active().await?;
    Ok(Json(events))
}

/// Fetch one event
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Event>> {
    let event = state.services.event_service.get_event(event_id).await?;
    Ok(Json(event))
}

/// Create an event (admin only)
pub async fn create_event(
    AdminUser(claims): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>)> {
    let event = state
        .services
        .event_service
        .create_event(claims.user_id, req)
        .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub event_id: i64,
}

/// Register the authenticated user for a free event
pub async fn register(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Registration>)> {
    let registration = state
        .services
        .registration_service
        .register_free(claims.user_id, req.event_id)
        .await?;

    Ok((StatusCode::CREATED, Json(registration)))
}
