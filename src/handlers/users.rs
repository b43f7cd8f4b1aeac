//! Registrant-facing endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use crate::handlers::AppState;
use crate::middleware::AuthUser;
use crate::models::analytics::UserDashboardStats;
use crate::models::registration::RegistrationDetails;
use crate::utils::errors::Result;

/// The authenticated user's registrations, newest first
pub async fn list_own_registrations(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RegistrationDetails>>> {
    let (_, registrations) = state
        .services
        .analytics_service
        .user_dashboard(claims.user_id)
        .await?;

    Ok(Json(registrations))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboardResponse {
    pub stats: UserDashboardStats,
    pub registrations: Vec<RegistrationDetails>,
}

/// Registration counts and upcoming events for the authenticated user
pub async fn dashboard(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserDashboardResponse>> {
    let (stats, registrations) = state
        .services
        .analytics_service
        .user_dashboard(claims.user_id)
        .await?;

    Ok(Json(UserDashboardResponse { stats, registrations }))
}
