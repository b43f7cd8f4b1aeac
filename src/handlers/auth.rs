//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::handlers::AppState;
use crate::models::user::{UserProfile, UserRole};
use crate::services::Session;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
    pub admin_code: Option<String>,
}

/// Create a new user account
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let user = state
        .services
        .auth_service
        .signup(
            &req.name,
            &req.email,
            &req.password,
            req.role.unwrap_or(UserRole::User),
            req.admin_code.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Verify credentials and hand out a session token
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> Result<Json<Session>> {
    let session = state
        .services
        .auth_service
        .signin(&req.email, &req.password)
        .await?;

    Ok(Json(session))
}
