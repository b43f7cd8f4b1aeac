//! Payment endpoints for registrants

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::handlers::AppState;
use crate::middleware::AuthUser;
use crate::models::analytics::PaymentStats;
use crate::models::registration::RegistrationDetails;
use crate::services::PaymentDetails;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    pub event_id: i64,
    pub amount: f64,
    pub payment_data: PaymentDetails,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentResponse {
    pub message: String,
    pub registration_id: i64,
    pub payment_id: Option<String>,
}

/// Pay for a paid event and create the registration in one step.
///
/// The registration only exists if the authorization succeeded.
pub async fn process_payment(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ProcessPaymentRequest>,
) -> Result<(StatusCode, Json<ProcessPaymentResponse>)> {
    let registration = state
        .services
        .registration_service
        .register_paid(claims.user_id, req.event_id, req.amount, &req.payment_data)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProcessPaymentResponse {
            message: "Payment successful and registration created".to_string(),
            registration_id: registration.id,
            payment_id: registration.payment_id,
        }),
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListResponse {
    pub payments: Vec<RegistrationDetails>,
    pub stats: PaymentStats,
}

/// The authenticated user's payments with summary stats
pub async fn list_own_payments(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<PaymentListResponse>> {
    let (payments, stats) = state
        .services
        .analytics_service
        .payments_for_user(claims.user_id)
        .await?;

    Ok(Json(PaymentListResponse { payments, stats }))
}
