//! Admin endpoints: registration decisions, refunds, listings, analytics

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::handlers::AppState;
use crate::handlers::payments::PaymentListResponse;
use crate::middleware::AdminUser;
use crate::models::analytics::{
    ActivityEntry, AdminDashboardStats, AggregateReport, DateRange,
};
use crate::models::event::EventWithCounts;
use crate::models::registration::{Registration, RegistrationDecision, RegistrationDetails};
use crate::utils::errors::Result;

/// All registrations with registrant and event details (admin)
pub async fn list_registrations(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RegistrationDetails>>> {
    let registrations = state.services.registration_service.list_all().await?;
    Ok(Json(registrations))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecideRequest {
    pub registration_id: i64,
    pub status: RegistrationDecision,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecideResponse {
    pub message: String,
    pub registration: Registration,
}

/// Approve or reject a pending registration
pub async fn decide_registration(
    AdminUser(claims): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<DecideRequest>,
) -> Result<Json<DecideResponse>> {
    let registration = state
        .services
        .registration_service
        .decide(claims.user_id, req.registration_id, req.status, req.message)
        .await?;

    Ok(Json(DecideResponse {
        message: format!("Registration {} successfully", registration.status),
        registration,
    }))
}

/// All payment-bearing registrations with summary stats (admin)
pub async fn list_payments(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<PaymentListResponse>> {
    let (payments, stats) = state.services.analytics_service.payments_overview().await?;
    Ok(Json(PaymentListResponse { payments, stats }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    pub registration_id: i64,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    pub message: String,
    pub refund_id: Option<String>,
    pub registration: Registration,
}

/// Refund a completed payment; the registration is rejected as a side effect
pub async fn refund_payment(
    AdminUser(claims): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<RefundRequest>,
) -> Result<Json<RefundResponse>> {
    let registration = state
        .services
        .registration_service
        .refund(claims.user_id, req.registration_id, req.amount)
        .await?;

    Ok(Json(RefundResponse {
        message: "Refund processed successfully".to_string(),
        refund_id: registration.refund_id.clone(),
        registration,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// The aggregate report, optionally windowed by creation date
pub async fn analytics(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AggregateReport>> {
    let range = match (query.start_date, query.end_date) {
        (Some(start), Some(end)) => Some(DateRange {
            start: Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN)),
            end: Utc.from_utc_datetime(&end.and_time(
                NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
            )),
        }),
        _ => None,
    };

    let report = state.services.analytics_service.get_analytics(range).await?;
    Ok(Json(report))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardResponse {
    pub stats: AdminDashboardStats,
    pub admin_events: Vec<EventWithCounts>,
    pub recent_activities: Vec<ActivityEntry>,
}

/// Platform counters, the admin's events, and recent registrations
pub async fn dashboard(
    AdminUser(claims): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<AdminDashboardResponse>> {
    let (stats, admin_events, recent_activities) = state
        .services
        .analytics_service
        .admin_dashboard(claims.user_id)
        .await?;

    Ok(Json(AdminDashboardResponse {
        stats,
        admin_events,
        recent_activities,
    }))
}
