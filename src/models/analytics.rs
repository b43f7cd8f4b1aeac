//! Derived reporting models
//!
//! These are computed on demand from the registration ledger and never
//! persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional creation-date window for analytics queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Headline numbers over the registration ledger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total_registrations: usize,
    pub approved_registrations: usize,
    pub completed_payments: usize,
    pub refunded_payments: usize,
    pub total_revenue: f64,
    pub total_refunded: f64,
    pub average_transaction_value: f64,
    /// approved / total, as a percentage
    pub conversion_rate: f64,
}

/// Revenue bucketed by calendar month of the payment date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub month: String,
    pub transactions: usize,
    pub revenue: f64,
}

/// An event ranked by summed revenue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRevenue {
    pub event_id: i64,
    pub title: String,
    pub registrations: usize,
    pub average_price: f64,
    pub total_revenue: f64,
}

/// Share of completed transactions per payment method
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodShare {
    pub method: String,
    pub count: usize,
    pub percentage: f64,
}

/// The full aggregate report served to the admin analytics view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub overview: AnalyticsOverview,
    pub revenue_by_month: Vec<MonthlyRevenue>,
    pub top_events: Vec<EventRevenue>,
    pub payment_methods: Vec<PaymentMethodShare>,
}

/// Per-payment summary stats for payment listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    pub total_revenue: f64,
    pub completed_payments: usize,
    pub pending_payments: usize,
    pub failed_payments: usize,
    pub refunded_payments: usize,
    pub total_refunded: f64,
}

/// Registrant-facing dashboard numbers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboardStats {
    pub total_registered: usize,
    pub approved_registrations: usize,
    pub upcoming_count: usize,
}

/// Admin dashboard numbers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardStats {
    pub total_users: i64,
    pub total_events: i64,
    pub active_events: i64,
    pub pending_approvals: i64,
}

/// Recent-registration entry for the admin activity feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub message: String,
    pub time: DateTime<Utc>,
    pub status: String,
}
