//! Registration ledger model
//!
//! A registration tracks two correlated but independent lifecycles: the
//! admin approval decision and the payment transaction state.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Admin decision state of a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "approval_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Approved and rejected are terminal; only pending registrations may
    /// still be decided.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApprovalStatus::Pending)
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "pending"),
            ApprovalStatus::Approved => write!(f, "approved"),
            ApprovalStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Transaction state of a registration's payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Failed => write!(f, "failed"),
            PaymentStatus::Refunded => write!(f, "refunded"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub status: ApprovalStatus,
    pub registration_date: DateTime<Utc>,
    pub approved_by: Option<i64>,
    pub approval_date: Option<DateTime<Utc>>,
    pub admin_message: Option<String>,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
    pub amount_paid: f64,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
    pub refund_id: Option<String>,
    pub refund_date: Option<DateTime<Utc>>,
    pub refund_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New ledger row. Payment fields are populated only for paid registrations
/// that already cleared the gateway; free registrations keep the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    pub event_id: i64,
    pub user_id: i64,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
    pub amount_paid: f64,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
}

impl CreateRegistrationRequest {
    /// Row for a free-event registration
    pub fn free(event_id: i64, user_id: i64) -> Self {
        Self {
            event_id,
            user_id,
            payment_status: PaymentStatus::Pending,
            payment_id: None,
            amount_paid: 0.0,
            payment_date: None,
            payment_method: None,
        }
    }

    /// Row for a paid registration whose authorization already succeeded
    pub fn paid(
        event_id: i64,
        user_id: i64,
        payment_id: String,
        amount: f64,
        method: String,
    ) -> Self {
        Self {
            event_id,
            user_id,
            payment_status: PaymentStatus::Completed,
            payment_id: Some(payment_id),
            amount_paid: amount,
            payment_date: Some(Utc::now()),
            payment_method: Some(method),
        }
    }
}

/// Admin decision on a pending registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationDecision {
    Approved,
    Rejected,
}

impl From<RegistrationDecision> for ApprovalStatus {
    fn from(decision: RegistrationDecision) -> Self {
        match decision {
            RegistrationDecision::Approved => ApprovalStatus::Approved,
            RegistrationDecision::Rejected => ApprovalStatus::Rejected,
        }
    }
}

/// A registration joined with event and registrant display fields
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub registration: Registration,
    pub event_title: String,
    pub event_date: DateTime<Utc>,
    pub event_location: String,
    pub user_name: String,
    pub user_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!ApprovalStatus::Pending.is_terminal());
        assert!(ApprovalStatus::Approved.is_terminal());
        assert!(ApprovalStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_free_request_defaults() {
        let req = CreateRegistrationRequest::free(1, 2);
        assert_eq!(req.payment_status, PaymentStatus::Pending);
        assert_eq!(req.amount_paid, 0.0);
        assert!(req.payment_id.is_none());
    }

    #[test]
    fn test_paid_request_is_completed() {
        let req = CreateRegistrationRequest::paid(1, 2, "pay_123".into(), 25.0, "card".into());
        assert_eq!(req.payment_status, PaymentStatus::Completed);
        assert_eq!(req.amount_paid, 25.0);
        assert!(req.payment_date.is_some());
    }
}
