//! Test data helpers for creating test objects
//!
//! Builders for ledger rows and payment details used across the test suite.
//! Ids are caller-chosen; these rows never touch the database unless a test
//! inserts them itself.

use chrono::{DateTime, TimeZone, Utc};

use EventBuddy::models::registration::{ApprovalStatus, PaymentStatus, Registration};
use EventBuddy::services::PaymentDetails;

/// A timestamp inside a known calendar month
pub fn at_month(year: i32, month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0).unwrap()
}

/// Baseline pending/pending registration
pub fn pending_registration(id: i64, event_id: i64, user_id: i64) -> Registration {
    let now = Utc::now();
    Registration {
        id,
        event_id,
        user_id,
        status: ApprovalStatus::Pending,
        registration_date: now,
        approved_by: None,
        approval_date: None,
        admin_message: None,
        payment_status: PaymentStatus::Pending,
        payment_id: None,
        amount_paid: 0.0,
        payment_date: None,
        payment_method: None,
        refund_id: None,
        refund_date: None,
        refund_amount: None,
        created_at: now,
        updated_at: now,
    }
}

/// Registration with a completed card payment at the given time
pub fn completed_registration(
    id: i64,
    event_id: i64,
    user_id: i64,
    amount: f64,
    paid_at: DateTime<Utc>,
) -> Registration {
    Registration {
        payment_status: PaymentStatus::Completed,
        payment_id: Some(format!("pay_{id}_testtest1")),
        amount_paid: amount,
        payment_date: Some(paid_at),
        payment_method: Some("card".to_string()),
        ..pending_registration(id, event_id, user_id)
    }
}

/// Registration whose payment was refunded; rejected as refunds always are
pub fn refunded_registration(
    id: i64,
    event_id: i64,
    user_id: i64,
    amount: f64,
    refund_amount: f64,
) -> Registration {
    let paid_at = Utc::now();
    Registration {
        status: ApprovalStatus::Rejected,
        payment_status: PaymentStatus::Refunded,
        refund_id: Some(format!("ref_{id}_testtest1")),
        refund_date: Some(paid_at),
        refund_amount: Some(refund_amount),
        ..completed_registration(id, event_id, user_id, amount, paid_at)
    }
}

/// Approved registration (free event path)
pub fn approved_registration(id: i64, event_id: i64, user_id: i64) -> Registration {
    Registration {
        status: ApprovalStatus::Approved,
        approved_by: Some(1),
        approval_date: Some(Utc::now()),
        ..pending_registration(id, event_id, user_id)
    }
}

/// Card details that pass the gateway's shape validation
pub fn valid_payment_details() -> PaymentDetails {
    PaymentDetails {
        card_number: "4242 4242 4242 4242".to_string(),
        expiry_date: "12/26".to_string(),
        cvv: "123".to_string(),
        cardholder_name: "Ada Lovelace".to_string(),
    }
}

/// Card details with a 15-digit number, which must fail validation
pub fn short_card_details() -> PaymentDetails {
    PaymentDetails {
        card_number: "424242424242424".to_string(),
        ..valid_payment_details()
    }
}
