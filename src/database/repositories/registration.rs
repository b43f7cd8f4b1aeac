//! Registration ledger repository
//!
//! One row per (event, user) pair. The unique index on that pair is the
//! authoritative duplicate guard; application-level pre-checks only exist to
//! produce friendlier errors ahead of the constraint.

use sqlx::PgPool;
use chrono::{DateTime, Utc};
use crate::models::registration::{
    Registration, RegistrationDetails, ApprovalStatus, PaymentStatus, CreateRegistrationRequest,
};
use crate::utils::errors::EventBuddyError;

const REGISTRATION_COLUMNS: &str = "id, event_id, user_id, status, registration_date, approved_by, approval_date, admin_message, payment_status, payment_id, amount_paid, payment_date, payment_method, refund_id, refund_date, refund_amount, created_at, updated_at";

const DETAILS_COLUMNS: &str = r#"
    r.id, r.event_id, r.user_id, r.status, r.registration_date, r.approved_by,
    r.approval_date, r.admin_message, r.payment_status, r.payment_id, r.amount_paid,
    r.payment_date, r.payment_method, r.refund_id, r.refund_date, r.refund_amount,
    r.created_at, r.updated_at,
    e.title AS event_title, e.event_date AS event_date, e.location AS event_location,
    u.name AS user_name, u.email AS user_email
"#;

/// Postgres unique-violation SQLSTATE
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new ledger row.
    ///
    /// A duplicate (event, user) pair trips the unique index and surfaces as
    /// `AlreadyRegistered`; this is what closes the check-then-insert race.
    pub async fn create(&self, request: CreateRegistrationRequest) -> Result<Registration, EventBuddyError> {
        let result = sqlx::query_as::<_, Registration>(&format!(
            r#"
            INSERT INTO registrations (event_id, user_id, status, registration_date, payment_status, payment_id, amount_paid, payment_date, payment_method, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(request.event_id)
        .bind(request.user_id)
        .bind(ApprovalStatus::Pending)
        .bind(Utc::now())
        .bind(request.payment_status)
        .bind(request.payment_id)
        .bind(request.amount_paid)
        .bind(request.payment_date)
        .bind(request.payment_method)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(registration) => Ok(registration),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                Err(EventBuddyError::AlreadyRegistered)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find registration by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Registration>, EventBuddyError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Find the registration for an (event, user) pair
    pub async fn find_by_event_and_user(&self, event_id: i64, user_id: i64) -> Result<Option<Registration>, EventBuddyError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 AND user_id = $2"
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// A user's registrations, newest first, with event details
    pub async fn find_by_user(&self, user_id: i64) -> Result<Vec<RegistrationDetails>, EventBuddyError> {
        let registrations = sqlx::query_as::<_, RegistrationDetails>(&format!(
            r#"
            SELECT {DETAILS_COLUMNS}
            FROM registrations r
            INNER JOIN events e ON e.id = r.event_id
            INNER JOIN users u ON u.id = r.user_id
            WHERE r.user_id = $1
            ORDER BY r.registration_date DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// All registrations, newest first, with event and registrant details
    pub async fn find_all(&self) -> Result<Vec<RegistrationDetails>, EventBuddyError> {
        let registrations = sqlx::query_as::<_, RegistrationDetails>(&format!(
            r#"
            SELECT {DETAILS_COLUMNS}
            FROM registrations r
            INNER JOIN events e ON e.id = r.event_id
            INNER JOIN users u ON u.id = r.user_id
            ORDER BY r.registration_date DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Registrations created inside a date window (analytics input)
    pub async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Registration>, EventBuddyError> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE created_at >= $1 AND created_at <= $2"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// The whole ledger, unjoined (analytics input)
    pub async fn find_all_plain(&self) -> Result<Vec<Registration>, EventBuddyError> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Rows that carry a payment (admin payment listing)
    pub async fn find_payments(&self) -> Result<Vec<RegistrationDetails>, EventBuddyError> {
        let registrations = sqlx::query_as::<_, RegistrationDetails>(&format!(
            r#"
            SELECT {DETAILS_COLUMNS}
            FROM registrations r
            INNER JOIN events e ON e.id = r.event_id
            INNER JOIN users u ON u.id = r.user_id
            WHERE r.amount_paid > 0
            ORDER BY r.payment_date DESC NULLS LAST
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Record an admin decision on a registration
    pub async fn apply_decision(
        &self,
        id: i64,
        status: ApprovalStatus,
        approver_id: i64,
        admin_message: Option<String>,
    ) -> Result<Registration, EventBuddyError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            UPDATE registrations
            SET status = $2,
                approved_by = $3,
                approval_date = $4,
                admin_message = COALESCE($5, admin_message),
                updated_at = $4
            WHERE id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(approver_id)
        .bind(Utc::now())
        .bind(admin_message)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(EventBuddyError::RegistrationNotFound { registration_id: id })?;

        Ok(registration)
    }

    /// Record a successful refund: payment becomes refunded and the
    /// registration itself is rejected, cancelling attendance.
    pub async fn apply_refund(
        &self,
        id: i64,
        refund_id: &str,
        refund_amount: f64,
    ) -> Result<Registration, EventBuddyError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            UPDATE registrations
            SET payment_status = $2,
                refund_id = $3,
                refund_date = $4,
                refund_amount = $5,
                status = $6,
                updated_at = $4
            WHERE id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(PaymentStatus::Refunded)
        .bind(refund_id)
        .bind(Utc::now())
        .bind(refund_amount)
        .bind(ApprovalStatus::Rejected)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(EventBuddyError::RegistrationNotFound { registration_id: id })?;

        Ok(registration)
    }

    /// Count registrations with the given approval status
    pub async fn count_by_status(&self, status: ApprovalStatus) -> Result<i64, EventBuddyError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE status = $1"
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Per-event registration counters for the admin dashboard
    pub async fn count_for_event(&self, event_id: i64) -> Result<(i64, i64), EventBuddyError> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = 'pending')
            FROM registrations
            WHERE event_id = $1
            "#
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Most recent registrations with details, for the activity feed
    pub async fn find_recent(&self, limit: i64) -> Result<Vec<RegistrationDetails>, EventBuddyError> {
        let registrations = sqlx::query_as::<_, RegistrationDetails>(&format!(
            r#"
            SELECT {DETAILS_COLUMNS}
            FROM registrations r
            INNER JOIN events e ON e.id = r.event_id
            INNER JOIN users u ON u.id = r.user_id
            ORDER BY r.created_at DESC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }
}
