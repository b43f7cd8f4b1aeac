//! Registration ledger service
//!
//! Owns the two registration state machines and their side effects:
//!
//! - approval: pending -> approved | rejected (both terminal); approval
//!   atomically bumps the event's participant counter
//! - payment: pending -> completed on authorization (declined payments
//!   persist nothing), completed -> refunded on an admin refund, which also
//!   forces the approval status to rejected

use tracing::info;

use crate::database::{EventRepository, RegistrationRepository};
use crate::models::registration::{
    CreateRegistrationRequest, PaymentStatus, Registration, RegistrationDecision,
    RegistrationDetails,
};
use crate::services::payment::{PaymentDetails, PaymentGateway};
use crate::utils::errors::{EventBuddyError, Result};
use crate::utils::logging::{log_admin_action, log_registration_transition};

#[derive(Clone)]
pub struct RegistrationService {
    registrations: RegistrationRepository,
    events: EventRepository,
    gateway: PaymentGateway,
}

impl RegistrationService {
    pub fn new(
        registrations: RegistrationRepository,
        events: EventRepository,
        gateway: PaymentGateway,
    ) -> Self {
        Self {
            registrations,
            events,
            gateway,
        }
    }

    /// Register for a free event.
    ///
    /// The registration starts pending approval; the payment status keeps
    /// its default and is never consulted for free events.
    pub async fn register_free(&self, user_id: i64, event_id: i64) -> Result<Registration> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(EventBuddyError::EventNotFound { event_id })?;

        if !event.is_free {
            return Err(EventBuddyError::InvalidInput(
                "This event requires payment to register".to_string()
            ));
        }

        if self
            .registrations
            .find_by_event_and_user(event_id, user_id)
            .await?
            .is_some()
        {
            return Err(EventBuddyError::AlreadyRegistered);
        }

        // The unique index still backstops the pre-check under races.
        let registration = self
            .registrations
            .create(CreateRegistrationRequest::free(event_id, user_id))
            .await?;

        info!(
            registration_id = registration.id,
            event_id = event_id,
            user_id = user_id,
            "Free registration created"
        );
        Ok(registration)
    }

    /// Register for a paid event.
    ///
    /// The requested amount must exactly match the event's stored price and
    /// the event must not be free; both are checked before the gateway is
    /// invoked. The ledger row is only written after a successful
    /// authorization, so a declined payment leaves no trace.
    pub async fn register_paid(
        &self,
        user_id: i64,
        event_id: i64,
        amount: f64,
        details: &PaymentDetails,
    ) -> Result<Registration> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EventBuddyError::InvalidInput(
                "Invalid payment amount".to_string()
            ));
        }

        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(EventBuddyError::EventNotFound { event_id })?;

        if event.is_free || event.price != amount {
            return Err(EventBuddyError::AmountMismatch {
                expected: event.effective_price(),
                requested: amount,
            });
        }

        if self
            .registrations
            .find_by_event_and_user(event_id, user_id)
            .await?
            .is_some()
        {
            return Err(EventBuddyError::AlreadyRegistered);
        }

        let authorization = self.gateway.authorize(details, amount).await?;

        let registration = self
            .registrations
            .create(CreateRegistrationRequest::paid(
                event_id,
                user_id,
                authorization.payment_id,
                amount,
                "card".to_string(),
            ))
            .await?;

        info!(
            registration_id = registration.id,
            event_id = event_id,
            user_id = user_id,
            amount = amount,
            "Paid registration created"
        );
        Ok(registration)
    }

    /// The whole ledger with registrant and event details, newest first
    pub async fn list_all(&self) -> Result<Vec<RegistrationDetails>> {
        self.registrations.find_all().await
    }

    /// Decide a pending registration.
    ///
    /// Approved and rejected are terminal, so a second decision is refused.
    /// Approving bumps the event's participant counter with an atomic
    /// storage-layer increment.
    pub async fn decide(
        &self,
        admin_id: i64,
        registration_id: i64,
        decision: RegistrationDecision,
        message: Option<String>,
    ) -> Result<Registration> {
        let registration = self
            .registrations
            .find_by_id(registration_id)
            .await?
            .ok_or(EventBuddyError::RegistrationNotFound { registration_id })?;

        let target = crate::models::registration::ApprovalStatus::from(decision);
        if registration.status.is_terminal() {
            return Err(EventBuddyError::InvalidStateTransition {
                from: registration.status.to_string(),
                to: target.to_string(),
            });
        }

        let updated = self
            .registrations
            .apply_decision(registration_id, target, admin_id, message)
            .await?;

        log_registration_transition(
            registration_id,
            "status",
            &registration.status.to_string(),
            &updated.status.to_string(),
            Some(admin_id),
        );

        if decision == RegistrationDecision::Approved {
            let event = self.events.increment_participants(updated.event_id).await?;
            info!(
                event_id = event.id,
                current_participants = event.current_participants,
                "Participant count incremented"
            );
        }

        Ok(updated)
    }

    /// Refund a completed payment, fully or partially.
    ///
    /// Only payment status exactly `completed` is refundable; a second
    /// refund of the same registration fails here. A successful refund also
    /// rejects the registration, cancelling attendance.
    pub async fn refund(
        &self,
        admin_id: i64,
        registration_id: i64,
        amount: f64,
    ) -> Result<Registration> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EventBuddyError::InvalidInput(
                "Invalid refund amount".to_string()
            ));
        }

        let registration = self
            .registrations
            .find_by_id(registration_id)
            .await?
            .ok_or(EventBuddyError::RegistrationNotFound { registration_id })?;

        if registration.payment_status != PaymentStatus::Completed {
            return Err(EventBuddyError::RefundNotAllowed);
        }

        let payment_id = registration
            .payment_id
            .as_deref()
            .ok_or(EventBuddyError::RefundNotAllowed)?;

        let receipt = self.gateway.refund(payment_id, amount).await?;

        let updated = self
            .registrations
            .apply_refund(registration_id, &receipt.refund_id, amount)
            .await?;

        log_registration_transition(
            registration_id,
            "payment_status",
            &registration.payment_status.to_string(),
            &updated.payment_status.to_string(),
            Some(admin_id),
        );
        log_admin_action(
            admin_id,
            "refund",
            Some(&registration_id.to_string()),
            Some(&format!("amount {amount}")),
        );

        Ok(updated)
    }
}
