//! Registration ledger integration tests
//!
//! These exercise the full service + repository stack against a real
//! PostgreSQL instance: either TEST_DATABASE_URL or a testcontainers
//! throwaway. Run with `cargo test -- --ignored` when one is available.

mod helpers;

use assert_matches::assert_matches;
use futures::future::join_all;
use helpers::*;
use serial_test::serial;

use EventBuddy::models::registration::{ApprovalStatus, PaymentStatus, RegistrationDecision};
use EventBuddy::models::user::UserRole;
use EventBuddy::services::RegistrationService;
use EventBuddy::utils::errors::EventBuddyError;

fn registration_service(db: &TestDatabase, approve_payments: bool) -> RegistrationService {
    let service = db.service();
    RegistrationService::new(
        service.registrations,
        service.events,
        fixed_gateway(approve_payments),
    )
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL) or Docker"]
async fn free_event_registration_and_approval() {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.unwrap();

    let admin = db.seed_user("Admin", "admin@example.com", UserRole::Admin).await;
    let user = db.seed_user("User", "user@example.com", UserRole::User).await;
    let event = db.seed_event(admin.id, true, 0.0).await;
    assert_eq!(event.current_participants, 0);

    let service = registration_service(&db, true);

    let registration = service.register_free(user.id, event.id).await.unwrap();
    assert_eq!(registration.status, ApprovalStatus::Pending);
    assert_eq!(registration.payment_status, PaymentStatus::Pending);

    let decided = service
        .decide(admin.id, registration.id, RegistrationDecision::Approved, None)
        .await
        .unwrap();
    assert_eq!(decided.status, ApprovalStatus::Approved);
    assert_eq!(decided.approved_by, Some(admin.id));
    assert!(decided.approval_date.is_some());

    let event = db.service().events.find_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(event.current_participants, 1);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL) or Docker"]
async fn second_registration_for_same_pair_conflicts() {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.unwrap();

    let admin = db.seed_user("Admin", "admin@example.com", UserRole::Admin).await;
    let user = db.seed_user("User", "user@example.com", UserRole::User).await;
    let event = db.seed_event(admin.id, true, 0.0).await;

    let service = registration_service(&db, true);
    service.register_free(user.id, event.id).await.unwrap();

    let err = service.register_free(user.id, event.id).await.unwrap_err();
    assert_matches!(err, EventBuddyError::AlreadyRegistered);

    // The unique index itself also rejects a direct insert, closing the
    // check-then-act window the pre-check cannot.
    let direct = db
        .service()
        .registrations
        .create(EventBuddy::models::CreateRegistrationRequest::free(
            event.id, user.id,
        ))
        .await;
    assert_matches!(direct.unwrap_err(), EventBuddyError::AlreadyRegistered);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL) or Docker"]
async fn paid_event_payment_and_refund_lifecycle() {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.unwrap();

    let admin = db.seed_user("Admin", "admin@example.com", UserRole::Admin).await;
    let user = db.seed_user("User", "user@example.com", UserRole::User).await;
    let event = db.seed_event(admin.id, false, 25.0).await;

    let service = registration_service(&db, true);

    let registration = service
        .register_paid(user.id, event.id, 25.0, &valid_payment_details())
        .await
        .unwrap();
    assert_eq!(registration.status, ApprovalStatus::Pending);
    assert_eq!(registration.payment_status, PaymentStatus::Completed);
    assert_eq!(registration.amount_paid, 25.0);
    assert!(registration.payment_id.is_some());

    let refunded = service.refund(admin.id, registration.id, 25.0).await.unwrap();
    assert_eq!(refunded.payment_status, PaymentStatus::Refunded);
    assert_eq!(refunded.status, ApprovalStatus::Rejected);
    assert_eq!(refunded.refund_amount, Some(25.0));
    assert!(refunded.refund_id.is_some());
    assert!(refunded.refund_date.is_some());

    // Refunded is terminal: a second refund is no longer a completed payment.
    let err = service.refund(admin.id, registration.id, 25.0).await.unwrap_err();
    assert_matches!(err, EventBuddyError::RefundNotAllowed);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL) or Docker"]
async fn declined_payment_persists_no_registration() {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.unwrap();

    let admin = db.seed_user("Admin", "admin@example.com", UserRole::Admin).await;
    let user = db.seed_user("User", "user@example.com", UserRole::User).await;
    let event = db.seed_event(admin.id, false, 25.0).await;

    let service = registration_service(&db, false);

    let err = service
        .register_paid(user.id, event.id, 25.0, &valid_payment_details())
        .await
        .unwrap_err();
    assert_matches!(err, EventBuddyError::PaymentDeclined(_));

    let row = db
        .service()
        .registrations
        .find_by_event_and_user(event.id, user.id)
        .await
        .unwrap();
    assert!(row.is_none());
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL) or Docker"]
async fn amount_mismatch_rejected_before_gateway() {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.unwrap();

    let admin = db.seed_user("Admin", "admin@example.com", UserRole::Admin).await;
    let user = db.seed_user("User", "user@example.com", UserRole::User).await;
    let paid_event = db.seed_event(admin.id, false, 25.0).await;
    let free_event = db.seed_event(admin.id, true, 0.0).await;

    // A declining gateway proves the gateway is never reached.
    let service = registration_service(&db, false);

    let err = service
        .register_paid(user.id, paid_event.id, 10.0, &valid_payment_details())
        .await
        .unwrap_err();
    assert_matches!(err, EventBuddyError::AmountMismatch { .. });

    let err = service
        .register_paid(user.id, free_event.id, 25.0, &valid_payment_details())
        .await
        .unwrap_err();
    assert_matches!(err, EventBuddyError::AmountMismatch { .. });
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL) or Docker"]
async fn decisions_on_decided_registrations_are_refused() {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.unwrap();

    let admin = db.seed_user("Admin", "admin@example.com", UserRole::Admin).await;
    let user = db.seed_user("User", "user@example.com", UserRole::User).await;
    let event = db.seed_event(admin.id, true, 0.0).await;

    let service = registration_service(&db, true);
    let registration = service.register_free(user.id, event.id).await.unwrap();

    service
        .decide(admin.id, registration.id, RegistrationDecision::Approved, None)
        .await
        .unwrap();

    let err = service
        .decide(admin.id, registration.id, RegistrationDecision::Rejected, None)
        .await
        .unwrap_err();
    assert_matches!(err, EventBuddyError::InvalidStateTransition { .. });

    // Re-approval would double-count the participant; refused the same way.
    let err = service
        .decide(admin.id, registration.id, RegistrationDecision::Approved, None)
        .await
        .unwrap_err();
    assert_matches!(err, EventBuddyError::InvalidStateTransition { .. });

    let event = db.service().events.find_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(event.current_participants, 1);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL) or Docker"]
async fn concurrent_approvals_never_lose_counter_updates() {
    let db = TestDatabase::new().await.expect("test database");
    db.cleanup().await.unwrap();

    let admin = db.seed_user("Admin", "admin@example.com", UserRole::Admin).await;
    let event = db.seed_event(admin.id, true, 0.0).await;

    let service = registration_service(&db, true);

    let mut registration_ids = Vec::new();
    for i in 0..8 {
        let user = db
            .seed_user(&format!("User {i}"), &format!("user{i}@example.com"), UserRole::User)
            .await;
        let registration = service.register_free(user.id, event.id).await.unwrap();
        registration_ids.push(registration.id);
    }

    let approvals = registration_ids.into_iter().map(|id| {
        let service = service.clone();
        async move {
            service
                .decide(admin.id, id, RegistrationDecision::Approved, None)
                .await
        }
    });
    for result in join_all(approvals).await {
        result.unwrap();
    }

    let event = db.service().events.find_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(event.current_participants, 8);
}
