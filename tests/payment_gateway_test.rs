//! Mock payment gateway contract tests
//!
//! The gateway validates card shape before consulting its decision source,
//! and its randomized outcomes become deterministic once a seeded decider is
//! injected.

mod helpers;

use std::sync::Arc;

use assert_matches::assert_matches;
use helpers::*;

use EventBuddy::services::PaymentGateway;
use EventBuddy::utils::errors::EventBuddyError;

#[tokio::test]
async fn authorize_returns_payment_reference_on_success() {
    let gateway = fixed_gateway(true);

    let auth = gateway
        .authorize(&valid_payment_details(), 25.0)
        .await
        .expect("authorization should succeed");

    assert!(auth.payment_id.starts_with("pay_"));
    assert_eq!(auth.payment_id.splitn(3, '_').count(), 3);
}

#[tokio::test]
async fn authorize_surfaces_decline() {
    let gateway = fixed_gateway(false);

    let err = gateway
        .authorize(&valid_payment_details(), 25.0)
        .await
        .unwrap_err();

    assert_matches!(err, EventBuddyError::PaymentDeclined(_));
}

#[tokio::test]
async fn fifteen_digit_card_fails_validation_not_decline() {
    // A declining decider would produce PaymentDeclined if it were ever
    // consulted; malformed input must fail earlier with a validation error.
    let gateway = fixed_gateway(false);

    let err = gateway
        .authorize(&short_card_details(), 25.0)
        .await
        .unwrap_err();

    assert_matches!(err, EventBuddyError::PaymentValidation(_));
}

#[tokio::test]
async fn card_number_with_spaces_is_accepted() {
    let gateway = fixed_gateway(true);

    let mut details = valid_payment_details();
    details.card_number = "4242424242424242".to_string();
    assert!(gateway.authorize(&details, 10.0).await.is_ok());

    details.card_number = "4242 4242 4242 4242".to_string();
    assert!(gateway.authorize(&details, 10.0).await.is_ok());
}

#[tokio::test]
async fn seeded_decider_makes_outcomes_reproducible() {
    let run = |seed: u64| async move {
        let gateway = PaymentGateway::with_decider(
            instant_payment_config(),
            Arc::new(SeededDecider::new(seed)),
        );
        let mut outcomes = Vec::new();
        for _ in 0..20 {
            outcomes.push(
                gateway
                    .authorize(&valid_payment_details(), 25.0)
                    .await
                    .is_ok(),
            );
        }
        outcomes
    };

    let first = run(7).await;
    let second = run(7).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn refund_returns_refund_reference_on_success() {
    let gateway = fixed_gateway(true);

    let receipt = gateway
        .refund("pay_1700000000000_abcdefghi", 25.0)
        .await
        .expect("refund should succeed");

    assert!(receipt.refund_id.starts_with("ref_"));
}

#[tokio::test]
async fn refund_surfaces_decline() {
    let gateway = fixed_gateway(false);

    let err = gateway
        .refund("pay_1700000000000_abcdefghi", 25.0)
        .await
        .unwrap_err();

    assert_matches!(err, EventBuddyError::RefundDeclined(_));
}
