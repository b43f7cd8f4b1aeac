//! Mock payment gateway
//!
//! Simulates an external payment processor: every call sleeps a configured
//! latency to model the network round-trip, then applies a randomized
//! approval gate. Card details are shape-validated first and fail fast
//! without consuming the random outcome, so a malformed request never counts
//! against the success rate. A production gateway integration would replace
//! the gate with a real API call but must keep the validate-then-decide
//! order and the same error shapes.

use std::sync::Arc;
use chrono::Utc;
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PaymentConfig;
use crate::utils::errors::{EventBuddyError, Result};
use crate::utils::helpers::{mask_card_number, normalize_card_number};
use crate::utils::logging::log_gateway_outcome;

/// Card details submitted for authorization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
}

/// Successful authorization outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAuthorization {
    pub payment_id: String,
}

/// Successful refund outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundReceipt {
    pub refund_id: String,
}

/// Source of approve/decline decisions.
///
/// The default implementation rolls a random number; tests inject a
/// deterministic one so gateway outcomes are reproducible.
pub trait PaymentDecider: Send + Sync {
    fn approve(&self, success_rate: f64) -> bool;
}

/// Random decision source used in production
#[derive(Debug, Default)]
pub struct RandomDecider;

impl PaymentDecider for RandomDecider {
    fn approve(&self, success_rate: f64) -> bool {
        rand::thread_rng().gen::<f64>() < success_rate
    }
}

/// The mock gateway itself
#[derive(Clone)]
pub struct PaymentGateway {
    config: PaymentConfig,
    decider: Arc<dyn PaymentDecider>,
}

impl PaymentGateway {
    /// Create a gateway with the production random decision source
    pub fn new(config: PaymentConfig) -> Self {
        Self::with_decider(config, Arc::new(RandomDecider))
    }

    /// Create a gateway with an injected decision source
    pub fn with_decider(config: PaymentConfig, decider: Arc<dyn PaymentDecider>) -> Self {
        Self { config, decider }
    }

    /// Authorize a payment for the given amount.
    ///
    /// Shape validation happens before the latency sleep and before the
    /// decision gate is consulted.
    pub async fn authorize(&self, details: &PaymentDetails, amount: f64) -> Result<PaymentAuthorization> {
        validate_details(details)?;

        debug!(
            card = %mask_card_number(&details.card_number),
            amount = amount,
            "Authorizing payment"
        );

        self.simulate_round_trip().await;

        if self.decider.approve(self.config.authorize_success_rate) {
            let payment_id = transaction_id("pay");
            log_gateway_outcome("authorize", amount, true, Some(&payment_id));
            Ok(PaymentAuthorization { payment_id })
        } else {
            log_gateway_outcome("authorize", amount, false, None);
            Err(EventBuddyError::PaymentDeclined("Payment declined".to_string()))
        }
    }

    /// Refund a previously authorized payment, fully or partially
    pub async fn refund(&self, payment_id: &str, amount: f64) -> Result<RefundReceipt> {
        debug!(payment_id = payment_id, amount = amount, "Processing refund");

        self.simulate_round_trip().await;

        if self.decider.approve(self.config.refund_success_rate) {
            let refund_id = transaction_id("ref");
            log_gateway_outcome("refund", amount, true, Some(&refund_id));
            Ok(RefundReceipt { refund_id })
        } else {
            log_gateway_outcome("refund", amount, false, None);
            Err(EventBuddyError::RefundDeclined("Refund processing failed".to_string()))
        }
    }

    async fn simulate_round_trip(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }
}

/// Shape-validate card details, failing with a field-level reason
fn validate_details(details: &PaymentDetails) -> Result<()> {
    if details.cardholder_name.trim().is_empty() {
        return Err(EventBuddyError::PaymentValidation(
            "Cardholder name is required".to_string()
        ));
    }

    let card_number = normalize_card_number(&details.card_number);
    if !matches_pattern(r"^\d{16}$", &card_number)? {
        return Err(EventBuddyError::PaymentValidation(
            "Invalid card number".to_string()
        ));
    }

    if !matches_pattern(r"^\d{2}/\d{2}$", &details.expiry_date)? {
        return Err(EventBuddyError::PaymentValidation(
            "Invalid expiry date format (MM/YY)".to_string()
        ));
    }

    if !matches_pattern(r"^\d{3,4}$", &details.cvv)? {
        return Err(EventBuddyError::PaymentValidation(
            "Invalid CVV".to_string()
        ));
    }

    Ok(())
}

fn matches_pattern(pattern: &str, input: &str) -> Result<bool> {
    let regex = regex::Regex::new(pattern)
        .map_err(|_| EventBuddyError::Config("Invalid regex pattern".to_string()))?;
    Ok(regex.is_match(input))
}

/// Transaction ids in the gateway's `<prefix>_<millis>_<nonce>` format
fn transaction_id(prefix: &str) -> String {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), nonce.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// Decider that always returns the configured answer
    struct FixedDecider(bool);

    impl PaymentDecider for FixedDecider {
        fn approve(&self, _success_rate: f64) -> bool {
            self.0
        }
    }

    /// Decider that panics if consulted; used to prove validation fails fast
    struct UnreachableDecider;

    impl PaymentDecider for UnreachableDecider {
        fn approve(&self, _success_rate: f64) -> bool {
            panic!("decision source must not be consulted for malformed input");
        }
    }

    fn test_config() -> PaymentConfig {
        PaymentConfig {
            latency_ms: 0,
            authorize_success_rate: 0.9,
            refund_success_rate: 0.95,
        }
    }

    fn valid_details() -> PaymentDetails {
        PaymentDetails {
            card_number: "4242 4242 4242 4242".to_string(),
            expiry_date: "12/26".to_string(),
            cvv: "123".to_string(),
            cardholder_name: "Ada Lovelace".to_string(),
        }
    }

    #[tokio::test]
    async fn test_authorize_success_produces_payment_id() {
        let gateway = PaymentGateway::with_decider(test_config(), Arc::new(FixedDecider(true)));
        let auth = gateway.authorize(&valid_details(), 25.0).await.unwrap();
        assert!(auth.payment_id.starts_with("pay_"));
    }

    #[tokio::test]
    async fn test_authorize_decline() {
        let gateway = PaymentGateway::with_decider(test_config(), Arc::new(FixedDecider(false)));
        let err = gateway.authorize(&valid_details(), 25.0).await.unwrap_err();
        assert_matches!(err, EventBuddyError::PaymentDeclined(_));
    }

    #[tokio::test]
    async fn test_short_card_number_fails_before_decision() {
        let gateway =
            PaymentGateway::with_decider(test_config(), Arc::new(UnreachableDecider));
        let mut details = valid_details();
        details.card_number = "4242 4242 4242 424".to_string();

        let err = gateway.authorize(&details, 25.0).await.unwrap_err();
        assert_matches!(err, EventBuddyError::PaymentValidation(_));
    }

    #[tokio::test]
    async fn test_bad_expiry_rejected() {
        let gateway =
            PaymentGateway::with_decider(test_config(), Arc::new(UnreachableDecider));
        let mut details = valid_details();
        details.expiry_date = "2026-12".to_string();

        let err = gateway.authorize(&details, 25.0).await.unwrap_err();
        assert_matches!(err, EventBuddyError::PaymentValidation(_));
    }

    #[tokio::test]
    async fn test_bad_cvv_rejected() {
        let gateway =
            PaymentGateway::with_decider(test_config(), Arc::new(UnreachableDecider));
        let mut details = valid_details();
        details.cvv = "12".to_string();

        let err = gateway.authorize(&details, 25.0).await.unwrap_err();
        assert_matches!(err, EventBuddyError::PaymentValidation(_));
    }

    #[tokio::test]
    async fn test_missing_cardholder_rejected() {
        let gateway =
            PaymentGateway::with_decider(test_config(), Arc::new(UnreachableDecider));
        let mut details = valid_details();
        details.cardholder_name = "  ".to_string();

        let err = gateway.authorize(&details, 25.0).await.unwrap_err();
        assert_matches!(err, EventBuddyError::PaymentValidation(_));
    }

    #[tokio::test]
    async fn test_refund_success_produces_refund_id() {
        let gateway = PaymentGateway::with_decider(test_config(), Arc::new(FixedDecider(true)));
        let receipt = gateway.refund("pay_12345_abcdefghi", 25.0).await.unwrap();
        assert!(receipt.refund_id.starts_with("ref_"));
    }

    #[tokio::test]
    async fn test_refund_decline() {
        let gateway = PaymentGateway::with_decider(test_config(), Arc::new(FixedDecider(false)));
        let err = gateway.refund("pay_12345_abcdefghi", 25.0).await.unwrap_err();
        assert_matches!(err, EventBuddyError::RefundDeclined(_));
    }
}
