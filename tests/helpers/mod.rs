//! Test helpers module
//!
//! This module provides utilities and helpers for testing the EventBuddy
//! application: test data builders, deterministic gateway deciders, and
//! database setup for the integration suite.

pub mod database_helper;
pub mod test_data;

pub use database_helper::*;
pub use test_data::*;

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use EventBuddy::config::PaymentConfig;
use EventBuddy::services::{PaymentDecider, PaymentGateway};

/// Decider that always returns the configured answer
pub struct FixedDecider(pub bool);

impl PaymentDecider for FixedDecider {
    fn approve(&self, _success_rate: f64) -> bool {
        self.0
    }
}

/// Decider backed by a seeded generator, for reproducible random outcomes
pub struct SeededDecider {
    rng: Mutex<StdRng>,
}

impl SeededDecider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl PaymentDecider for SeededDecider {
    fn approve(&self, success_rate: f64) -> bool {
        self.rng.lock().expect("decider lock poisoned").gen::<f64>() < success_rate
    }
}

/// Gateway config without artificial latency
pub fn instant_payment_config() -> PaymentConfig {
    PaymentConfig {
        latency_ms: 0,
        authorize_success_rate: 0.9,
        refund_success_rate: 0.95,
    }
}

/// A gateway whose every decision is fixed
pub fn fixed_gateway(approve: bool) -> PaymentGateway {
    PaymentGateway::with_decider(
        instant_payment_config(),
        std::sync::Arc::new(FixedDecider(approve)),
    )
}
