//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the EventBuddy application.

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "eventbuddy.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log registration lifecycle transitions with structured data
pub fn log_registration_transition(
    registration_id: i64,
    field: &str,
    from: &str,
    to: &str,
    actor_id: Option<i64>,
) {
    info!(
        registration_id = registration_id,
        field = field,
        from = from,
        to = to,
        actor_id = actor_id,
        "Registration transition"
    );
}

/// Log payment gateway outcomes
pub fn log_gateway_outcome(operation: &str, amount: f64, success: bool, reference: Option<&str>) {
    if success {
        info!(
            operation = operation,
            amount = amount,
            reference = reference,
            "Gateway operation succeeded"
        );
    } else {
        warn!(
            operation = operation,
            amount = amount,
            "Gateway operation declined"
        );
    }
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}
