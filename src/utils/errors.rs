//! Error handling for EventBuddy
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy, including the mapping to
//! HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the EventBuddy application
#[derive(Error, Debug)]
pub enum EventBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Registration not found: {registration_id}")]
    RegistrationNotFound { registration_id: i64 },

    #[error("Already registered for this event")]
    AlreadyRegistered,

    #[error("Invalid payment amount: expected {expected}, got {requested}")]
    AmountMismatch { expected: f64, requested: f64 },

    #[error("Invalid payment details: {0}")]
    PaymentValidation(String),

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    #[error("Refund declined: {0}")]
    RefundDeclined(String),

    #[error("Cannot refund non-completed payment")]
    RefundNotAllowed,

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for EventBuddy operations
pub type Result<T> = std::result::Result<T, EventBuddyError>;

impl EventBuddyError {
    /// Check if the error is recoverable by retrying the same request
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventBuddyError::Database(_) => false,
            EventBuddyError::Migration(_) => false,
            EventBuddyError::Config(_) => false,
            EventBuddyError::Authentication(_) => false,
            EventBuddyError::PermissionDenied(_) => false,
            EventBuddyError::UserNotFound { .. } => false,
            EventBuddyError::EventNotFound { .. } => false,
            EventBuddyError::RegistrationNotFound { .. } => false,
            EventBuddyError::AlreadyRegistered => false,
            EventBuddyError::AmountMismatch { .. } => false,
            EventBuddyError::PaymentValidation(_) => false,
            // Gateway outcomes are non-deterministic; the caller may retry
            // with the same details.
            EventBuddyError::PaymentDeclined(_) => true,
            EventBuddyError::RefundDeclined(_) => true,
            EventBuddyError::RefundNotAllowed => false,
            EventBuddyError::InvalidStateTransition { .. } => false,
            EventBuddyError::InvalidInput(_) => false,
            EventBuddyError::Serialization(_) => false,
            EventBuddyError::Io(_) => true,
            EventBuddyError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventBuddyError::Database(_) => ErrorSeverity::Critical,
            EventBuddyError::Migration(_) => ErrorSeverity::Critical,
            EventBuddyError::Config(_) => ErrorSeverity::Critical,
            EventBuddyError::Authentication(_) => ErrorSeverity::Warning,
            EventBuddyError::PermissionDenied(_) => ErrorSeverity::Warning,
            EventBuddyError::PaymentDeclined(_) => ErrorSeverity::Warning,
            EventBuddyError::RefundDeclined(_) => ErrorSeverity::Warning,
            EventBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            EventBuddyError::PaymentValidation(_) => ErrorSeverity::Info,
            EventBuddyError::AlreadyRegistered => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// HTTP status code for the error
    pub fn status_code(&self) -> StatusCode {
        match self {
            EventBuddyError::Authentication(_) => StatusCode::UNAUTHORIZED,
            EventBuddyError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            EventBuddyError::UserNotFound { .. }
            | EventBuddyError::EventNotFound { .. }
            | EventBuddyError::RegistrationNotFound { .. } => StatusCode::NOT_FOUND,
            EventBuddyError::AlreadyRegistered => StatusCode::CONFLICT,
            EventBuddyError::AmountMismatch { .. }
            | EventBuddyError::PaymentValidation(_)
            | EventBuddyError::PaymentDeclined(_)
            | EventBuddyError::RefundDeclined(_)
            | EventBuddyError::RefundNotAllowed
            | EventBuddyError::InvalidStateTransition { .. }
            | EventBuddyError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            EventBuddyError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            EventBuddyError::Database(_) => "DATABASE_ERROR",
            EventBuddyError::Migration(_) => "MIGRATION_ERROR",
            EventBuddyError::Config(_) => "CONFIG_ERROR",
            EventBuddyError::Authentication(_) => "UNAUTHORIZED",
            EventBuddyError::PermissionDenied(_) => "FORBIDDEN",
            EventBuddyError::UserNotFound { .. } => "USER_NOT_FOUND",
            EventBuddyError::EventNotFound { .. } => "EVENT_NOT_FOUND",
            EventBuddyError::RegistrationNotFound { .. } => "REGISTRATION_NOT_FOUND",
            EventBuddyError::AlreadyRegistered => "ALREADY_REGISTERED",
            EventBuddyError::AmountMismatch { .. } => "AMOUNT_MISMATCH",
            EventBuddyError::PaymentValidation(_) => "PAYMENT_VALIDATION_ERROR",
            EventBuddyError::PaymentDeclined(_) => "PAYMENT_DECLINED",
            EventBuddyError::RefundDeclined(_) => "REFUND_DECLINED",
            EventBuddyError::RefundNotAllowed => "REFUND_NOT_ALLOWED",
            EventBuddyError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            EventBuddyError::InvalidInput(_) => "INVALID_INPUT",
            EventBuddyError::Serialization(_) => "SERIALIZATION_ERROR",
            EventBuddyError::Io(_) => "IO_ERROR",
            EventBuddyError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

}

impl From<jsonwebtoken::errors::Error> for EventBuddyError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        EventBuddyError::Authentication(err.to_string())
    }
}

impl From<config::ConfigError> for EventBuddyError {
    fn from(err: config::ConfigError) -> Self {
        EventBuddyError::Config(err.to_string())
    }
}

impl IntoResponse for EventBuddyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let severity = self.severity();

        match severity {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                tracing::error!(error = %self, code = code, severity = %severity, "Request failed");
            }
            ErrorSeverity::Warning => {
                tracing::warn!(error = %self, code = code, severity = %severity, "Request refused");
            }
            ErrorSeverity::Info => {
                tracing::debug!(error = %self, code = code, severity = %severity, "Request rejected");
            }
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
                "retryable": self.is_recoverable(),
            }
        }));

        (status, body).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
