//! EventBuddy event-registration platform
//!
//! Administrators publish free or paid events; users register and, for paid
//! events, clear a mock payment gateway; admins approve or reject pending
//! registrations and issue refunds. This library provides the core services
//! (registration ledger, payment gateway, aggregation reporter, identity and
//! access), their PostgreSQL persistence layer, and the HTTP API surface.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventBuddyError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use handlers::{create_router, AppState};
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
