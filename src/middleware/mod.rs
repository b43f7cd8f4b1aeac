//! Middleware module
//!
//! Cross-cutting request concerns: authentication and request logging

pub mod auth;
pub mod logging;

pub use auth::{auth_middleware, AuthUser, AdminUser};
pub use logging::log_requests;
