//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod event;
pub mod registration;
pub mod analytics;

// Re-export commonly used models
pub use user::{User, UserRole, UserProfile, CreateUserRequest};
pub use event::{Event, EventStatus, CreateEventRequest, EventWithCounts};
pub use registration::{
    Registration, RegistrationDetails, ApprovalStatus, PaymentStatus,
    CreateRegistrationRequest, RegistrationDecision,
};
pub use analytics::{
    AggregateReport, AnalyticsOverview, MonthlyRevenue, EventRevenue, PaymentMethodShare,
    PaymentStats, DateRange, UserDashboardStats, AdminDashboardStats, ActivityEntry,
};
