//! Services module
//!
//! This module contains business logic services

pub mod analytics;
pub mod auth;
pub mod event;
pub mod payment;
pub mod registration;

// Re-export commonly used services
pub use analytics::AnalyticsService;
pub use auth::{AuthService, Claims, Session};
pub use event::EventService;
pub use payment::{PaymentGateway, PaymentDecider, RandomDecider, PaymentDetails, PaymentAuthorization, RefundReceipt};
pub use registration::RegistrationService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub event_service: EventService,
    pub registration_service: RegistrationService,
    pub analytics_service: AnalyticsService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings, database: DatabaseService) -> Self {
        let gateway = PaymentGateway::new(settings.payment.clone());

        let auth_service = AuthService::new(database.users.clone(), settings.auth.clone());
        let event_service = EventService::new(database.events.clone());
        let registration_service = RegistrationService::new(
            database.registrations.clone(),
            database.events.clone(),
            gateway,
        );
        let analytics_service = AnalyticsService::new(
            database.registrations.clone(),
            database.events.clone(),
            database.users.clone(),
        );

        Self {
            auth_service,
            event_service,
            registration_service,
            analytics_service,
        }
    }

    /// Create a ServiceFactory with an injected payment gateway, so tests
    /// can fix the decision source.
    pub fn with_gateway(settings: Settings, database: DatabaseService, gateway: PaymentGateway) -> Self {
        let mut factory = Self::new(settings, database.clone());
        factory.registration_service = RegistrationService::new(
            database.registrations,
            database.events,
            gateway,
        );
        factory
    }
}
