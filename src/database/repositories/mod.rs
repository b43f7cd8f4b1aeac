//! Repository modules for database operations

pub mod user;
pub mod event;
pub mod registration;

pub use user::UserRepository;
pub use event::EventRepository;
pub use registration::RegistrationRepository;
