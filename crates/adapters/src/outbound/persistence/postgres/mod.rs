//! PostgreSQL stores.

mod identity_repository;
mod models;
mod notification_repository;

pub use identity_repository::PgIdentityRepository;
pub use notification_repository::PgNotificationRepository;
