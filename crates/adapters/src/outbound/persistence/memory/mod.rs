//! In-memory stores, for tests and single-process deployments.

mod identity_repository;
mod notification_repository;

pub use identity_repository::InMemoryIdentityRepository;
pub use notification_repository::InMemoryNotificationRepository;
