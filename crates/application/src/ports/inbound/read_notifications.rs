//! Notification read-state use case port.

use async_trait::async_trait;
use domain::identity::IdentityRecord;
use domain::notification::Notification;

use crate::error::Result;

/// Inbound port for notification read tracking.
#[async_trait]
pub trait ReadNotifications: Send + Sync {
    /// Flag the unread notifications of `batch` as read.
    ///
    /// Returns how many notifications actually changed.
    async fn mark_read(
        &self,
        identity: &IdentityRecord,
        batch: &[Notification],
    ) -> Result<u64>;

    /// Number of unread notifications.
    async fn unread_count(&self, identity: &IdentityRecord) -> Result<u64>;
}
