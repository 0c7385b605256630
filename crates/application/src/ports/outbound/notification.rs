//! Notification repository port.

use async_trait::async_trait;
use domain::identity::IdentityId;
use domain::notification::NotificationId;

use crate::error::Result;

/// Port for notification persistence.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Flag as read, in a single write, every notification of `ids` that
    /// belongs to `owner` and is still unread. Returns how many changed.
    async fn mark_read(
        &self,
        owner: &IdentityId,
        ids: &[NotificationId],
    ) -> Result<u64>;

    /// Count unread notifications of `owner`.
    async fn unread_count(&self, owner: &IdentityId) -> Result<u64>;

    /// Remove every notification of `owner`.
    async fn delete_for_owner(&self, owner: &IdentityId) -> Result<u64>;
}
