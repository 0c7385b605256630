//! In-memory implementation for notification repository.

use application::error::Result;
use application::ports::outbound::NotificationRepository;
use async_trait::async_trait;
use domain::identity::IdentityId;
use domain::notification::{Notification, NotificationId};
use tokio::sync::RwLock;

/// In-memory notification repository.
#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationRepository {
    /// Create a new empty [`InMemoryNotificationRepository`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a notification. Producing notifications is the forum's job;
    /// this is how they land here.
    pub async fn push(&self, notification: Notification) {
        self.notifications.write().await.push(notification);
    }

    /// Current state of a stored notification.
    pub async fn get(&self, id: NotificationId) -> Option<Notification> {
        self.notifications
            .read()
            .await
            .iter()
            .find(|n| n.id == id)
            .cloned()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn mark_read(
        &self,
        owner: &IdentityId,
        ids: &[NotificationId],
    ) -> Result<u64> {
        let mut notifications = self.notifications.write().await;

        let mut changed = 0;
        for notification in notifications
            .iter_mut()
            .filter(|n| !n.read && n.owner == *owner && ids.contains(&n.id))
        {
            notification.read = true;
            changed += 1;
        }

        Ok(changed)
    }

    async fn unread_count(&self, owner: &IdentityId) -> Result<u64> {
        let notifications = self.notifications.read().await;

        Ok(notifications
            .iter()
            .filter(|n| !n.read && n.owner == *owner)
            .count() as u64)
    }

    async fn delete_for_owner(&self, owner: &IdentityId) -> Result<u64> {
        let mut notifications = self.notifications.write().await;

        let before = notifications.len();
        notifications.retain(|n| n.owner != *owner);

        Ok((before - notifications.len()) as u64)
    }
}
