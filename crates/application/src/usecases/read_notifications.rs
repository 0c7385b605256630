//! Notification read tracking use case implementation.

use std::sync::Arc;

use async_trait::async_trait;
use domain::identity::IdentityRecord;
use domain::notification::{Notification, unread_ids};

use crate::error::Result;
use crate::ports::inbound::ReadNotifications;
use crate::ports::outbound::{NotificationRepository, TelemetryPort};

/// Notification read tracking use case service.
pub struct NotificationReadTracker {
    notifications: Arc<dyn NotificationRepository>,
    telemetry: Arc<dyn TelemetryPort>,
}

impl NotificationReadTracker {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        telemetry: Arc<dyn TelemetryPort>,
    ) -> Self {
        Self {
            notifications,
            telemetry,
        }
    }
}

#[async_trait]
impl ReadNotifications for NotificationReadTracker {
    async fn mark_read(
        &self,
        identity: &IdentityRecord,
        batch: &[Notification],
    ) -> Result<u64> {
        let ids = unread_ids(batch);
        if ids.is_empty() {
            return Ok(0);
        }

        // Scoped to the owner: ids of someone else's notifications are
        // silently ignored by the store.
        let count = self.notifications.mark_read(&identity.id, &ids).await?;
        if count > 0 {
            self.telemetry.record_notifications_read(&identity.id, count);
        }

        Ok(count)
    }

    async fn unread_count(&self, identity: &IdentityRecord) -> Result<u64> {
        self.notifications.unread_count(&identity.id).await
    }
}
