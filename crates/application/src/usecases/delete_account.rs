//! Account deletion use case implementation.

use std::sync::Arc;

use async_trait::async_trait;
use domain::identity::IdentityId;

use crate::error::{ApplicationError, Result};
use crate::ports::inbound::DeleteAccount;
use crate::ports::outbound::{Clock, IdentityRepository, NotificationRepository};

/// Account deletion use case service.
pub struct DeleteAccountUseCase {
    identities: Arc<dyn IdentityRepository>,
    notifications: Arc<dyn NotificationRepository>,
    clock: Arc<dyn Clock>,
}

impl DeleteAccountUseCase {
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        notifications: Arc<dyn NotificationRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identities,
            notifications,
            clock,
        }
    }
}

#[async_trait]
impl DeleteAccount for DeleteAccountUseCase {
    async fn execute(&self, id: &IdentityId) -> Result<()> {
        if self.identities.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::IdentityNotFound);
        }

        let removed = self.notifications.delete_for_owner(id).await?;
        self.identities.delete(id, self.clock.now()).await?;

        tracing::info!(identity = %id, notifications = removed, "identity deleted");

        Ok(())
    }
}
