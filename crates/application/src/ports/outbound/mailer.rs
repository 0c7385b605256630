//! Interface for email operations.

use async_trait::async_trait;
use domain::identity::IdentityId;

use crate::error::Result;

/// Port for sending emails.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a welcome email to a new identity.
    async fn send_welcome(&self, id: &IdentityId) -> Result<()>;
}
