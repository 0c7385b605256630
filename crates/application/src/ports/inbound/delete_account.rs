//! Account deletion use case port.

use async_trait::async_trait;
use domain::identity::IdentityId;

use crate::error::Result;

/// Inbound port for account deletion.
#[async_trait]
pub trait DeleteAccount: Send + Sync {
    /// Delete the identity and everything it owns.
    async fn execute(&self, id: &IdentityId) -> Result<()>;
}
