//! Profile update use case port.

use async_trait::async_trait;
use domain::identity::IdentityRecord;

use crate::dto::ProfileUpdateDto;
use crate::error::Result;

/// Inbound port for profile and credential updates.
#[async_trait]
pub trait UpdateProfile: Send + Sync {
    /// Apply `params` to `identity`, going through re-authentication only
    /// when a credential field is filled.
    async fn update_with_password(
        &self,
        identity: IdentityRecord,
        params: ProfileUpdateDto,
    ) -> Result<IdentityRecord>;
}
