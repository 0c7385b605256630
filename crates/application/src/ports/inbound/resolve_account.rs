//! Account resolution use case port.

use async_trait::async_trait;
use domain::identity::{IdentityId, IdentityRecord};

use crate::dto::ProviderCallbackDto;
use crate::error::Result;

/// Inbound port mapping authentication signals to identities.
#[async_trait]
pub trait ResolveAccount: Send + Sync {
    /// Return the identity owning `email`, creating a guest if none does.
    async fn find_or_create_guest(&self, email: &str) -> Result<IdentityRecord>;

    /// Return the identity bound to `external_id` on `provider`, if any.
    async fn find_by_provider_binding(
        &self,
        provider: &str,
        external_id: &str,
    ) -> Result<Option<IdentityRecord>>;

    /// Build and persist a new identity from a provider callback.
    async fn create_from_provider_callback(
        &self,
        payload: ProviderCallbackDto,
    ) -> Result<IdentityRecord>;

    /// Find the identity bound to the callback subject, or create it.
    async fn sign_in_with_provider(
        &self,
        payload: ProviderCallbackDto,
    ) -> Result<IdentityRecord>;

    /// Link an existing identity to a provider subject.
    async fn bind_provider(
        &self,
        id: &IdentityId,
        provider: &str,
        external_id: &str,
    ) -> Result<IdentityRecord>;
}
