//! Identity repository port.

use async_trait::async_trait;
use domain::identity::{IdentityId, IdentityRecord, ProviderBinding};

use crate::error::Result;

/// Port for identity persistence operations.
///
/// Implementations own a case-insensitive uniqueness index on login and
/// keep each `(provider, external id)` pair on at most one record. Finders
/// never return soft-deleted records.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Find an identity by id.
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<IdentityRecord>>;

    /// Find an identity by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<IdentityRecord>>;

    /// Find an identity by login, ignoring case.
    async fn find_by_login(&self, login: &str) -> Result<Option<IdentityRecord>>;

    /// Find the identity holding a binding on `provider` for `external_id`.
    async fn find_binding_owner(
        &self,
        provider: &str,
        external_id: &str,
    ) -> Result<Option<IdentityRecord>>;

    /// Insert a new identity with its embedded bindings in one write.
    ///
    /// Fails with [`ApplicationError::Duplicate`] when the login or one of
    /// the bindings is already taken.
    ///
    /// [`ApplicationError::Duplicate`]: crate::error::ApplicationError::Duplicate
    async fn insert(&self, record: &IdentityRecord) -> Result<()>;

    /// Replace the stored fields of an existing identity.
    async fn update(&self, record: &IdentityRecord) -> Result<()>;

    /// Append a binding to an existing identity.
    async fn attach_binding(
        &self,
        id: &IdentityId,
        binding: &ProviderBinding,
    ) -> Result<()>;

    /// Soft delete an identity.
    async fn delete(&self, id: &IdentityId, deleted_at: u64) -> Result<()>;
}
