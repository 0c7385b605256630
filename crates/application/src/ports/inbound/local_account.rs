//! Local (password) account use case port.

use async_trait::async_trait;
use domain::identity::IdentityRecord;

use crate::dto::{AuthRequestDto, RegisterRequestDto};
use crate::error::Result;

/// Inbound port for password-based accounts.
#[async_trait]
pub trait LocalAccount: Send + Sync {
    /// Register a new local account.
    async fn register(&self, request: RegisterRequestDto) -> Result<IdentityRecord>;

    /// Check an email/password pair.
    async fn authenticate(&self, request: AuthRequestDto) -> Result<IdentityRecord>;
}
