//! Links between an identity and external authentication providers.

use serde::{Deserialize, Serialize};

/// One external-identity link, owned by exactly one identity record.
///
/// Bindings live inside their [`IdentityRecord`](super::IdentityRecord) and
/// are never addressed on their own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderBinding {
    provider: String,
    #[serde(rename = "uid")]
    external_id: String,
}

impl ProviderBinding {
    /// Create a new [`ProviderBinding`].
    pub fn new(provider: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            external_id: external_id.into(),
        }
    }

    /// Provider name, e.g. `github`.
    #[inline]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Subject identifier assigned by the provider.
    #[inline]
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    /// Whether this binding points at `external_id` on `provider`.
    pub fn matches(&self, provider: &str, external_id: &str) -> bool {
        self.provider == provider && self.external_id == external_id
    }
}
