//! Single write path for identity records.

use std::sync::Arc;

use domain::identity::IdentityRecord;
use domain::identity::record::field_error;
use validator::ValidationErrors;

use crate::error::Result;
use crate::ports::outbound::IdentityRepository;

/// How much checking a write goes through before reaching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistPolicy {
    /// Field validation, then login and email uniqueness against the store.
    Validate,
    /// Straight to the store; only its uniqueness index applies.
    ///
    /// Reserved for provider sign-ups: their login was already normalized
    /// and disambiguated, and a cosmetic rule must not reject them.
    SkipValidation,
}

/// Writes identity records according to a [`PersistPolicy`].
#[derive(Clone)]
pub struct IdentityWriter {
    identities: Arc<dyn IdentityRepository>,
}

impl IdentityWriter {
    /// Create a new [`IdentityWriter`].
    pub fn new(identities: Arc<dyn IdentityRepository>) -> Self {
        Self { identities }
    }

    /// Insert a new record.
    pub async fn insert(&self, record: &IdentityRecord, policy: PersistPolicy) -> Result<()> {
        if policy == PersistPolicy::Validate {
            self.validate(record).await?;
        }
        self.identities.insert(record).await
    }

    /// Save changes to an existing record.
    pub async fn update(&self, record: &IdentityRecord, policy: PersistPolicy) -> Result<()> {
        if policy == PersistPolicy::Validate {
            self.validate(record).await?;
        }
        self.identities.update(record).await
    }

    async fn validate(&self, record: &IdentityRecord) -> Result<()> {
        let mut errors = record.validate().err().unwrap_or_else(ValidationErrors::new);

        if !record.login.trim().is_empty() {
            if let Some(owner) = self.identities.find_by_login(&record.login).await? {
                if owner.id != record.id {
                    errors.add("login", field_error("taken", "has already been taken"));
                }
            }
        }

        if !record.email.trim().is_empty() {
            if let Some(owner) = self.identities.find_by_email(&record.email).await? {
                if owner.id != record.id {
                    errors.add("email", field_error("taken", "has already been taken"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }
}
