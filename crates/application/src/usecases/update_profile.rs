//! Profile update use case implementation.

use std::sync::Arc;

use async_trait::async_trait;
use domain::auth::password::Password;
use domain::auth::policy::{
    UpdateContext, check_credentials, is_blank, is_password_required,
};
use domain::identity::IdentityRecord;
use validator::Validate;

use crate::dto::ProfileUpdateDto;
use crate::error::{ApplicationError, Result};
use crate::ports::inbound::UpdateProfile;
use crate::ports::outbound::{Clock, IdentityRepository, PasswordHasher};
use crate::usecases::persist::{IdentityWriter, PersistPolicy};

/// Profile update use case service.
pub struct UpdateProfileUseCase {
    writer: IdentityWriter,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl UpdateProfileUseCase {
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            writer: IdentityWriter::new(identities),
            hasher,
            clock,
        }
    }

    /// Re-authenticates with the current password, then rotates it when
    /// the update proposes a new one. A blank proposal keeps the stored
    /// password.
    fn change_credentials(
        &self,
        identity: &mut IdentityRecord,
        params: &ProfileUpdateDto,
    ) -> Result<()> {
        let stored = identity
            .password_hash
            .as_ref()
            .ok_or(ApplicationError::Authentication)?;
        let current =
            Password::new(params.current_password.as_deref().unwrap_or_default())
                .map_err(|_| ApplicationError::Authentication)?;
        self.hasher.verify(&current, stored)?;

        let ctx = UpdateContext {
            password: params.password.as_deref(),
            password_confirmation: params.password_confirmation.as_deref(),
        };
        let proposes_password = !is_blank(ctx.password)
            || !is_blank(ctx.password_confirmation);
        if proposes_password && is_password_required(identity, &ctx) {
            let password = check_credentials(&ctx)?;
            identity.password_hash = Some(self.hasher.hash(&password)?);
        }

        Ok(())
    }
}

/// Copies the mass-assignable profile fields. Blank optional values clear
/// the field.
fn apply_profile(identity: &mut IdentityRecord, params: ProfileUpdateDto) {
    fn optional(value: String) -> Option<String> {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    if let Some(email) = params.email {
        identity.email = email;
    }
    if let Some(location) = params.location {
        identity.location = optional(location);
    }
    if let Some(bio) = params.bio {
        identity.bio = optional(bio);
    }
    if let Some(tagline) = params.tagline {
        identity.tagline = optional(tagline);
    }
    if let Some(website) = params.website {
        identity.website = optional(website);
    }
    if let Some(github) = params.github {
        identity.github = optional(github);
    }
}

#[async_trait]
impl UpdateProfile for UpdateProfileUseCase {
    async fn update_with_password(
        &self,
        mut identity: IdentityRecord,
        mut params: ProfileUpdateDto,
    ) -> Result<IdentityRecord> {
        params.validate()?;

        if params.touches_credentials() {
            self.change_credentials(&mut identity, &params)?;
        } else {
            params.current_password = None;
        }

        apply_profile(&mut identity, params);
        identity.touch(self.clock.now());

        self.writer
            .update(&identity, PersistPolicy::Validate)
            .await?;

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::identity::IdentityBuilder;

    #[test]
    fn test_apply_profile() {
        let mut identity = IdentityBuilder::new(0)
            .login("alice")
            .email("alice@example.com")
            .location(Some("Paris".into()))
            .build();

        apply_profile(
            &mut identity,
            ProfileUpdateDto {
                location: Some("  ".into()),
                bio: Some("Rustacean".into()),
                github: Some("alice".into()),
                ..Default::default()
            },
        );

        assert_eq!(identity.email, "alice@example.com");
        assert_eq!(identity.location, None);
        assert_eq!(identity.bio.as_deref(), Some("Rustacean"));
        assert_eq!(identity.github_url(), "http://github.com/alice");
        assert!(!identity.verified);
        assert_eq!(identity.replies_count, 0);
    }
}
