//! Identity record aggregate.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::auth::password::PasswordHash;
use crate::error::{DomainError, Result};
use crate::identity::binding::ProviderBinding;
use crate::identity::email::EmailAddress;
use crate::identity::id::IdentityId;
use crate::identity::login;

const GITHUB_URL: &str = "http://github.com/";

/// Moderation state of an account.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AccountState {
    #[default]
    Normal,
    Blocked,
}

impl AccountState {
    /// Stable numeric code used by stores.
    pub fn code(self) -> i16 {
        match self {
            AccountState::Normal => 1,
            AccountState::Blocked => 2,
        }
    }

    /// Inverse of [`AccountState::code`]. Unknown codes map to `None`.
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(AccountState::Normal),
            2 => Some(AccountState::Blocked),
            _ => None,
        }
    }
}

/// Canonical user account: local, guest or provider-linked.
///
/// Provider bindings are embedded: they share the record's lifetime and are
/// only reachable through it.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityRecord {
    pub id: IdentityId,
    pub login: String,
    pub email: String,
    pub password_hash: Option<PasswordHash>,
    pub guest: bool,
    /// Trusted-content flag. Never mass-assigned.
    pub verified: bool,
    pub state: AccountState,
    /// Maintained by the forum side. Never mass-assigned.
    pub replies_count: u32,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub tagline: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub(crate) bindings: Vec<ProviderBinding>,
    pub created_at: u64,
    pub updated_at: u64,
    pub deleted_at: Option<u64>,
}

impl IdentityRecord {
    /// Provider bindings in attachment order.
    pub fn bindings(&self) -> &[ProviderBinding] {
        &self.bindings
    }

    /// Replaces the bindings with those loaded from a store.
    ///
    /// Only the persistence layer should call this: everywhere else,
    /// bindings are added through [`IdentityRecord::bind`].
    pub fn restore_bindings(&mut self, stored: Vec<ProviderBinding>) {
        self.bindings = stored;
    }

    /// Whether at least one provider is linked.
    pub fn has_bindings(&self) -> bool {
        !self.bindings.is_empty()
    }

    /// Whether a binding exists for `provider`, whatever the subject.
    pub fn is_bound_to(&self, provider: &str) -> bool {
        self.bindings.iter().any(|b| b.provider() == provider)
    }

    /// Binding held for `provider`, if any.
    pub fn binding_for(&self, provider: &str) -> Option<&ProviderBinding> {
        self.bindings.iter().find(|b| b.provider() == provider)
    }

    /// Attaches a binding.
    ///
    /// Attaching the exact same binding twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ProviderAlreadyBound`] if the record already
    /// holds another subject for the same provider.
    pub fn bind(&mut self, binding: ProviderBinding) -> Result<()> {
        match self.binding_for(binding.provider()) {
            Some(existing) if *existing == binding => Ok(()),
            Some(_) => Err(DomainError::ProviderAlreadyBound {
                provider: binding.provider().to_string(),
            }),
            None => {
                self.bindings.push(binding);
                Ok(())
            },
        }
    }

    /// Whether the record was soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether moderation blocked this account.
    pub fn is_blocked(&self) -> bool {
        self.state == AccountState::Blocked
    }

    /// Public GitHub profile URL, or an empty string without a handle.
    pub fn github_url(&self) -> String {
        match self.github.as_deref() {
            Some(handle) if !handle.trim().is_empty() => format!("{GITHUB_URL}{handle}"),
            _ => String::new(),
        }
    }

    /// Bumps `updated_at`.
    pub fn touch(&mut self, now: u64) {
        self.updated_at = now;
    }

    /// Runs the standard field validation.
    ///
    /// Uniqueness is not checked here: it needs the store.
    ///
    /// # Errors
    ///
    /// Returns every failing field with a human readable message.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.login.trim().is_empty() {
            errors.add("login", field_error("presence", "can't be blank"));
        } else {
            if self.login.len() < login::MIN_LENGTH {
                errors.add(
                    "login",
                    field_error("length", "is too short (minimum is 3 characters)"),
                );
            } else if self.login.len() > login::MAX_LENGTH {
                errors.add(
                    "login",
                    field_error("length", "is too long (maximum is 20 characters)"),
                );
            }
            if !login::is_well_formed(&self.login) {
                errors.add(
                    "login",
                    field_error(
                        "format",
                        "only letters, digits and underscores are allowed",
                    ),
                );
            }
        }

        if self.email.trim().is_empty() {
            errors.add("email", field_error("presence", "can't be blank"));
        } else if EmailAddress::parse(self.email.as_str()).is_err() {
            errors.add("email", field_error("format", "is invalid"));
        }

        if !self.guest && self.bindings.is_empty() && self.password_hash.is_none() {
            errors.add("password", field_error("presence", "can't be blank"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Builds a [`ValidationError`] carrying `message`.
pub fn field_error(
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::builder::IdentityBuilder;

    fn guest(email: &str, login: &str) -> IdentityRecord {
        IdentityBuilder::new(1_000)
            .login(login)
            .email(email)
            .guest()
            .build()
    }

    #[test]
    fn test_valid_guest_without_password() {
        assert!(guest("alice@example.com", "alice").validate().is_ok());
    }

    #[test]
    fn test_login_rules() {
        let errors = guest("al@example.com", "al").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("login"));

        let errors = guest("a@example.com", "bad login").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("login"));

        let errors = guest("a@example.com", "").validate().unwrap_err();
        assert_eq!(errors.field_errors()["login"].len(), 1);
    }

    #[test]
    fn test_email_rules() {
        let errors = guest("not-an-email", "alice").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(!errors.field_errors().contains_key("login"));
    }

    #[test]
    fn test_local_account_needs_credentials() {
        let record = IdentityBuilder::new(1_000)
            .login("alice")
            .email("alice@example.com")
            .build();
        let errors = record.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));

        let mut linked = record.clone();
        linked.bind(ProviderBinding::new("github", "42")).unwrap();
        assert!(linked.validate().is_ok());
    }

    #[test]
    fn test_bind_once_per_provider() {
        let mut record = guest("alice@example.com", "alice");

        record.bind(ProviderBinding::new("github", "42")).unwrap();
        record.bind(ProviderBinding::new("github", "42")).unwrap();
        assert_eq!(record.bindings().len(), 1);

        let err = record.bind(ProviderBinding::new("github", "43")).unwrap_err();
        assert!(matches!(err, DomainError::ProviderAlreadyBound { .. }));

        record.bind(ProviderBinding::new("twitter", "43")).unwrap();
        assert!(record.is_bound_to("twitter"));
        assert!(!record.is_bound_to("douban"));
    }

    #[test]
    fn test_github_url() {
        let mut record = guest("alice@example.com", "alice");
        assert_eq!(record.github_url(), "");

        record.github = Some("  ".into());
        assert_eq!(record.github_url(), "");

        record.github = Some("alice".into());
        assert_eq!(record.github_url(), "http://github.com/alice");

        // Stored handles are used as is.
        record.github = Some("alice ".into());
        assert_eq!(record.github_url(), "http://github.com/alice ");
    }

    #[test]
    fn test_state_codes() {
        for state in [AccountState::Normal, AccountState::Blocked] {
            assert_eq!(AccountState::from_code(state.code()), Some(state));
        }
        assert_eq!(AccountState::from_code(7), None);
    }
}
