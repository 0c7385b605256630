//! Typed builder for `IdentityRecord`.

use crate::auth::password::PasswordHash;
use crate::identity::binding::ProviderBinding;
use crate::identity::id::IdentityId;
use crate::identity::record::{AccountState, IdentityRecord};

/// Marker type for missing value.
#[derive(Debug)]
pub struct Missing;

/// Marker type for present value.
#[derive(Debug)]
pub struct Present<T>(pub T);

/// A builder that refuses to build without a login.
///
/// Every record starts in [`AccountState::Normal`]. New records get a fresh
/// [`IdentityId`]; only [`IdentityBuilder::restore`] takes an existing one.
#[derive(Debug)]
pub struct IdentityBuilder<Login> {
    login: Login,
    email: String,
    password_hash: Option<PasswordHash>,
    guest: bool,
    location: Option<String>,
    tagline: Option<String>,
    website: Option<String>,
    bindings: Vec<ProviderBinding>,
    now: u64,
}

impl IdentityBuilder<Missing> {
    /// Creates a new [`IdentityBuilder`] stamped with `now` (unix seconds).
    pub fn new(now: u64) -> Self {
        Self {
            login: Missing,
            email: String::new(),
            password_hash: None,
            guest: false,
            location: None,
            tagline: None,
            website: None,
            bindings: Vec::new(),
            now,
        }
    }

    /// Sets the login. It is stored as given and checked on validation.
    pub fn login(self, login: impl Into<String>) -> IdentityBuilder<Present<String>> {
        IdentityBuilder {
            login: Present(login.into()),
            email: self.email,
            password_hash: self.password_hash,
            guest: self.guest,
            location: self.location,
            tagline: self.tagline,
            website: self.website,
            bindings: self.bindings,
            now: self.now,
        }
    }
}

impl<Login> IdentityBuilder<Login> {
    /// Sets the email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Marks the identity as a password-less guest.
    pub fn guest(mut self) -> Self {
        self.guest = true;
        self
    }

    /// Sets the hashed password.
    pub fn password(mut self, hash: PasswordHash) -> Self {
        self.password_hash = Some(hash);
        self
    }

    /// Sets the free-form location.
    pub fn location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    /// Sets the short bio shown under the login.
    pub fn tagline(mut self, tagline: Option<String>) -> Self {
        self.tagline = tagline;
        self
    }

    /// Sets the personal website.
    pub fn website(mut self, website: Option<String>) -> Self {
        self.website = website;
        self
    }

    /// Embeds a provider binding. Duplicated providers are ignored.
    pub fn binding(mut self, binding: ProviderBinding) -> Self {
        if !self.bindings.iter().any(|b| b.provider() == binding.provider()) {
            self.bindings.push(binding);
        }
        self
    }
}

impl IdentityBuilder<Present<String>> {
    /// Finalizes build.
    pub fn build(self) -> IdentityRecord {
        self.finish(IdentityId::generate())
    }

    /// Finalizes build of a record loaded from a store, keeping its `id`.
    pub fn restore(self, id: IdentityId) -> IdentityRecord {
        self.finish(id)
    }

    fn finish(self, id: IdentityId) -> IdentityRecord {
        let IdentityBuilder {
            login: Present(login),
            email,
            password_hash,
            guest,
            location,
            tagline,
            website,
            bindings,
            now,
        } = self;

        IdentityRecord {
            id,
            login,
            email,
            password_hash,
            guest,
            verified: false,
            state: AccountState::Normal,
            replies_count: 0,
            location,
            bio: None,
            tagline,
            website,
            github: None,
            bindings,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}
