//! Database models for PostgreSQL.

use application::error::{Result, ToInternal};
use domain::auth::password::PasswordHash;
use domain::identity::{AccountState, IdentityBuilder, IdentityId, IdentityRecord, ProviderBinding};
use sqlx::FromRow;

/// Identity record as stored in the database.
#[derive(Debug, Clone, FromRow)]
pub struct IdentityRow {
    pub id: String,
    pub login: String,
    pub email: String,
    pub password: Option<String>,
    pub guest: bool,
    pub verified: bool,
    pub state: i16,
    pub replies_count: i32,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub tagline: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    /// Aggregated from `identity_bindings`.
    #[sqlx(json)]
    pub bindings: Vec<ProviderBinding>,
}

impl IdentityRow {
    /// Convert to [`IdentityRecord`].
    pub fn try_into_record(self) -> Result<IdentityRecord> {
        let mut record = IdentityBuilder::new(u64::try_from(self.created_at).catch()?)
            .login(self.login)
            .email(self.email)
            .restore(IdentityId::parse(self.id)?);

        record.password_hash = self.password.map(PasswordHash::parse).transpose()?;
        record.guest = self.guest;
        record.verified = self.verified;
        record.state = AccountState::from_code(self.state).unwrap_or_default();
        record.replies_count = u32::try_from(self.replies_count).unwrap_or_default();
        record.location = self.location;
        record.bio = self.bio;
        record.tagline = self.tagline;
        record.website = self.website;
        record.github = self.github;
        record.updated_at = u64::try_from(self.updated_at).catch()?;
        record.deleted_at = self.deleted_at.map(u64::try_from).transpose().catch()?;
        record.restore_bindings(self.bindings);

        Ok(record)
    }
}

/// Timestamps are stored as signed seconds.
pub(crate) fn to_db_time(timestamp: u64) -> Result<i64> {
    i64::try_from(timestamp).catch()
}
