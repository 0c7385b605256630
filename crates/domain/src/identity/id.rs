//! ID logic management.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

const MAX_LENGTH: usize = 64;

/// Value object of an identity identifier.
///
/// Opaque to callers. Assigned once when the identity is built and never
/// changed afterwards.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct IdentityId(String);

impl IdentityId {
    /// Generates a fresh random [`IdentityId`].
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Converts a [`String`] into a valid [`IdentityId`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is empty, longer than 64 characters or
    /// contains anything else than ASCII letters, digits and `-`.
    pub fn parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let trimmed = id.trim();

        if trimmed.is_empty() || trimmed.len() > MAX_LENGTH {
            return Err(DomainError::InvalidIdFormat);
        }

        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomainError::InvalidIdFormat);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the same string as a string slice `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for IdentityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct_and_parseable() {
        let first = IdentityId::generate();
        let second = IdentityId::generate();

        assert_ne!(first, second);
        assert_eq!(IdentityId::parse(first.to_string()).unwrap(), first);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(IdentityId::parse("").is_err());
        assert!(IdentityId::parse("   ").is_err());
        assert!(IdentityId::parse("a/b").is_err());
        assert!(IdentityId::parse("x".repeat(65)).is_err());
    }
}
