//! Email logic management.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DomainError, Result};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap());

/// Value object of a valid email address.
///
/// Emails are lookup keys and are kept exactly as given; no case folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Converts a [`String`] into a valid [`EmailAddress`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is not shaped as `local@domain` or
    /// contains whitespace.
    pub fn parse(email: impl Into<String>) -> Result<Self> {
        let email = email.into();
        if EMAIL_RE.is_match(&email) {
            Ok(Self(email))
        } else {
            Err(DomainError::InvalidEmailFormat)
        }
    }

    /// Part before the `@`.
    pub fn local_part(&self) -> &str {
        crate::identity::login::from_email(&self.0)
    }

    /// Returns the same string as a string slice `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
