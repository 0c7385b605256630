//! Login derivation and format rules.
//!
//! Logins are compared case-insensitively. The canonical form used for
//! uniqueness lookups is the ASCII lowercase of the login.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DomainError, Result};

/// Minimum login length.
pub const MIN_LENGTH: usize = 3;
/// Maximum login length.
pub const MAX_LENGTH: usize = 20;
/// Prefix of logins generated when a provider nickname is unusable.
pub const SYNTHETIC_PREFIX: char = 'u';

static LOGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// Checks the login format invariant (`\w{3,20}`).
///
/// # Errors
///
/// Returns [`DomainError::InvalidLoginFormat`] if the login has a wrong
/// length or contains a non-word character.
pub fn check(login: &str) -> Result<()> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&login.len())
        || !LOGIN_RE.is_match(login)
    {
        return Err(DomainError::InvalidLoginFormat);
    }
    Ok(())
}

/// Whether `login` only contains word characters.
pub fn is_well_formed(login: &str) -> bool {
    LOGIN_RE.is_match(login)
}

/// Key used for case-insensitive uniqueness.
pub fn canonical(login: &str) -> String {
    login.to_ascii_lowercase()
}

/// Login candidate taken from an email address: everything before the
/// first `@`, or the whole string when there is none.
pub fn from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or_default()
}

/// Strips every character outside `[A-Za-z0-9_]`, then keeps the first 20.
///
/// The result may be empty or shorter than [`MIN_LENGTH`].
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .take(MAX_LENGTH)
        .collect()
}

/// Fallback login built from a unix timestamp in seconds, e.g. `u1700000000`.
pub fn synthetic(timestamp: u64) -> String {
    format!("{SYNTHETIC_PREFIX}{timestamp}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_non_word_characters() {
        assert_eq!(normalize("Bob Smith!!"), "BobSmith");
        assert_eq!(normalize("dé_jà-vu"), "d_jvu");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_normalize_truncates_to_twenty() {
        let nickname = "abcdefghijklmnopqrstuvwxyz0123"; // 30 characters.
        assert_eq!(normalize(nickname), "abcdefghijklmnopqrst");
    }

    #[test]
    fn test_from_email() {
        assert_eq!(from_email("alice@example.com"), "alice");
        assert_eq!(from_email("nodomain"), "nodomain");
        assert_eq!(from_email("@example.com"), "");
    }

    #[test]
    fn test_check() {
        assert!(check("alice").is_ok());
        assert!(check("a_1").is_ok());
        assert!(check("al").is_err());
        assert!(check("a".repeat(21).as_str()).is_err());
        assert!(check("al ice").is_err());
    }

    #[test]
    fn test_synthetic_and_canonical() {
        assert_eq!(synthetic(1_700_000_000), "u1700000000");
        assert_eq!(canonical("Alice_01"), "alice_01");
    }
}
