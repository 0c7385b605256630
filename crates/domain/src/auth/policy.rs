//! Password requirement policy.

use validator::ValidationErrors;

use crate::auth::password::Password;
use crate::error::DomainError;
use crate::identity::record::{IdentityRecord, field_error};

/// Credential fields proposed by an update.
#[derive(Debug, Default, Clone, Copy)]
pub struct UpdateContext<'a> {
    pub password: Option<&'a str>,
    pub password_confirmation: Option<&'a str>,
}

/// `None`, empty or whitespace only.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Whether an update of `identity` must carry a valid password.
///
/// Guests never need one. Provider-linked identities may leave the password
/// blank and still update their profile; everyone else must supply it.
pub fn is_password_required(identity: &IdentityRecord, ctx: &UpdateContext<'_>) -> bool {
    if identity.guest {
        return false;
    }

    !identity.has_bindings() || !is_blank(ctx.password)
}

/// Base credential policy: presence, length and confirmation matching.
///
/// Confirmation is only compared when one was supplied.
///
/// # Errors
///
/// Returns the failing `password` / `password_confirmation` fields.
pub fn check_credentials(ctx: &UpdateContext<'_>) -> Result<Password, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let password = match ctx.password.filter(|p| !p.trim().is_empty()) {
        None => {
            errors.add("password", field_error("presence", "can't be blank"));
            None
        },
        Some(raw) => match Password::new(raw) {
            Ok(password) => Some(password),
            Err(DomainError::WeakPassword { .. }) if raw.chars().count() < Password::MIN_LENGTH => {
                errors.add(
                    "password",
                    field_error("length", "is too short (minimum is 6 characters)"),
                );
                None
            },
            Err(_) => {
                errors.add(
                    "password",
                    field_error("length", "is too long (maximum is 128 characters)"),
                );
                None
            },
        },
    };

    if let Some(confirmation) = ctx.password_confirmation {
        if ctx.password != Some(confirmation) {
            errors.add(
                "password_confirmation",
                field_error("confirmation", "doesn't match password"),
            );
        }
    }

    match password {
        Some(password) if errors.is_empty() => Ok(password),
        _ => Err(errors),
    }
}
