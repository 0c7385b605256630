//! Application services implementing business logic.

use std::borrow::Cow;

use domain::identity::record::field_error;
use validator::ValidationErrors;

use crate::error::ApplicationError;

pub mod delete_account;
pub mod local_account;
pub mod persist;
pub mod read_notifications;
pub mod resolve_account;
pub mod update_profile;

pub use delete_account::*;
pub use local_account::*;
pub use persist::*;
pub use read_notifications::*;
pub use resolve_account::*;
pub use update_profile::*;

/// Single-field validation failure.
pub(crate) fn rejected(
    field: &'static str,
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
) -> ApplicationError {
    let mut errors = ValidationErrors::new();
    errors.add(field, field_error(code, message));
    ApplicationError::Validation(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected() {
        let ApplicationError::Validation(errors) =
            rejected("authorizations", "taken", format!("linked to {}", "bob"))
        else {
            panic!("expected a validation error");
        };

        let error = &errors.field_errors()["authorizations"][0];
        assert_eq!(error.code, "taken");
        assert_eq!(error.message.as_deref(), Some("linked to bob"));
        assert_eq!(
            *error,
            field_error("taken", String::from("linked to bob"))
        );
    }
}
