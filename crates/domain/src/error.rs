//! Custom error handler for domain (core).

pub type Result<T> = std::result::Result<T, DomainError>;

/// Enum representing custom domain errors.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("invalid email formatting")]
    InvalidEmailFormat,
    #[error("login must be 3 to 20 letters, digits or underscores")]
    InvalidLoginFormat,
    #[error("invalid identifier")]
    InvalidIdFormat,
    #[error("identity is already bound to another {provider} account")]
    ProviderAlreadyBound { provider: String },

    #[error("password must be between {min_length} and {max_length} characters")]
    WeakPassword {
        min_length: usize,
        max_length: usize,
    },
    #[error("invalid credentials")]
    InvalidCredentials,
}
