//! Application-level errors.

use domain::error::DomainError;
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, ApplicationError>;

/// Errors that can occur in the application layer.
///
/// Lookups that find nothing return `Ok(None)`, not an error.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Field-level failure on an attempted write.
    #[error("validation error occurred")]
    Validation(#[from] ValidationErrors),
    /// Uniqueness violation raised by the store itself, usually a race
    /// between two creations. Re-resolve instead of replaying the write.
    #[error("{field} is already taken")]
    Duplicate { field: &'static str },
    /// Current password did not match during a credential update.
    #[error("invalid current password")]
    Authentication,

    #[error("identity not found")]
    IdentityNotFound,

    #[error("internal server error")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl ApplicationError {
    pub fn internal<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Internal(Box::new(err))
    }
}

pub trait ToInternal<T> {
    fn catch(self) -> Result<T>;
}

impl<T, E> ToInternal<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn catch(self) -> Result<T> {
        self.map_err(|e| ApplicationError::Internal(Box::new(e)))
    }
}
