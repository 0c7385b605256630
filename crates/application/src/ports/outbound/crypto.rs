//! Interfaces for cryptographic operations.

use domain::auth::password::{Password, PasswordHash};

use crate::error::Result;

/// Port for password hashing operations.
pub trait PasswordHasher: Send + Sync {
    /// Hash a password using a secure algorithm.
    fn hash(&self, password: &Password) -> Result<PasswordHash>;

    /// Verify a password against a stored hash.
    ///
    /// Fails with [`ApplicationError::Authentication`] on mismatch.
    ///
    /// [`ApplicationError::Authentication`]: crate::error::ApplicationError::Authentication
    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<()>;
}
