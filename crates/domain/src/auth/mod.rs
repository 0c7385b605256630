//! Authentification domain.

pub mod password;
pub mod policy;
pub mod trust;
