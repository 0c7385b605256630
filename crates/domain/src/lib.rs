//! Core identity model: accounts, provider bindings and notifications.
//!
//! Nothing in this crate performs I/O. Persistence, mailing and time are
//! reached through the ports declared by the `application` crate.

#![forbid(unsafe_code)]

pub mod auth;
pub mod error;
pub mod identity;
pub mod notification;
