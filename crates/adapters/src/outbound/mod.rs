//! Outbound adapters.

pub mod clock;
pub mod crypto;
pub mod events;
pub mod mail;
pub mod persistence;
pub mod telemetry;
