//! Use cases around identities: resolution, credentials and notifications.
//!
//! Inbound ports describe what callers can ask for, outbound ports describe
//! what the use cases need from storage, mail, time and telemetry.

#![forbid(unsafe_code)]

pub mod dto;
pub mod error;
pub mod ports;
pub mod usecases;
