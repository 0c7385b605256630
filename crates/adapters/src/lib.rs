//! Storage, hashing, messaging and telemetry behind the application ports.

#![forbid(unsafe_code)]

pub mod outbound;
