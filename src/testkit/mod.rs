//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`transport`]: mock [`GatewayTransport`](crate::gateway::GatewayTransport)
//!   implementations: `RecordingTransport`.
//! - [`trace`]: `RecordingTraceSink` for asserting on trace records.
//! - [`events`]: builders for inbound gateway events and wire objects.

pub mod events;
pub mod trace;
pub mod transport;
