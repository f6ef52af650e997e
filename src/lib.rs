//! Peripheral control-loop samples.
//!
//! Three single-threaded, event-driven samples sharing one pattern: resolve
//! the device profile, open exactly one peripheral handle through the access
//! broker, loop — wait for the host, service its events, perform one
//! hardware step — until the host requests destruction, then release
//! everything in order.
//!
//! The external collaborators (identity service, broker, host dispatcher)
//! sit behind port traits in [`app::ports`]; [`adapters::sim`] provides a
//! deterministic in-memory world so everything runs and tests on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod profile;
