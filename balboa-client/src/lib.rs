//! # balboa-client
//!
//! Async TCP client for Balboa spa control units.
//!
//! This crate provides:
//! - A connection state machine with explicit lifecycle events
//! - A serialized outbound write queue over a single socket
//! - An incremental read loop with duplicate-status suppression
//!
//! The client runs no timers of its own: reconnecting after an
//! `Offline` or `Error` event is the caller's job, typically a single
//! deferred `connect()` after a configured interval.

pub mod connection;
pub mod error;

pub use connection::{Connection, ConnectionConfig, ConnectionState, Event};
pub use error::ClientError;
