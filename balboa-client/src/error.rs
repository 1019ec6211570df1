//! Client error types.

use thiserror::Error;

/// Client errors.
///
/// Transport faults (resolve, connect, read and write failures) are
/// never returned from calls; they surface exactly once through the
/// [`Event::StateChanged`](crate::Event::StateChanged) path.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("protocol error: {0}")]
    Protocol(#[from] balboa_protocol::ProtocolError),

    #[error("not connected")]
    NotConnected,
}
