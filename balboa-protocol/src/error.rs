//! Protocol error types.

use crate::message::ItemType;
use thiserror::Error;

/// Protocol-level errors that can occur during framing or message
/// construction.
///
/// Frame decoding distinguishes two severities: a missing *leading*
/// separator poisons the whole receive buffer (the length field cannot
/// be trusted without a valid start marker), while everything else is
/// local to one frame and scanning can continue. Callers use
/// [`ProtocolError::is_stream_fatal`] to tell them apart.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame does not start with separator 0x7E, got {0:#04x}")]
    MissingLeadingSeparator(u8),

    #[error("frame does not end with separator 0x7E, got {0:#04x}")]
    MissingTrailingSeparator(u8),

    #[error("declared frame length {0} is too short for message type and CRC")]
    FrameTooShort(u8),

    #[error("CRC mismatch: computed {computed:#04x}, received {received:#04x}")]
    CrcMismatch { computed: u8, received: u8 },

    #[error("cannot compute CRC over an empty buffer")]
    EmptyCrcInput,

    #[error("payload of {0} bytes does not fit the one-byte length field")]
    PayloadTooLarge(usize),

    #[error("{item:?} is read only and cannot be toggled")]
    ReadOnlyItem { item: ItemType },

    #[error("index {index} out of bounds for {item:?} (count {count})")]
    IndexOutOfBounds {
        item: ItemType,
        index: usize,
        count: usize,
    },
}

impl ProtocolError {
    /// Returns whether this error invalidates the whole receive buffer
    /// rather than just the frame it was raised for.
    pub fn is_stream_fatal(&self) -> bool {
        matches!(self, ProtocolError::MissingLeadingSeparator(_))
    }
}
