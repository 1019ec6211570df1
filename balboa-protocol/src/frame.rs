//! Binary frame format for the Balboa wire protocol.
//!
//! Frame layout (`length` counts everything between the separators,
//! including itself):
//!
//! ```text
//! +------+--------+-----------------------+----------+------+------+
//! | 0x7E | length | message type (BE 24b) | payload  | crc  | 0x7E |
//! |1 byte|1 byte  |        3 bytes        | len - 5  |1 byte|1 byte|
//! +------+--------+-----------------------+----------+------+------+
//! ```

use crate::crc;
use crate::error::ProtocolError;
use bytes::{BufMut, Bytes, BytesMut};

/// Separator byte marking the start and end of every frame.
pub const MESSAGE_SEPARATOR: u8 = 0x7E;

/// Smallest valid declared length: 3-byte message type, CRC and the
/// length byte itself.
pub const MIN_FRAME_LENGTH: usize = 5;

/// Largest payload a frame can carry given the one-byte length field.
pub const MAX_PAYLOAD_SIZE: usize = u8::MAX as usize - MIN_FRAME_LENGTH;

/// A parsed frame: the 24-bit message type code and its payload.
///
/// The CRC is retained because consecutive frames with equal CRC
/// values are how duplicate status babble is detected upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Big-endian 24-bit message type code.
    pub message_type: u32,
    /// Payload bytes between the message type and the CRC.
    pub payload: Bytes,
    /// CRC byte as received (or computed, when encoding).
    pub crc: u8,
}

impl Frame {
    /// Encodes a (message type, payload) pair into a complete frame.
    pub fn encode(message_type: u32, payload: &[u8]) -> Result<BytesMut, ProtocolError> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(ProtocolError::PayloadTooLarge(payload.len()));
        }

        let frame_length = payload.len() + MIN_FRAME_LENGTH;
        let mut buf = BytesMut::with_capacity(frame_length + 2);

        buf.put_u8(MESSAGE_SEPARATOR);
        buf.put_u8(frame_length as u8);
        buf.put_u8(((message_type >> 16) & 0xFF) as u8);
        buf.put_u8(((message_type >> 8) & 0xFF) as u8);
        buf.put_u8((message_type & 0xFF) as u8);
        buf.put_slice(payload);
        buf.put_u8(0); // CRC placeholder
        buf.put_u8(MESSAGE_SEPARATOR);

        let crc = crc::checksum(&buf)?;
        buf[frame_length] = crc;

        Ok(buf)
    }

    /// Decodes one frame from the front of `buf`.
    ///
    /// Returns `Ok(Some(frame))` if a complete, valid frame was
    /// consumed, `Ok(None)` if more data is needed (nothing consumed),
    /// or `Err` on corruption. Frame-local errors (bad trailing
    /// separator, under-length, CRC mismatch) consume the offending
    /// frame so the caller can keep scanning; a stream-fatal error
    /// (missing leading separator) consumes nothing and the caller
    /// must discard the buffer.
    pub fn decode(buf: &mut BytesMut) -> Result<Option<Frame>, ProtocolError> {
        if buf.len() < 2 {
            return Ok(None);
        }

        if buf[0] != MESSAGE_SEPARATOR {
            return Err(ProtocolError::MissingLeadingSeparator(buf[0]));
        }

        let frame_length = buf[1] as usize;
        let total_len = frame_length + 2;
        if buf.len() < total_len {
            return Ok(None);
        }

        // The candidate frame is complete; any failure past this point
        // is local to it, so consume it up front.
        let frame = buf.split_to(total_len).freeze();

        if frame[total_len - 1] != MESSAGE_SEPARATOR {
            return Err(ProtocolError::MissingTrailingSeparator(
                frame[total_len - 1],
            ));
        }

        if frame_length < MIN_FRAME_LENGTH {
            return Err(ProtocolError::FrameTooShort(frame_length as u8));
        }

        let computed = crc::checksum(&frame)?;
        let received = frame[total_len - 2];
        if computed != received {
            return Err(ProtocolError::CrcMismatch { computed, received });
        }

        let message_type =
            (frame[2] as u32) << 16 | (frame[3] as u32) << 8 | frame[4] as u32;
        let payload = frame.slice(5..total_len - 2);

        Ok(Some(Frame {
            message_type,
            payload,
            crc: received,
        }))
    }
}
