//! Incremental stream decoder.
//!
//! Consumes an unbounded incoming byte stream in arbitrary chunks and
//! yields complete frames. Partial frames stay buffered across reads;
//! corrupt frames are skipped; a buffer that has lost its frame
//! alignment is discarded wholesale, since there is no reliable way to
//! find the next frame boundary byte-by-byte without false positives
//! on payload bytes that happen to equal the separator.

use crate::frame::Frame;
use bytes::BytesMut;

/// Decodes frames from an incrementally received byte stream.
///
/// One instance exists per connection; call [`Decoder::clear`]
/// between connections so no stale bytes leak into a new session.
pub struct Decoder {
    buffer: BytesMut,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(512),
        }
    }

    /// Appends newly received data to the internal buffer.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Extracts the next complete, valid frame from the buffer.
    ///
    /// Returns `None` once the remaining data holds no complete frame;
    /// the remainder (including any partial frame) is retained for the
    /// next read. Frame-local corruption is skipped with a diagnostic;
    /// stream-level corruption discards the whole buffer and
    /// resynchronizes on the next read.
    pub fn decode_frame(&mut self) -> Option<Frame> {
        loop {
            match Frame::decode(&mut self.buffer) {
                Ok(frame) => return frame,
                Err(err) if err.is_stream_fatal() => {
                    tracing::debug!(
                        discarded = self.buffer.len(),
                        "corrupt stream: {err}, discarding buffer"
                    );
                    self.buffer.clear();
                    return None;
                }
                Err(err) => {
                    tracing::debug!("corrupt frame: {err}, skipping");
                }
            }
        }
    }

    /// Returns the number of bytes currently buffered.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Drops all buffered data.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn status_frame(minute: u8) -> BytesMut {
        let mut payload = [0u8; 27];
        payload[4] = minute;
        Frame::encode(0xFFAF13, &payload).unwrap()
    }

    #[test]
    fn test_single_frame() {
        let mut decoder = Decoder::new();
        decoder.extend(&status_frame(1));

        let frame = decoder.decode_frame().unwrap();
        assert_eq!(frame.message_type, 0xFFAF13);
        assert!(decoder.decode_frame().is_none());
        assert_eq!(decoder.buffered(), 0);
    }

    #[test]
    fn test_partial_frame_retained_across_reads() {
        let encoded = status_frame(2);
        let mut decoder = Decoder::new();

        decoder.extend(&encoded[..7]);
        assert!(decoder.decode_frame().is_none());
        assert_eq!(decoder.buffered(), 7);

        decoder.extend(&encoded[7..]);
        assert!(decoder.decode_frame().is_some());
    }

    #[test]
    fn test_multiplexed_frames_in_one_read() {
        let mut decoder = Decoder::new();
        let mut data = Vec::new();
        data.extend_from_slice(&status_frame(1));
        data.extend_from_slice(&status_frame(2));
        data.extend_from_slice(&status_frame(3));
        decoder.extend(&data);

        let mut minutes = Vec::new();
        while let Some(frame) = decoder.decode_frame() {
            minutes.push(frame.payload[4]);
        }
        assert_eq!(minutes, vec![1, 2, 3]);
    }

    #[test]
    fn test_corrupt_crc_skipped_next_frame_decoded() {
        let mut bad = status_frame(1);
        let crc_pos = bad.len() - 2;
        bad[crc_pos] ^= 0xFF;

        let mut decoder = Decoder::new();
        decoder.extend(&bad);
        decoder.extend(&status_frame(2));

        let frame = decoder.decode_frame().unwrap();
        assert_eq!(frame.payload[4], 2);
        assert!(decoder.decode_frame().is_none());
    }

    #[test]
    fn test_misaligned_buffer_discarded_and_resynchronized() {
        let mut decoder = Decoder::new();
        decoder.extend(&[0x00, 0x13, 0x37, 0x42]);
        assert!(decoder.decode_frame().is_none());
        assert_eq!(decoder.buffered(), 0);

        // The next read starts a clean frame.
        decoder.extend(&status_frame(5));
        assert!(decoder.decode_frame().is_some());
    }

    #[test]
    fn test_clear_drops_partial_data() {
        let encoded = status_frame(1);
        let mut decoder = Decoder::new();
        decoder.extend(&encoded[..10]);
        decoder.clear();

        decoder.extend(&status_frame(2));
        let frame = decoder.decode_frame().unwrap();
        assert_eq!(frame.payload[4], 2);
    }

    proptest! {
        /// Splitting one valid frame into two chunks at any offset
        /// yields exactly one decoded frame, identical to feeding the
        /// frame whole.
        #[test]
        fn prop_two_chunk_split_decodes_once(split in 1usize..33) {
            let encoded = status_frame(7);
            prop_assume!(split < encoded.len());

            let mut decoder = Decoder::new();
            decoder.extend(&encoded[..split]);
            let early = decoder.decode_frame();
            decoder.extend(&encoded[split..]);
            let frame = match early {
                Some(frame) => frame,
                None => decoder.decode_frame().expect("frame must complete"),
            };

            prop_assert_eq!(frame.message_type, 0xFFAF13);
            prop_assert_eq!(frame.payload[4], 7);
            prop_assert!(decoder.decode_frame().is_none());
        }

        /// Any payload round-trips through encode and the decoder.
        #[test]
        fn prop_roundtrip(message_type in 0u32..0x0100_0000, payload in proptest::collection::vec(any::<u8>(), 0..64)) {
            let encoded = Frame::encode(message_type, &payload).unwrap();

            let mut decoder = Decoder::new();
            decoder.extend(&encoded);
            let frame = decoder.decode_frame().expect("valid frame");

            prop_assert_eq!(frame.message_type, message_type);
            prop_assert_eq!(frame.payload.as_ref(), payload.as_slice());
        }
    }
}
