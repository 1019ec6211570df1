//! CRC-8 checksum used by the Balboa wire protocol.
//!
//! Table-driven, polynomial `0x07`, seed `0x02`, final XOR `0x02`.
//! The checksum covers the candidate frame from the length byte up to
//! but excluding the CRC byte itself, so both separators stay outside
//! the checksummed range.

use crate::error::ProtocolError;

const POLY: u8 = 0x07;
const INIT: u8 = 0x02;
const FINAL_XOR: u8 = 0x02;

/// 256-entry lookup table, one shift-and-XOR reduction per possible byte.
const CRC_TABLE: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut dividend = 0usize;
    while dividend < 256 {
        let mut byte = dividend as u8;
        let mut bit = 0;
        while bit < 8 {
            if byte & 0x80 != 0 {
                byte = (byte << 1) ^ POLY;
            } else {
                byte <<= 1;
            }
            bit += 1;
        }
        table[dividend] = byte;
        dividend += 1;
    }
    table
}

/// Computes the checksum of a candidate frame buffer.
///
/// The buffer must span the full frame including both separators; the
/// checksummed range is `[1, len - 2)`, i.e. the length byte, message
/// type and payload.
pub fn checksum(frame: &[u8]) -> Result<u8, ProtocolError> {
    if frame.is_empty() {
        return Err(ProtocolError::EmptyCrcInput);
    }

    let mut crc = INIT;
    for &byte in &frame[1..frame.len().saturating_sub(2)] {
        crc = CRC_TABLE[(byte ^ crc) as usize];
    }
    Ok(crc ^ FINAL_XOR)
}
