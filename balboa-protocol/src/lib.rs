//! # balboa-protocol
//!
//! Wire protocol implementation for Balboa spa control units.
//!
//! This crate provides:
//! - Separator-delimited binary framing with an 8-bit CRC
//! - Typed inbound messages decoded from densely bit-packed payloads
//! - Outbound command message encoding
//! - An incremental stream decoder for partial and multiplexed frames
//!
//! Protocol details are taken from the community documentation at
//! <https://github.com/ccutrer/balboa_worldwide_app>.

pub mod codec;
pub mod crc;
pub mod error;
pub mod frame;
pub mod message;

pub use codec::Decoder;
pub use error::ProtocolError;
pub use frame::{Frame, MESSAGE_SEPARATOR};
pub use message::{
    ItemType, Message, OutboundMessage, PanelConfiguration, SettingsType, StatusUpdate,
};

/// Default TCP port Balboa control units listen on.
pub const DEFAULT_PORT: u16 = 4257;

/// Maximum number of pumps a control unit can report.
pub const MAX_PUMPS: usize = 6;

/// Maximum number of lights a control unit can report.
pub const MAX_LIGHTS: usize = 2;

/// Maximum number of aux channels a control unit can report.
pub const MAX_AUX: usize = 2;
