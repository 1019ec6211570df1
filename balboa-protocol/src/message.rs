//! Typed messages exchanged with a Balboa control unit.
//!
//! Inbound frames decode into the [`Message`] sum type via an explicit
//! match on the 24-bit type code; unknown codes become
//! [`Message::Unrecognized`] so undocumented protocol variants never
//! fail decoding. Outbound commands are built through the
//! [`OutboundMessage`] constructors, which validate or clamp their
//! inputs before anything reaches the wire.

use crate::error::ProtocolError;
use crate::frame::Frame;
use crate::{MAX_AUX, MAX_LIGHTS, MAX_PUMPS};
use bytes::{Bytes, BytesMut};

/// An item that can be read from status updates and, unless read only,
/// toggled with a [`OutboundMessage::toggle`] command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Pump,
    Light,
    Aux,
    Blower,
    Mister,
    TemperatureRange,
    HeatMode,
    HoldMode,
    // Read only (address is zero)
    Priming,
    Heater,
    Circulation,
}

impl ItemType {
    /// Protocol address of the item, zero for read-only items.
    pub fn address(&self) -> u8 {
        match self {
            ItemType::Pump => 0x04,
            ItemType::Light => 0x11,
            ItemType::Aux => 0x16,
            ItemType::Blower => 0x0C,
            ItemType::Mister => 0x0E,
            ItemType::TemperatureRange => 0x50,
            ItemType::HeatMode => 0x51,
            ItemType::HoldMode => 0x3C,
            ItemType::Priming | ItemType::Heater | ItemType::Circulation => 0x00,
        }
    }

    /// Number of instances a control unit can expose.
    pub fn count(&self) -> usize {
        match self {
            ItemType::Pump => MAX_PUMPS,
            ItemType::Light => MAX_LIGHTS,
            ItemType::Aux => MAX_AUX,
            _ => 1,
        }
    }

    /// Read-only items can never be the target of a toggle command.
    pub fn is_read_only(&self) -> bool {
        self.address() == 0x00
    }
}

/// The recurring, densely bit-packed report of current device state.
///
/// The temperature scale is decoded before the temperature bytes since
/// the same raw byte means different real-world units depending on it.
/// A raw temperature of `0xFF` is unreliable and surfaces as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    /// Temperatures are displayed in Celsius (otherwise Fahrenheit).
    pub celsius: bool,
    /// Clock is displayed in 24h format.
    pub time_24h: bool,
    pub priming: bool,
    pub circulation: bool,
    pub mister: bool,
    /// High temperature range selected (otherwise low range).
    pub temperature_high_range: bool,
    pub current_temperature: Option<f64>,
    pub target_temperature: Option<f64>,
    pub hour: u8,
    pub minute: u8,
    /// 0 = ready, 1 = rest, 3 = ready in rest.
    pub ready_state: u8,
    /// 0 = off, 1 = cycle 1, 2 = cycle 2, 3 = both.
    pub filter_state: u8,
    /// 0 = off, 1 = low, 2 = high.
    pub heat_state: u8,
    /// 0 = off, 1 = low, 2 = medium, 3 = high.
    pub blower: u8,
    /// Per-pump speed, 0 = off, 1 = low, 2 = high. One-speed pumps
    /// report only off and high.
    pub pumps: [u8; MAX_PUMPS],
    /// Per-light level, 0 = off up to 3 = high.
    pub lights: [u8; MAX_LIGHTS],
    pub aux: [bool; MAX_AUX],
}

impl StatusUpdate {
    pub const MESSAGE_TYPE: u32 = 0xFFAF13;
    pub const PAYLOAD_LENGTH: usize = 27;

    fn decode(payload: &[u8]) -> Self {
        // Scale flag first; it drives the temperature decoding below.
        let celsius = payload[9] & 0x01 != 0;
        let scale = if celsius { 0.5 } else { 1.0 };
        let temperature = |raw: u8| {
            if raw == 0xFF {
                None
            } else {
                Some(raw as f64 * scale)
            }
        };

        // Pump speeds: 2 bits per pump, 4 pumps per byte across two
        // consecutive bytes, least-significant pair is pump 0.
        let mut pumps = [0u8; MAX_PUMPS];
        for (i, pump) in pumps.iter_mut().enumerate() {
            *pump = (payload[11 + i / 4] >> ((i % 4) * 2)) & 0x03;
        }

        let mut lights = [0u8; MAX_LIGHTS];
        for (i, light) in lights.iter_mut().enumerate() {
            *light = (payload[14] >> (i * 2)) & 0x03;
        }

        let mut aux = [false; MAX_AUX];
        for (i, a) in aux.iter_mut().enumerate() {
            *a = payload[15] & (0x08 << i) != 0;
        }

        StatusUpdate {
            celsius,
            time_24h: payload[9] & 0x02 != 0,
            priming: payload[1] & 0x01 != 0,
            circulation: payload[13] & 0x02 != 0,
            mister: payload[15] & 0x01 != 0,
            temperature_high_range: payload[10] & 0x04 != 0,
            current_temperature: temperature(payload[2]),
            target_temperature: temperature(payload[20]),
            hour: payload[3],
            minute: payload[4],
            ready_state: payload[5] & 0x03,
            filter_state: (payload[9] >> 2) & 0x03,
            heat_state: (payload[10] >> 4) & 0x03,
            blower: (payload[13] >> 2) & 0x03,
            pumps,
            lights,
            aux,
        }
    }

    /// Returns the state code of an item instance.
    ///
    /// Out-of-range indices return 0 rather than erroring; decoding
    /// must never fail on consumer-supplied indices.
    pub fn item(&self, item: ItemType, index: usize) -> u8 {
        match item {
            ItemType::Pump => self.pumps.get(index).copied().unwrap_or(0),
            ItemType::Light => self.lights.get(index).copied().unwrap_or(0),
            ItemType::Aux => self.aux.get(index).copied().map(u8::from).unwrap_or(0),
            ItemType::Blower => self.blower,
            ItemType::Mister => u8::from(self.mister),
            ItemType::TemperatureRange => u8::from(self.temperature_high_range),
            ItemType::Circulation => u8::from(self.circulation),
            ItemType::Heater => self.heat_state,
            ItemType::Priming => u8::from(self.priming),
            // Not carried in status updates.
            ItemType::HeatMode | ItemType::HoldMode => 0,
        }
    }
}

/// The one-time capability manifest reported after connecting: which
/// pumps, lights and accessories exist and at what speed count.
///
/// Produced exactly once per successful handshake and immutable once
/// built. Bits beyond the documented fields are left opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfiguration {
    /// Per-pump capability, 0 = absent, 1 = one-speed, 2 = two-speed.
    pub pumps: [u8; MAX_PUMPS],
    /// Per-light capability code.
    pub lights: [u8; MAX_LIGHTS],
    pub aux: [bool; MAX_AUX],
    pub blower: u8,
    pub mister: u8,
    pub circulation: u8,
}

impl PanelConfiguration {
    pub const MESSAGE_TYPE: u32 = 0x0ABF2E;
    pub const PAYLOAD_LENGTH: usize = 6;

    fn decode(payload: &[u8]) -> Self {
        let pumps = [
            payload[0] & 0x03,
            (payload[0] >> 2) & 0x03,
            (payload[0] >> 4) & 0x03,
            (payload[0] >> 6) & 0x03,
            (payload[1] >> 2) & 0x03,
            (payload[1] >> 6) & 0x03,
        ];
        let lights = [payload[2] & 0x03, (payload[2] >> 6) & 0x03];
        let aux = [payload[4] & 0x01 != 0, payload[4] & 0x02 != 0];

        PanelConfiguration {
            pumps,
            lights,
            aux,
            blower: payload[3] & 0x03,
            circulation: (payload[3] >> 6) & 0x03,
            mister: (payload[4] >> 4) & 0x03,
        }
    }

    /// Capability code of the pump at `index`, 0 if out of range.
    pub fn pump(&self, index: usize) -> u8 {
        self.pumps.get(index).copied().unwrap_or(0)
    }

    /// Capability code of the light at `index`, 0 if out of range.
    pub fn light(&self, index: usize) -> u8 {
        self.lights.get(index).copied().unwrap_or(0)
    }

    /// Presence of the aux channel at `index`, false if out of range.
    pub fn aux(&self, index: usize) -> bool {
        self.aux.get(index).copied().unwrap_or(false)
    }
}

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    StatusUpdate(StatusUpdate),
    PanelConfiguration(PanelConfiguration),
    /// Response to an information settings request. The fields are
    /// undocumented; only its arrival is meaningful.
    InformationResponse,
    /// Any message type without a registered decoder. Carried as-is
    /// for forward compatibility, never an error.
    Unrecognized { message_type: u32, payload: Bytes },
}

/// Payload length of an information response (undocumented fields).
const INFORMATION_RESPONSE_PAYLOAD_LENGTH: usize = 21;

/// Message type code of an information response.
const INFORMATION_RESPONSE_TYPE: u32 = 0x0ABF24;

impl Message {
    /// Decodes a validated frame into a typed message.
    ///
    /// Returns `None` when a registered type arrives with the wrong
    /// payload length; the frame is skipped and scanning continues.
    pub fn from_frame(frame: &Frame) -> Option<Message> {
        let expected = match frame.message_type {
            StatusUpdate::MESSAGE_TYPE => StatusUpdate::PAYLOAD_LENGTH,
            PanelConfiguration::MESSAGE_TYPE => PanelConfiguration::PAYLOAD_LENGTH,
            INFORMATION_RESPONSE_TYPE => INFORMATION_RESPONSE_PAYLOAD_LENGTH,
            message_type => {
                return Some(Message::Unrecognized {
                    message_type,
                    payload: frame.payload.clone(),
                })
            }
        };

        if frame.payload.len() != expected {
            tracing::debug!(
                message_type = format_args!("{:#08x}", frame.message_type),
                actual = frame.payload.len(),
                expected,
                "payload length mismatch, skipping frame"
            );
            return None;
        }

        match frame.message_type {
            StatusUpdate::MESSAGE_TYPE => {
                Some(Message::StatusUpdate(StatusUpdate::decode(&frame.payload)))
            }
            PanelConfiguration::MESSAGE_TYPE => Some(Message::PanelConfiguration(
                PanelConfiguration::decode(&frame.payload),
            )),
            _ => Some(Message::InformationResponse),
        }
    }

    /// The 24-bit message type code.
    pub fn message_type(&self) -> u32 {
        match self {
            Message::StatusUpdate(_) => StatusUpdate::MESSAGE_TYPE,
            Message::PanelConfiguration(_) => PanelConfiguration::MESSAGE_TYPE,
            Message::InformationResponse => INFORMATION_RESPONSE_TYPE,
            Message::Unrecognized { message_type, .. } => *message_type,
        }
    }
}

/// The settings classes a [`OutboundMessage::SettingsRequest`] can ask
/// for. Each selects a fixed 3-byte request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsType {
    Panel,
    FilterCycles,
    Information,
    Preferences,
    /// Requests the latest fault log entry.
    FaultLog,
}

impl SettingsType {
    fn payload(&self) -> [u8; 3] {
        match self {
            SettingsType::Panel => [0x00, 0x00, 0x01],
            SettingsType::FilterCycles => [0x01, 0x00, 0x00],
            SettingsType::Information => [0x02, 0x00, 0x00],
            SettingsType::Preferences => [0x08, 0x00, 0x00],
            SettingsType::FaultLog => [0x20, 0xFF, 0x00],
        }
    }
}

/// A command message that can be encoded into a frame and sent to the
/// control unit.
///
/// Use the constructors rather than building variants directly: they
/// reject toggles of read-only items and out-of-range indices, and
/// clamp temperatures and clock values into their valid windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Queries the device for its configuration.
    ConfigurationRequest,
    /// Queries the device for one of its settings classes.
    SettingsRequest(SettingsType),
    /// Toggles the state of an item instance.
    Toggle { item: ItemType, index: usize },
    /// Sets the target temperature; the byte is the scaled wire value.
    SetTemperature { raw: u8 },
    /// Switches the display scale between Celsius and Fahrenheit.
    SetTemperatureScale { celsius: bool },
    /// Sets the clock; the hour byte carries the 24h display flag in
    /// its top bit.
    SetTime { hour: u8, minute: u8 },
}

impl OutboundMessage {
    /// Builds a toggle command for an item instance.
    ///
    /// Fails for read-only items and for indices outside
    /// `[0, count)`; both are caller bugs, preventable with the
    /// declared item counts, and never produce a frame.
    pub fn toggle(item: ItemType, index: usize) -> Result<Self, ProtocolError> {
        if item.is_read_only() {
            return Err(ProtocolError::ReadOnlyItem { item });
        }
        if index >= item.count() {
            return Err(ProtocolError::IndexOutOfBounds {
                item,
                index,
                count: item.count(),
            });
        }
        Ok(OutboundMessage::Toggle { item, index })
    }

    /// Builds a set-temperature command.
    ///
    /// `target` is clamped into the valid window for the scale/range
    /// combination (°C low 10..=26, °C high 26.5..=40, °F low
    /// 50..=80, °F high 79..=104), then scaled onto the wire: Celsius
    /// is stored in half-degree units.
    pub fn set_temperature(target: f64, celsius: bool, high_range: bool) -> Self {
        let (low, high, multiplier) = match (celsius, high_range) {
            (true, true) => (26.5, 40.0, 2.0),
            (true, false) => (10.0, 26.0, 2.0),
            (false, true) => (79.0, 104.0, 1.0),
            (false, false) => (50.0, 80.0, 1.0),
        };

        let raw = (target.clamp(low, high) * multiplier) as u8;
        OutboundMessage::SetTemperature { raw }
    }

    /// Builds a set-temperature-scale command.
    pub fn set_temperature_scale(celsius: bool) -> Self {
        OutboundMessage::SetTemperatureScale { celsius }
    }

    /// Builds a set-time command. The hour is clamped to 0..=23 and
    /// the minute to 0..=59; `display_24h` requests a 24h clock.
    pub fn set_time(hour: u8, minute: u8, display_24h: bool) -> Self {
        let mut hour = hour.min(23);
        if display_24h {
            hour |= 0x80;
        }
        OutboundMessage::SetTime {
            hour,
            minute: minute.min(59),
        }
    }

    /// The 24-bit message type code.
    pub fn message_type(&self) -> u32 {
        match self {
            OutboundMessage::ConfigurationRequest => 0x0ABF04,
            OutboundMessage::Toggle { .. } => 0x0ABF11,
            OutboundMessage::SetTemperature { .. } => 0x0ABF20,
            OutboundMessage::SetTime { .. } => 0x0ABF21,
            OutboundMessage::SettingsRequest(_) => 0x0ABF22,
            OutboundMessage::SetTemperatureScale { .. } => 0x0ABF27,
        }
    }

    /// The message payload.
    pub fn payload(&self) -> Vec<u8> {
        match self {
            OutboundMessage::ConfigurationRequest => Vec::new(),
            OutboundMessage::SettingsRequest(setting) => setting.payload().to_vec(),
            OutboundMessage::Toggle { item, index } => {
                vec![item.address() + *index as u8, 0x00]
            }
            OutboundMessage::SetTemperature { raw } => vec![*raw],
            OutboundMessage::SetTemperatureScale { celsius } => {
                vec![0x01, u8::from(*celsius)]
            }
            OutboundMessage::SetTime { hour, minute } => vec![*hour, *minute],
        }
    }

    /// Encodes the message into a complete wire frame.
    pub fn encode(&self) -> Result<BytesMut, ProtocolError> {
        Frame::encode(self.message_type(), &self.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a status payload with every field zeroed.
    fn empty_status_payload() -> [u8; StatusUpdate::PAYLOAD_LENGTH] {
        [0u8; StatusUpdate::PAYLOAD_LENGTH]
    }

    #[test]
    fn test_status_decode_temperatures_fahrenheit() {
        let mut payload = empty_status_payload();
        payload[2] = 100; // current
        payload[20] = 104; // target

        let status = StatusUpdate::decode(&payload);
        assert!(!status.celsius);
        assert_eq!(status.current_temperature, Some(100.0));
        assert_eq!(status.target_temperature, Some(104.0));
    }

    #[test]
    fn test_status_decode_temperatures_celsius_half_degrees() {
        let mut payload = empty_status_payload();
        payload[9] = 0x01; // celsius
        payload[2] = 77; // 38.5 C
        payload[20] = 80; // 40.0 C

        let status = StatusUpdate::decode(&payload);
        assert!(status.celsius);
        assert_eq!(status.current_temperature, Some(38.5));
        assert_eq!(status.target_temperature, Some(40.0));
    }

    #[test]
    fn test_status_unreliable_temperature_discarded() {
        for celsius in [false, true] {
            let mut payload = empty_status_payload();
            payload[9] = u8::from(celsius);
            payload[2] = 0xFF;
            payload[20] = 0xFF;

            let status = StatusUpdate::decode(&payload);
            assert_eq!(status.current_temperature, None);
            assert_eq!(status.target_temperature, None);
        }
    }

    #[test]
    fn test_status_pump_bit_packing() {
        let mut payload = empty_status_payload();
        // P3..P0 in byte 11, P5 and P4 in byte 12.
        payload[11] = 0b10_01_00_11; // pump0=3, pump1=0, pump2=1, pump3=2
        payload[12] = 0b0000_0110; // pump4=2, pump5=1

        let status = StatusUpdate::decode(&payload);
        assert_eq!(status.pumps, [3, 0, 1, 2, 2, 1]);
    }

    #[test]
    fn test_status_lights_aux_and_flags() {
        let mut payload = empty_status_payload();
        payload[1] = 0x01; // priming
        payload[5] = 0x03; // ready in rest
        payload[9] = 0b0000_1110; // 24h clock, filter both cycles
        payload[10] = 0b0011_0100; // high range, heat state 3
        payload[13] = 0b0000_1110; // circulation, blower 3
        payload[14] = 0b0000_0110; // light0=2, light1=1
        payload[15] = 0b0001_1001; // mister, aux0, aux1

        let status = StatusUpdate::decode(&payload);
        assert!(status.priming);
        assert_eq!(status.ready_state, 3);
        assert!(status.time_24h);
        assert_eq!(status.filter_state, 3);
        assert!(status.temperature_high_range);
        assert_eq!(status.heat_state, 3);
        assert!(status.circulation);
        assert_eq!(status.blower, 3);
        assert_eq!(status.lights, [2, 1]);
        assert!(status.mister);
        assert_eq!(status.aux, [true, true]);
    }

    #[test]
    fn test_status_item_accessor_out_of_range_is_zero() {
        let mut payload = empty_status_payload();
        payload[11] = 0x02;
        let status = StatusUpdate::decode(&payload);

        assert_eq!(status.item(ItemType::Pump, 0), 2);
        assert_eq!(status.item(ItemType::Pump, 99), 0);
        assert_eq!(status.item(ItemType::Light, 99), 0);
        assert_eq!(status.item(ItemType::Aux, 99), 0);
    }

    #[test]
    fn test_panel_configuration_captured_sample() {
        // 7E 0B 0A BF 2E 1A 00 01 90 00 00 AC 7E: one light, pumps 1
        // and 2 two-speed, pump 3 one-speed, no mister or blower.
        let payload = [0x1A, 0x00, 0x01, 0x90, 0x00, 0x00];
        let config = PanelConfiguration::decode(&payload);

        assert_eq!(config.pumps, [2, 2, 1, 0, 0, 0]);
        assert_eq!(config.lights, [1, 0]);
        assert_eq!(config.aux, [false, false]);
        assert_eq!(config.blower, 0);
        assert_eq!(config.mister, 0);
        assert_eq!(config.circulation, 2);
    }

    #[test]
    fn test_panel_configuration_one_speed_pump_bit() {
        let mut payload = [0u8; PanelConfiguration::PAYLOAD_LENGTH];
        payload[0] = 0b01;
        let config = PanelConfiguration::decode(&payload);
        assert_eq!(config.pump(0), 1);
        assert_eq!(config.pump(1), 0);
        assert_eq!(config.pump(99), 0);
    }

    #[test]
    fn test_registry_dispatch() {
        let frame =
            Frame::decode(&mut Frame::encode(0x0ABF2E, &[0x1A, 0x00, 0x01, 0x90, 0x00, 0x00]).unwrap())
                .unwrap()
                .unwrap();
        assert!(matches!(
            Message::from_frame(&frame),
            Some(Message::PanelConfiguration(_))
        ));

        let frame = Frame::decode(&mut Frame::encode(0xFFAF13, &[0u8; 27]).unwrap())
            .unwrap()
            .unwrap();
        assert!(matches!(
            Message::from_frame(&frame),
            Some(Message::StatusUpdate(_))
        ));
    }

    #[test]
    fn test_registry_unknown_type_is_not_an_error() {
        let frame = Frame::decode(&mut Frame::encode(0x123456, &[0xAA, 0xBB]).unwrap())
            .unwrap()
            .unwrap();

        match Message::from_frame(&frame) {
            Some(Message::Unrecognized {
                message_type,
                payload,
            }) => {
                assert_eq!(message_type, 0x123456);
                assert_eq!(payload.as_ref(), &[0xAA, 0xBB]);
            }
            other => panic!("expected unrecognized message, got {:?}", other),
        }
    }

    #[test]
    fn test_registry_length_mismatch_skipped() {
        // Status update type with a truncated payload.
        let frame = Frame::decode(&mut Frame::encode(0xFFAF13, &[0u8; 10]).unwrap())
            .unwrap()
            .unwrap();
        assert!(Message::from_frame(&frame).is_none());
    }

    #[test]
    fn test_toggle_rejects_read_only_items() {
        for item in [ItemType::Priming, ItemType::Heater, ItemType::Circulation] {
            assert!(matches!(
                OutboundMessage::toggle(item, 0),
                Err(ProtocolError::ReadOnlyItem { .. })
            ));
        }
    }

    #[test]
    fn test_toggle_rejects_out_of_bounds_index() {
        assert!(matches!(
            OutboundMessage::toggle(ItemType::Pump, MAX_PUMPS),
            Err(ProtocolError::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            OutboundMessage::toggle(ItemType::Blower, 1),
            Err(ProtocolError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_toggle_payload_addresses() {
        let msg = OutboundMessage::toggle(ItemType::Pump, 2).unwrap();
        assert_eq!(msg.payload(), vec![0x06, 0x00]);
        assert_eq!(msg.message_type(), 0x0ABF11);

        let msg = OutboundMessage::toggle(ItemType::Light, 1).unwrap();
        assert_eq!(msg.payload(), vec![0x12, 0x00]);
    }

    #[test]
    fn test_set_temperature_clamps_low_range_celsius() {
        // 5 C is below the low-range floor of 10 C; half-degree wire
        // units make that byte 20.
        let msg = OutboundMessage::set_temperature(5.0, true, false);
        assert_eq!(msg.payload(), vec![20]);
    }

    #[test]
    fn test_set_temperature_clamps_low_range_fahrenheit() {
        // 90 F exceeds the low-range ceiling of 80 F.
        let msg = OutboundMessage::set_temperature(90.0, false, false);
        assert_eq!(msg.payload(), vec![80]);
    }

    #[test]
    fn test_set_temperature_in_range() {
        let msg = OutboundMessage::set_temperature(37.5, true, true);
        assert_eq!(msg.payload(), vec![75]);

        let msg = OutboundMessage::set_temperature(102.0, false, true);
        assert_eq!(msg.payload(), vec![102]);
    }

    #[test]
    fn test_set_time_clamps_and_flags() {
        let msg = OutboundMessage::set_time(7, 30, false);
        assert_eq!(msg.payload(), vec![7, 30]);

        let msg = OutboundMessage::set_time(99, 99, false);
        assert_eq!(msg.payload(), vec![23, 59]);

        let msg = OutboundMessage::set_time(21, 5, true);
        assert_eq!(msg.payload(), vec![0x80 | 21, 5]);
    }

    #[test]
    fn test_settings_request_payloads() {
        let cases = [
            (SettingsType::Panel, [0x00, 0x00, 0x01]),
            (SettingsType::FilterCycles, [0x01, 0x00, 0x00]),
            (SettingsType::Information, [0x02, 0x00, 0x00]),
            (SettingsType::Preferences, [0x08, 0x00, 0x00]),
            (SettingsType::FaultLog, [0x20, 0xFF, 0x00]),
        ];
        for (setting, payload) in cases {
            let msg = OutboundMessage::SettingsRequest(setting);
            assert_eq!(msg.payload(), payload.to_vec());
            assert_eq!(msg.message_type(), 0x0ABF22);
        }
    }

    #[test]
    fn test_outbound_encode_roundtrip() {
        let msg = OutboundMessage::SettingsRequest(SettingsType::Information);
        let mut encoded = msg.encode().unwrap();

        let frame = Frame::decode(&mut encoded).unwrap().unwrap();
        assert_eq!(frame.message_type, 0x0ABF22);
        assert_eq!(frame.payload.as_ref(), &[0x02, 0x00, 0x00]);
    }

    #[test]
    fn test_scale_message_payload() {
        let msg = OutboundMessage::set_temperature_scale(true);
        assert_eq!(msg.payload(), vec![0x01, 0x01]);
        let msg = OutboundMessage::set_temperature_scale(false);
        assert_eq!(msg.payload(), vec![0x01, 0x00]);
        assert_eq!(msg.message_type(), 0x0ABF27);
    }
}
