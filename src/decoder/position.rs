// src/decoder/position.rs
use std::ops::Range;

use crate::{
    decoder::bits::{twos_complement, BitString},
    errors::DecodeError,
    models::{Mmsi, PositionReport},
};

/// Length of a type 1 position report
pub const POSITION_REPORT_BITS: usize = 168;

const MESSAGE_ID: Range<usize> = 0..6;
const REPEAT_INDICATOR: Range<usize> = 6..8;
const MMSI: Range<usize> = 8..38;
const NAVIGATIONAL_STATUS: Range<usize> = 38..42;
const ROT: Range<usize> = 42..50;
const SOG: Range<usize> = 50..60;
const POSITION_ACCURACY: Range<usize> = 60..61;
const LONGITUDE: Range<usize> = 61..89;
const LATITUDE: Range<usize> = 89..116;
const COG: Range<usize> = 116..128;
const TRUE_HEADING: Range<usize> = 128..137;
const TIMESTAMP: Range<usize> = 137..143;
const SPECIAL_MANOEUVRE: Range<usize> = 143..145;
const RAIM_FLAG: Range<usize> = 148..149;
const COMMUNICATION_STATE: Range<usize> = 149..168;

const ROT_NOT_AVAILABLE: u64 = 128;
const SOG_NOT_AVAILABLE: u64 = 1023;
const LONGITUDE_NOT_AVAILABLE: u64 = 181 * 600_000;
const LATITUDE_NOT_AVAILABLE: u64 = 91 * 600_000;
const COG_NOT_AVAILABLE: u64 = 3600;
const HEADING_NOT_AVAILABLE: u64 = 511;

/// Coordinates are transmitted in 1/10000 minutes
const COORDINATE_SCALE: f64 = 600_000.0;

/// Decode the first 168 bits as a Position Report Class A.
///
/// The layout is applied regardless of the message identifier, so callers
/// must check [`PositionReport::is_position_report`] before trusting fields
/// beyond the common prefix. Bits past 168 are ignored.
pub fn decode_position_report(bits: &BitString) -> Result<PositionReport, DecodeError> {
    if bits.len() < POSITION_REPORT_BITS {
        return Err(DecodeError::TruncatedMessage { bits: bits.len() });
    }
    let field = |range: Range<usize>| -> Result<u64, DecodeError> {
        bits.unsigned(range)
            .ok_or(DecodeError::TruncatedMessage { bits: bits.len() })
    };

    let rot = field(ROT)?;
    let sog = field(SOG)?;
    let longitude = field(LONGITUDE)?;
    let latitude = field(LATITUDE)?;
    let cog = field(COG)?;
    let true_heading = field(TRUE_HEADING)?;

    Ok(PositionReport {
        message_id: field(MESSAGE_ID)? as u8,
        repeat_indicator: field(REPEAT_INDICATOR)? as u8,
        mmsi: Mmsi::from(field(MMSI)? as u32),
        navigational_status: field(NAVIGATIONAL_STATUS)? as u8,
        rot: (rot != ROT_NOT_AVAILABLE).then(|| twos_complement(rot, ROT.len() as u32) as i8),
        sog: (sog != SOG_NOT_AVAILABLE).then(|| sog as f64 / 10.0),
        position_accuracy: field(POSITION_ACCURACY)? as u8,
        longitude: coordinate(longitude, LONGITUDE, LONGITUDE_NOT_AVAILABLE),
        latitude: coordinate(latitude, LATITUDE, LATITUDE_NOT_AVAILABLE),
        cog: (cog != COG_NOT_AVAILABLE).then(|| cog as f64 / 10.0),
        true_heading: (true_heading != HEADING_NOT_AVAILABLE).then_some(true_heading as u16),
        timestamp: field(TIMESTAMP)? as u8,
        special_manoeuvre: field(SPECIAL_MANOEUVRE)? as u8,
        raim_flag: field(RAIM_FLAG)? as u8,
        communication_state: field(COMMUNICATION_STATE)? as u32,
    })
}

/// Scale a raw coordinate to degrees, None if it carries the sentinel
fn coordinate(raw: u64, range: Range<usize>, not_available: u64) -> Option<f64> {
    if raw == not_available {
        return None;
    }
    Some(twos_complement(raw, range.len() as u32) as f64 / COORDINATE_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::sixbit::to_bits;

    /// Field values in layout order, used to assemble test bitstreams
    struct RawReport {
        fields: Vec<(Range<usize>, u64)>,
    }

    impl RawReport {
        fn new() -> Self {
            Self {
                fields: vec![
                    (MESSAGE_ID, 1),
                    (REPEAT_INDICATOR, 0),
                    (MMSI, 230_123_456),
                    (NAVIGATIONAL_STATUS, 0),
                    (ROT, 0),
                    (SOG, 107),
                    (POSITION_ACCURACY, 1),
                    (LONGITUDE, 0),
                    (LATITUDE, 0),
                    (COG, 3266),
                    (TRUE_HEADING, 325),
                    (TIMESTAMP, 25),
                    (SPECIAL_MANOEUVRE, 0),
                    (145..148, 0),
                    (RAIM_FLAG, 0),
                    (COMMUNICATION_STATE, 0),
                ],
            }
        }

        fn set(mut self, range: Range<usize>, value: u64) -> Self {
            for field in self.fields.iter_mut() {
                if field.0 == range {
                    field.1 = value;
                }
            }
            self
        }

        fn bits(&self) -> BitString {
            let mut bits = BitString::with_capacity(POSITION_REPORT_BITS);
            for (range, value) in &self.fields {
                bits.push_bits(*value, range.len() as u32);
            }
            bits
        }
    }

    /// Two's complement encoding of `value` in `width` bits
    fn encode_signed(value: i64, width: u32) -> u64 {
        (value as u64) & ((1u64 << width) - 1)
    }

    #[test]
    fn decode_known_payload() {
        let bits = to_bits("13aEOK?P00PD2wVMdLDRhgvL289?").unwrap();
        let report = decode_position_report(&bits).unwrap();

        let expected = PositionReport {
            message_id: 1,
            repeat_indicator: 0,
            mmsi: Mmsi::from(244_670_316),
            navigational_status: 15,
            rot: None,
            sog: Some(0.0),
            position_accuracy: 1,
            longitude: Some(2_627_571.0 / 600_000.0),
            latitude: Some(31_136_850.0 / 600_000.0),
            cog: Some(70.6),
            true_heading: None,
            timestamp: 14,
            special_manoeuvre: 0,
            raim_flag: 1,
            communication_state: 33_359,
        };

        assert_eq!(report, expected);
        assert!(report.is_position_report());
        assert!((report.longitude.unwrap() - 4.379285).abs() < 1e-9);
        assert!((report.latitude.unwrap() - 51.89475).abs() < 1e-9);
    }

    #[test]
    fn decode_negative_values() {
        let bits = RawReport::new()
            .set(ROT, encode_signed(-127, 8))
            .set(LONGITUDE, encode_signed(-(70 * 600_000 + 30_000), 28))
            .set(LATITUDE, encode_signed(-(33 * 600_000), 27))
            .bits();
        let report = decode_position_report(&bits).unwrap();

        assert_eq!(report.rot, Some(-127));
        assert_eq!(report.longitude, Some(-70.05));
        assert_eq!(report.latitude, Some(-33.0));
        assert_eq!(report.mmsi.value(), 230_123_456);
        assert_eq!(report.sog, Some(10.7));
        assert_eq!(report.cog, Some(326.6));
        assert_eq!(report.true_heading, Some(325));
    }

    #[test]
    fn decode_not_available_values() {
        let bits = RawReport::new()
            .set(ROT, 128)
            .set(SOG, 1023)
            .set(LONGITUDE, 181 * 600_000)
            .set(LATITUDE, 91 * 600_000)
            .set(COG, 3600)
            .set(TRUE_HEADING, 511)
            .bits();
        let report = decode_position_report(&bits).unwrap();

        assert_eq!(report.rot, None);
        assert_eq!(report.sog, None);
        assert_eq!(report.longitude, None);
        assert_eq!(report.latitude, None);
        assert_eq!(report.cog, None);
        assert_eq!(report.true_heading, None);
    }

    #[test]
    fn decode_values_next_to_sentinels() {
        let bits = RawReport::new()
            .set(ROT, 127)
            .set(SOG, 1022)
            .set(LONGITUDE, 180 * 600_000)
            .set(LATITUDE, 90 * 600_000)
            .set(COG, 3599)
            .set(TRUE_HEADING, 359)
            .bits();
        let report = decode_position_report(&bits).unwrap();

        assert_eq!(report.rot, Some(127));
        assert_eq!(report.sog, Some(102.2));
        assert_eq!(report.longitude, Some(180.0));
        assert_eq!(report.latitude, Some(90.0));
        assert_eq!(report.cog, Some(359.9));
        assert_eq!(report.true_heading, Some(359));
    }

    #[test]
    fn ignore_trailing_bits() {
        let mut bits = RawReport::new().set(COMMUNICATION_STATE, 0x7FFFF).bits();
        bits.push_bits(0b111111, 6);
        let report = decode_position_report(&bits).unwrap();

        assert_eq!(report.communication_state, 0x7FFFF);
    }

    #[test]
    fn other_message_types_use_the_same_layout() {
        let bits = RawReport::new().set(MESSAGE_ID, 5).bits();
        let report = decode_position_report(&bits).unwrap();

        assert_eq!(report.message_id, 5);
        assert!(!report.is_position_report());
        assert_eq!(report.mmsi.value(), 230_123_456);
    }

    #[test]
    fn truncated_message() {
        let bits = to_bits("13aEOK?P00PD2wVMdLDRhgvL289").unwrap();
        assert_eq!(bits.len(), 162);

        let err = decode_position_report(&bits).unwrap_err();
        assert_eq!(err, DecodeError::TruncatedMessage { bits: 162 });

        let err = decode_position_report(&BitString::default()).unwrap_err();
        assert_eq!(err, DecodeError::TruncatedMessage { bits: 0 });
    }
}
