//! NMEA AIVDM decoding pipeline
//!
//! A raw sentence flows through [`parse_sentence`], [`to_bits`] and
//! [`decode_position_report`]; [`decode_sentence`] chains the three.
mod bits;
mod position;
mod sentence;
mod sixbit;

pub use bits::{twos_complement, BitString};
pub use position::{decode_position_report, POSITION_REPORT_BITS};
pub use sentence::{parse_sentence, Payload};
pub use sixbit::to_bits;

use crate::{errors::DecodeError, models::PositionReport};

/// Decode a single-fragment AIVDM/AIVDO sentence into a position report.
///
/// The message identifier is not checked, see [`decode_position_report`].
pub fn decode_sentence(line: &str) -> Result<PositionReport, DecodeError> {
    let payload = parse_sentence(line)?;
    let bits = to_bits(payload.as_str())?;
    decode_position_report(&bits)
}

/// Whether a line looks like an AIS sentence at all.
///
/// Lines failing this check are other NMEA traffic and are skipped without
/// being reported as decode failures.
pub fn is_ais_sentence(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("!AIVDM") || line.starts_with("!AIVDO")
}
