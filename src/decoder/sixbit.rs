// src/decoder/sixbit.rs
use crate::{decoder::bits::BitString, errors::DecodeError};

const GROUP_WIDTH: u32 = 6;

/// Map an armor character to its six-bit value.
///
/// Characters `0`..=`W` map to 0 - 39 and `` ` ``..=`w` to 40 - 63.
fn armor_value(ch: char) -> Option<u8> {
    let code = ch as u32;
    let value = if code < 88 {
        code.checked_sub(48)?
    } else {
        code.checked_sub(56)?
    };
    (value <= 63).then_some(value as u8)
}

/// Unpack a six-bit armored payload into a bitstream of `6 * len` bits
pub fn to_bits(payload: &str) -> Result<BitString, DecodeError> {
    let mut bits = BitString::with_capacity(payload.len() * GROUP_WIDTH as usize);
    for (position, ch) in payload.chars().enumerate() {
        let value =
            armor_value(ch).ok_or(DecodeError::InvalidArmorChar { ch, position })?;
        bits.push_bits(value as u64, GROUP_WIDTH);
    }
    Ok(bits)
}
