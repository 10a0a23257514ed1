// src/decoder/bits.rs
use std::ops::Range;

/// Contiguous bitstream unpacked from a six-bit armored payload.
///
/// Bits are stored most significant first, in payload order, so bit 0 is the
/// high bit of the first payload character.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Append the low `width` bits of `value`, most significant first
    pub fn push_bits(&mut self, value: u64, width: u32) {
        for shift in (0..width).rev() {
            self.bits.push(value >> shift & 1 == 1);
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bit(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Read `range` as a big-endian unsigned integer.
    ///
    /// Returns None if the range runs past the end or is wider than 64 bits.
    pub fn unsigned(&self, range: Range<usize>) -> Option<u64> {
        if range.len() > 64 {
            return None;
        }
        let field = self.bits.get(range)?;
        Some(field.iter().fold(0u64, |acc, &bit| acc << 1 | bit as u64))
    }

    /// Read `range` as a two's complement signed integer
    pub fn signed(&self, range: Range<usize>) -> Option<i64> {
        let width = range.len() as u32;
        let raw = self.unsigned(range)?;
        Some(twos_complement(raw, width))
    }

    /// Re-armor the bitstream into six-bit payload characters.
    ///
    /// Returns None unless the length is a whole number of six-bit groups.
    pub fn to_payload(&self) -> Option<String> {
        if self.len() % 6 != 0 {
            return None;
        }
        (0..self.len())
            .step_by(6)
            .map(|start| {
                let value = self.unsigned(start..start + 6)? as u8;
                let code = if value < 40 { value + 48 } else { value + 56 };
                Some(code as char)
            })
            .collect()
    }
}

/// Interpret the low `width` bits of `raw` as a two's complement integer.
///
/// If bit `width - 1` is set the value is `raw - 2^width`, otherwise `raw`.
/// `raw` must already be masked to `width` bits.
pub fn twos_complement(raw: u64, width: u32) -> i64 {
    if width == 0 || width > 64 {
        return raw as i64;
    }
    if raw >> (width - 1) & 1 == 1 {
        (raw as i128 - (1i128 << width)) as i64
    } else {
        raw as i64
    }
}
