//! The three bit fields of a binary16 value.

use error::{Error, Field};
use raw::Binary16;

bitflags! {
    /// Bit masks of the binary16 layout.
    ///
    /// ```notrust
    /// +------+----------+----------+
    /// |  15  |  14-10   |   9-0    |
    /// | sign | exponent | fraction |
    /// +------+----------+----------+
    /// ```
    pub struct Layout: u16 {
        /// Sign bit. Set for negative values (including `-0.0`).
        const SIGN     = 0b10000000_00000000;
        /// Biased 5-bit exponent.
        const EXPONENT = 0b01111100_00000000;
        /// 10-bit fraction (the significand without its implicit bit).
        const FRACTION = 0b00000011_11111111;
    }
}

impl Layout {
    /// Position of the lowest exponent bit.
    pub const EXPONENT_SHIFT: u32 = 10;
}

/// A binary16 value split into sign, biased exponent and fraction.
///
/// Every combination of in-range fields is a valid binary16 pattern, so
/// splitting and [`pack`](#method.pack)ing is lossless in both directions.
/// The fields can only be set through [`new`](#method.new), which keeps them
/// in range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Fields {
    sign: bool,
    /// `0..=31`
    exponent: u8,
    /// `0..=0x3FF`
    fraction: u16,
}

impl Fields {
    /// Creates a `Fields` from separately supplied field values.
    ///
    /// `sign` must be 0 or 1, `exponent` at most `0x1F` and `fraction` at most
    /// `0x3FF`. Out-of-range values are rejected instead of masked.
    pub fn new(sign: u8, exponent: u8, fraction: u16) -> Result<Self, Error> {
        if sign > 1 {
            return Err(Error::FieldOutOfRange { field: Field::Sign, value: u16::from(sign) });
        }
        if exponent > Binary16::MAX_BIASED_EXPONENT {
            return Err(Error::FieldOutOfRange { field: Field::Exponent, value: u16::from(exponent) });
        }
        if fraction > Layout::FRACTION.bits() {
            return Err(Error::FieldOutOfRange { field: Field::Fraction, value: fraction });
        }

        Ok(Self {
            sign: sign == 1,
            exponent,
            fraction,
        })
    }

    /// Masks each field to its width. Only for callers that already hold
    /// in-range values.
    pub(crate) fn masked(sign: bool, exponent: u8, fraction: u16) -> Self {
        Self {
            sign,
            exponent: exponent & Binary16::MAX_BIASED_EXPONENT,
            fraction: fraction & Layout::FRACTION.bits(),
        }
    }

    /// The sign bit.
    pub fn sign(&self) -> bool {
        self.sign
    }

    /// The biased exponent (`0..=31`).
    pub fn exponent(&self) -> u8 {
        self.exponent
    }

    /// The fraction bits (`0..=0x3FF`).
    pub fn fraction(&self) -> u16 {
        self.fraction
    }

    /// Creates a `Fields` from a binary sign digit and hex exponent and
    /// fraction strings, the way the fields are usually entered by hand.
    ///
    /// The strings may carry a `0x` prefix.
    pub fn from_hex_parts(sign: &str, exponent: &str, fraction: &str) -> Result<Self, Error> {
        let sign = parse_hex(sign)?;
        let exponent = parse_hex(exponent)?;
        let fraction = parse_hex(fraction)?;
        if sign > 0xFF {
            return Err(Error::FieldOutOfRange { field: Field::Sign, value: sign });
        }
        if exponent > 0xFF {
            return Err(Error::FieldOutOfRange { field: Field::Exponent, value: exponent });
        }

        Self::new(sign as u8, exponent as u8, fraction)
    }

    /// Packs the fields back into a raw binary16 value.
    pub fn pack(&self) -> Binary16 {
        let sign = if self.sign { Layout::SIGN.bits() } else { 0 };
        let exponent = u16::from(self.exponent) << Layout::EXPONENT_SHIFT;

        Binary16::from_bits(sign | exponent | self.fraction)
    }
}

/// Parses a hex number of at most 16 bits, with or without a `0x` prefix.
pub(crate) fn parse_hex(s: &str) -> Result<u16, Error> {
    let trimmed = s.trim();
    let digits = if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        &trimmed[2..]
    } else {
        trimmed
    };

    // `from_str_radix` accepts a leading `+`, we don't.
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex(s.to_string()));
    }

    u16::from_str_radix(digits, 16).map_err(|_| Error::InvalidHex(s.to_string()))
}
