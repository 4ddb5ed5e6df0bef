use arith::{self, ArithResult, Operation};
use canonical::{self, Decoded};
use error::{Error, Operand};
use fields::{self, Fields, Layout};
use ieee754::Ieee754;

use std::{fmt, str};

/// A raw IEEE 754 binary16 bit pattern.
///
/// This type does not implement arithmetic itself, it only knows how to take
/// its bits apart. Use [`decode`](#method.decode) to get at the value and
/// [`add_checked`](#method.add_checked)/[`mul_checked`](#method.mul_checked)
/// to compute with it.
#[repr(transparent)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Binary16(u16);

impl Binary16 {
    pub const ZERO: Self                   = Binary16(0x0000);
    pub const NEG_ZERO: Self               = Binary16(0x8000);
    pub const ONE: Self                    = Binary16(0x3C00);
    /// Largest finite value, `65504.0`.
    pub const MAX: Self                    = Binary16(0x7BFF);
    /// Smallest positive normal value, `2^-14`.
    pub const MIN_POSITIVE: Self           = Binary16(0x0400);
    /// Smallest positive subnormal value, `2^-24`.
    pub const MIN_POSITIVE_SUBNORMAL: Self = Binary16(0x0001);
    pub const INFINITY: Self               = Binary16(0x7C00);
    pub const NEG_INFINITY: Self           = Binary16(0xFC00);
    /// A quiet NaN with an empty payload.
    pub const NAN: Self                    = Binary16(0x7E00);

    pub const EXPONENT_BIAS: i8 = 15;
    /// The all-ones exponent reserved for infinities and NaNs.
    pub const MAX_BIASED_EXPONENT: u8 = 31;
    pub const FRACTION_BITS: u32 = 10;

    pub fn from_bits(bits: u16) -> Self {
        Binary16(bits)
    }

    pub fn to_bits(&self) -> u16 {
        self.0
    }

    /// Returns the value of the sign bit.
    pub fn sign_bit(&self) -> bool {
        self.0 & Layout::SIGN.bits() != 0
    }

    /// The biased or "raw" 5-bit exponent stored in the value.
    pub fn biased_exponent(&self) -> u8 {
        ((self.0 & Layout::EXPONENT.bits()) >> Layout::EXPONENT_SHIFT) as u8
    }

    /// The 10 fraction bits.
    pub fn fraction(&self) -> u16 {
        self.0 & Layout::FRACTION.bits()
    }

    pub fn fields(&self) -> Fields {
        Fields::masked(self.sign_bit(), self.biased_exponent(), self.fraction())
    }

    /// Classifies `self` by its exponent and fraction fields. The sign does
    /// not take part in the classification.
    pub fn classify(&self) -> Class {
        match (self.biased_exponent(), self.fraction()) {
            (0, 0) => Class::Zero,
            (0, _) => Class::Subnormal,
            (31, 0) => Class::Infinity,
            (31, _) => Class::NaN,
            _ => Class::Normal,
        }
    }

    /// Decodes `self` into its fields, class and canonical value.
    pub fn decode(&self) -> Decoded {
        canonical::decode(*self)
    }

    pub fn is_nan(&self) -> bool {
        self.classify() == Class::NaN
    }

    pub fn is_infinite(&self) -> bool {
        self.classify() == Class::Infinity
    }

    pub fn is_finite(&self) -> bool {
        self.biased_exponent() != Self::MAX_BIASED_EXPONENT
    }

    pub fn is_normal(&self) -> bool {
        self.classify() == Class::Normal
    }

    pub fn is_subnormal(&self) -> bool {
        self.classify() == Class::Subnormal
    }

    pub fn is_zero(&self) -> bool {
        self.classify() == Class::Zero
    }

    pub fn is_sign_negative(&self) -> bool {
        self.sign_bit()
    }

    pub fn is_sign_positive(&self) -> bool {
        !self.is_sign_negative()
    }

    /// Converts `self` to an `f32`. Every binary16 value, including NaN
    /// payloads, is exactly representable, so this never rounds.
    pub fn to_f32(&self) -> f32 {
        // f32 exponent bias is 127, ours is 15
        const REBIAS: u8 = 127 - 15;
        // 23 vs. 10 fraction bits
        const WIDEN: u32 = 23 - 10;

        let sign = self.sign_bit();
        let fraction = u32::from(self.fraction());
        match self.classify() {
            Class::Zero => f32::recompose_raw(sign, 0, 0),
            Class::Normal => {
                f32::recompose_raw(sign, self.biased_exponent() + REBIAS, fraction << WIDEN)
            }
            Class::Subnormal => {
                // Shift the leading 1 into the implicit bit position (bit 10).
                // The result is a normal f32.
                let shift = self.fraction().leading_zeros() - 5;
                let fraction = (fraction << shift) & u32::from(Layout::FRACTION.bits());
                let exponent = 1 + REBIAS - shift as u8;
                f32::recompose_raw(sign, exponent, fraction << WIDEN)
            }
            // The quiet bit (bit 9) lands on the f32 quiet bit (bit 22).
            Class::Infinity | Class::NaN => f32::recompose_raw(sign, !0, fraction << WIDEN),
        }
    }

    /// Converts `self` to an `f64`.
    pub fn to_f64(&self) -> f64 {
        f64::from(self.to_f32())
    }

    /// Adds `self` and `rhs`, refusing infinite and NaN operands.
    pub fn add_checked(self, rhs: Self) -> Result<ArithResult, Error> {
        self.combine_checked(Operation::Add, rhs)
    }

    /// Multiplies `self` and `rhs`, refusing infinite and NaN operands.
    pub fn mul_checked(self, rhs: Self) -> Result<ArithResult, Error> {
        self.combine_checked(Operation::Multiply, rhs)
    }

    fn combine_checked(self, op: Operation, rhs: Self) -> Result<ArithResult, Error> {
        let lhs = self.decode().checked_value(Operand::First)?;
        let rhs = rhs.decode().checked_value(Operand::Second)?;
        Ok(arith::combine(op, lhs, rhs))
    }
}

impl fmt::Debug for Binary16 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#06X}", self.0)
    }
}

impl fmt::UpperHex for Binary16 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for Binary16 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Parses a hexadecimal bit pattern such as `3c00`, `3C00` or `0x3c00`.
impl str::FromStr for Binary16 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        fields::parse_hex(s).map(Binary16)
    }
}

impl From<u16> for Binary16 {
    fn from(bits: u16) -> Self {
        Binary16(bits)
    }
}

impl From<Binary16> for u16 {
    fn from(f: Binary16) -> Self {
        f.0
    }
}

impl From<Fields> for Binary16 {
    fn from(fields: Fields) -> Self {
        fields.pack()
    }
}

impl From<Binary16> for f32 {
    fn from(f: Binary16) -> Self {
        f.to_f32()
    }
}

/// The kind of value a binary16 bit pattern holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Class {
    /// Exponent and fraction are 0.
    Zero,
    /// Exponent is 0, fraction isn't. No implicit leading 1.
    Subnormal,
    /// Exponent is in `1..=30`.
    Normal,
    /// Exponent is 31, fraction is 0.
    Infinity,
    /// Exponent is 31, fraction isn't.
    NaN,
}

impl Class {
    /// Returns `true` for the classes that can take part in arithmetic.
    pub fn is_finite(&self) -> bool {
        match self {
            Class::Infinity | Class::NaN => false,
            Class::Zero | Class::Subnormal | Class::Normal => true,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Class::Zero => "zero",
            Class::Subnormal => "subnormal",
            Class::Normal => "normal",
            Class::Infinity => "infinity",
            Class::NaN => "NaN",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(Binary16::ZERO.classify(), Class::Zero);
        assert_eq!(Binary16::NEG_ZERO.classify(), Class::Zero);
        assert_eq!(Binary16::ONE.to_f32(), 1.0);
        assert_eq!(Binary16::MAX.to_f32(), 65504.0);
        assert_eq!(Binary16::MIN_POSITIVE.to_f32(), 2.0f32.powi(-14));
        assert_eq!(Binary16::MIN_POSITIVE_SUBNORMAL.to_f32(), 2.0f32.powi(-24));
        assert_eq!(Binary16::INFINITY.to_f32(), f32::INFINITY);
        assert_eq!(Binary16::NEG_INFINITY.to_f32(), f32::NEG_INFINITY);
        assert!(Binary16::NAN.to_f32().is_nan());
    }

    #[test]
    fn field_extraction() {
        let f = Binary16::from_bits(0xC000);
        assert!(f.sign_bit());
        assert_eq!(f.biased_exponent(), 0x10);
        assert_eq!(f.fraction(), 0);

        let f = Binary16::from_bits(0x03FF);
        assert!(!f.sign_bit());
        assert_eq!(f.biased_exponent(), 0);
        assert_eq!(f.fraction(), 0x3FF);
    }

    #[test]
    fn boundaries() {
        assert_eq!(Binary16::from_bits(0x0000).classify(), Class::Zero);
        assert_eq!(Binary16::from_bits(0x0001).classify(), Class::Subnormal);
        assert_eq!(Binary16::from_bits(0x03FF).classify(), Class::Subnormal);
        assert_eq!(Binary16::from_bits(0x0400).classify(), Class::Normal);
        assert_eq!(Binary16::from_bits(0x7BFF).classify(), Class::Normal);
        assert_eq!(Binary16::from_bits(0x7C00).classify(), Class::Infinity);
        assert_eq!(Binary16::from_bits(0x7C01).classify(), Class::NaN);
        assert_eq!(Binary16::from_bits(0xFFFF).classify(), Class::NaN);
    }

    #[test]
    fn subnormal_to_f32() {
        assert_eq!(Binary16::from_bits(0x0200).to_f32(), 2.0f32.powi(-15));
        assert_eq!(Binary16::from_bits(0x03FF).to_f32(), 1023.0 * 2.0f32.powi(-24));
        assert_eq!(Binary16::from_bits(0x8001).to_f32(), -(2.0f32.powi(-24)));
    }

    #[test]
    fn nan_payload() {
        let bits = Binary16::from_bits(0x7E01).to_f32().to_bits();
        assert_eq!(bits, 0x7FC0_2000);
    }

    #[test]
    fn parse() {
        assert_eq!("3c00".parse::<Binary16>(), Ok(Binary16::ONE));
        assert_eq!("0xFC00".parse::<Binary16>(), Ok(Binary16::NEG_INFINITY));
        assert!("hello".parse::<Binary16>().is_err());
    }

    #[test]
    fn checked_ops_refuse_specials() {
        assert_eq!(
            Binary16::INFINITY.add_checked(Binary16::ONE),
            Err(Error::SpecialOperand { operand: Operand::First, class: Class::Infinity })
        );
        assert_eq!(
            Binary16::ONE.mul_checked(Binary16::NAN),
            Err(Error::SpecialOperand { operand: Operand::Second, class: Class::NaN })
        );
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", Binary16::ONE), "0x3C00");
        assert_eq!(format!("{:?}", Binary16::MIN_POSITIVE_SUBNORMAL), "0x0001");
    }
}
