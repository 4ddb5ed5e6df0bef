//! Provides the mathematical meaning of finite (non-NaN, non-Inf) binary16
//! values.

use error::{Error, Operand};
use fields::Fields;
use raw::{Binary16, Class};

use std::fmt;

/// The real number a finite binary16 value represents.
///
/// The number represented is:
///
/// ```notrust
/// (-1)^sign * mantissa * 2^exponent
/// ```
///
/// For normal values `mantissa` is in `[1, 2)` (the implicit leading 1 is
/// included). Zeros and subnormals have no implicit bit, so their mantissa is
/// in `[0, 1)` and the exponent is fixed at `-14`.
#[derive(Copy, Clone, PartialEq)]
pub struct Canonical {
    pub sign: bool,
    /// The unbiased exponent.
    pub exponent: i8,
    pub mantissa: f64,
}

impl Canonical {
    /// Exponent used by zeros and subnormals (`1 - bias`).
    pub const SUBNORMAL_EXPONENT: i8 = 1 - Binary16::EXPONENT_BIAS;

    /// Computes the canonical value of `fields`.
    ///
    /// Returns `None` when the exponent field is all ones (Infinity or NaN).
    pub fn from_fields(fields: &Fields) -> Option<Self> {
        let fraction = f64::from(fields.fraction()) / f64::from(1u32 << Binary16::FRACTION_BITS);

        // Branch on the stored field, not on the unbiased exponent, so the
        // subnormal adjustment happens exactly once.
        let (exponent, mantissa) = match fields.exponent() {
            0 => (Self::SUBNORMAL_EXPONENT, fraction),
            31 => return None,
            e => (e as i8 - Binary16::EXPONENT_BIAS, 1.0 + fraction),
        };

        Some(Self {
            sign: fields.sign(),
            exponent,
            mantissa,
        })
    }

    /// Returns the signed real value.
    ///
    /// Zeros keep their sign (`-0.0` for `0x8000`).
    pub fn value(&self) -> f64 {
        let magnitude = self.mantissa * 2.0f64.powi(i32::from(self.exponent));
        if self.sign {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl fmt::Debug for Canonical {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.sign { '-' } else { '+' };
        write!(f, "{} {:?} * 2^{} = {:?}", sign, self.mantissa, self.exponent, self.value())
    }
}

/// A binary16 value taken apart.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Decoded {
    bits: Binary16,
    fields: Fields,
    class: Class,
    canonical: Option<Canonical>,
}

impl Decoded {
    /// The bit pattern that was decoded.
    pub fn bits(&self) -> Binary16 {
        self.bits
    }

    pub fn fields(&self) -> Fields {
        self.fields
    }

    pub fn class(&self) -> Class {
        self.class
    }

    /// The canonical value, or `None` for Infinity and NaN.
    pub fn canonical(&self) -> Option<Canonical> {
        self.canonical
    }

    /// The signed decimal value, or `None` for Infinity and NaN.
    pub fn value(&self) -> Option<f64> {
        self.canonical.map(|c| c.value())
    }

    /// Returns the value if it may take part in arithmetic, naming `operand`
    /// in the error otherwise.
    pub(crate) fn checked_value(&self, operand: Operand) -> Result<f64, Error> {
        self.value().ok_or_else(|| {
            debug!("{} {:?} is {:?}, refusing arithmetic", operand, self.bits, self.class);
            Error::SpecialOperand {
                operand,
                class: self.class,
            }
        })
    }
}

/// Decodes `raw` into its fields, canonical value and classification.
///
/// Every 16-bit pattern decodes; this never fails.
pub fn decode(raw: Binary16) -> Decoded {
    let fields = raw.fields();
    let class = raw.classify();
    let canonical = Canonical::from_fields(&fields);
    trace!("decode {:?}: {:?} {:?} {:?}", raw, fields, class, canonical);

    Decoded {
        bits: raw,
        fields,
        class,
        canonical,
    }
}

/// Prints the diagnostic report for a decoded value:
///
/// ```notrust
/// Sign: 1
/// Fraction: 0x0
/// Exponent: 0x10
/// - 1.0 * 2^1 = -2.0 (normal)
/// ```
impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Sign: {}", if self.fields.sign() { 1 } else { 0 })?;
        writeln!(f, "Fraction: {:#x}", self.fields.fraction())?;
        writeln!(f, "Exponent: {:#x}", self.fields.exponent())?;
        match self.canonical {
            Some(c) => write!(f, "{:?} ({})", c, self.class),
            None => {
                let sign = if self.fields.sign() { '-' } else { '+' };
                write!(f, "{} {}", sign, self.class)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(bits: u16) -> Option<f64> {
        decode(Binary16::from_bits(bits)).value()
    }

    #[test]
    fn one() {
        let d = decode(Binary16::from_bits(0x3C00));
        assert_eq!(d.fields(), Fields::new(0, 0x0F, 0).unwrap());
        assert_eq!(d.class(), Class::Normal);
        assert_eq!(d.value(), Some(1.0));
    }

    #[test]
    fn minus_two() {
        let d = decode(Binary16::from_bits(0xC000));
        assert_eq!(d.fields(), Fields::new(1, 0x10, 0).unwrap());
        assert_eq!(d.class(), Class::Normal);
        assert_eq!(d.value(), Some(-2.0));
    }

    #[test]
    fn infinity() {
        let d = decode(Binary16::from_bits(0x7C00));
        assert_eq!(d.class(), Class::Infinity);
        assert!(!d.fields().sign());
        assert_eq!(d.canonical(), None);
    }

    #[test]
    fn zero() {
        let d = decode(Binary16::from_bits(0x0000));
        assert_eq!(d.class(), Class::Zero);
        assert_eq!(d.value(), Some(0.0));

        let neg = value(0x8000).unwrap();
        assert_eq!(neg, 0.0);
        assert!(neg.is_sign_negative());
    }

    /// The subnormal adjustment must be applied exactly once at the boundary.
    #[test]
    fn subnormal_boundary() {
        let tiny = 2.0f64.powi(-24);
        assert_eq!(value(0x0001), Some(tiny));
        assert_eq!(value(0x03FF), Some(1023.0 * tiny));
        assert_eq!(value(0x0400), Some(1024.0 * tiny));

        let c = decode(Binary16::from_bits(0x0001)).canonical().unwrap();
        assert_eq!(c.exponent, -14);
        assert_eq!(c.mantissa, 1.0 / 1024.0);

        let c = decode(Binary16::from_bits(0x0400)).canonical().unwrap();
        assert_eq!(c.exponent, -14);
        assert_eq!(c.mantissa, 1.0);
    }

    #[test]
    fn max() {
        assert_eq!(value(0x7BFF), Some(65504.0));
        assert_eq!(value(0xFBFF), Some(-65504.0));
    }

    #[test]
    fn gate() {
        assert_eq!(decode(Binary16::ONE).checked_value(Operand::First), Ok(1.0));
        assert_eq!(
            decode(Binary16::NEG_INFINITY).checked_value(Operand::Second),
            Err(Error::SpecialOperand { operand: Operand::Second, class: Class::Infinity })
        );
    }

    #[test]
    fn report() {
        let report = decode(Binary16::from_bits(0xC000)).to_string();
        assert_eq!(report, "Sign: 1\nFraction: 0x0\nExponent: 0x10\n- 1.0 * 2^1 = -2.0 (normal)");

        let report = decode(Binary16::from_bits(0x7E00)).to_string();
        assert_eq!(report, "Sign: 0\nFraction: 0x200\nExponent: 0x1f\n+ NaN");
    }
}
