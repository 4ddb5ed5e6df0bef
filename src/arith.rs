//! Implementation of binary16 arithmetic and re-encoding.
//!
//! Operands are widened to `f64`, where both the sum and the product of two
//! binary16 values are exact. The only rounding step is the final
//! quantization of the fraction to 10 bits.

use fields::{Fields, Layout};
use raw::Binary16;

use std::fmt;

/// The supported binary operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    Add,
    Multiply,
}

impl Operation {
    /// Applies the operation to two host values.
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operation::Add => lhs + rhs,
            Operation::Multiply => lhs * rhs,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Operation::Add => "Adding",
            Operation::Multiply => "Multiplying",
        })
    }
}

/// A mathematical result together with its binary16 encoding.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Encoded {
    /// The raw result before encoding.
    pub result: f64,
    pub sign: bool,
    /// The biased exponent (`0..=30`).
    pub exponent: u8,
    /// The 10 fraction bits.
    pub fraction: u16,
}

impl Encoded {
    pub fn fields(&self) -> Fields {
        Fields::masked(self.sign, self.exponent, self.fraction)
    }

    /// Packs the encoding into a binary16 value.
    pub fn to_binary16(&self) -> Binary16 {
        self.fields().pack()
    }

    pub fn to_bits(&self) -> u16 {
        self.to_binary16().to_bits()
    }
}

/// The result of encoding a value as binary16.
#[must_use = "an overflowed result does not have an encoding"]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ArithResult {
    /// The value is exactly representable.
    Exact(Encoded),
    /// The fraction had to be rounded.
    Rounded(Encoded),
    /// The exponent does not fit in the 5-bit field. No encoding is produced.
    Overflow {
        /// The raw result that overflowed.
        result: f64,
    },
}

impl ArithResult {
    /// Returns the encoding, or `None` on overflow.
    pub fn encoded(&self) -> Option<&Encoded> {
        match self {
            ArithResult::Exact(e) | ArithResult::Rounded(e) => Some(e),
            ArithResult::Overflow { .. } => None,
        }
    }

    /// Returns the packed binary16 value, or `None` on overflow.
    pub fn to_binary16(&self) -> Option<Binary16> {
        self.encoded().map(Encoded::to_binary16)
    }

    /// Returns the packed bits, or `None` on overflow.
    pub fn to_bits(&self) -> Option<u16> {
        self.encoded().map(Encoded::to_bits)
    }

    /// The raw mathematical result.
    pub fn result(&self) -> f64 {
        match self {
            ArithResult::Exact(e) | ArithResult::Rounded(e) => e.result,
            ArithResult::Overflow { result } => *result,
        }
    }

    pub fn is_exact(&self) -> bool {
        if let ArithResult::Exact(_) = self { true } else { false }
    }

    pub fn is_overflow(&self) -> bool {
        if let ArithResult::Overflow { .. } = self { true } else { false }
    }

    /// Returns the exact encoding, panicking if the result isn't an
    /// `ArithResult::Exact`.
    pub fn unwrap_exact(self) -> Encoded {
        if let ArithResult::Exact(e) = self {
            e
        } else {
            panic!("called `unwrap_exact` on a {:?}", self);
        }
    }
}

/// Prints the diagnostic report of an encoding:
///
/// ```notrust
/// Result: 2.0
/// Sign: +
/// Fraction: 0x0
/// Exponent: 0x10
/// In Hex: 0x4000
/// ```
impl fmt::Display for ArithResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Result: {:?}", self.result())?;
        match self.encoded() {
            Some(e) => {
                writeln!(f, "Sign: {}", if e.sign { '-' } else { '+' })?;
                writeln!(f, "Fraction: {:#x}", e.fraction)?;
                writeln!(f, "Exponent: {:#x}", e.exponent)?;
                write!(f, "In Hex: {:#x}", e.to_bits())
            }
            None => f.write_str("Overflow!"),
        }
    }
}

/// Computes `lhs op rhs` and encodes the result as binary16.
///
/// Both operands should be finite (the canonical values of decoded binary16
/// fields). A non-finite result is reported as `Overflow`.
pub fn combine(op: Operation, lhs: f64, rhs: f64) -> ArithResult {
    let result = op.apply(lhs, rhs);
    trace!("{}: {:?}, {:?} -> {:?}", op, lhs, rhs, result);
    encode(result)
}

/// Encodes a finite value as binary16, rounding the fraction to 10 bits.
///
/// Values whose magnitude rounds to `2^16` or more overflow. Infinite and NaN
/// values have no encoding either and are reported as `Overflow`. Zero
/// results are always encoded as `+0`.
pub fn encode(result: f64) -> ArithResult {
    if !result.is_finite() {
        debug!("encode: {:?} is not finite", result);
        return ArithResult::Overflow { result };
    }

    // Treats -0.0 as positive, too.
    let (sign, mut res) = if result < 0.0 {
        (true, -result)
    } else {
        (false, result)
    };

    // Normalize into [1, 2), tracking the biased exponent. At exponent 0 we
    // stop and use the subnormal encoding (no implicit bit, same scale as
    // exponent 1).
    let mut exponent = Binary16::EXPONENT_BIAS as u8;
    if res < 1.0 {
        while res < 1.0 && exponent > 0 {
            res *= 2.0;
            exponent -= 1;
        }
        if exponent == 0 {
            res /= 2.0;
        } else {
            res -= 1.0;
        }
    } else {
        while res >= 2.0 {
            res /= 2.0;
            exponent += 1;
            if exponent == Binary16::MAX_BIASED_EXPONENT {
                debug!("encode: {:?} overflows", result);
                return ArithResult::Overflow { result };
            }
        }
        res -= 1.0;
    }

    // `res` now holds the fraction in [0, 1).
    let unit = f64::from(1u32 << Binary16::FRACTION_BITS);
    let scaled = res * unit;
    let mut fraction = scaled.floor() as u16;
    let remainder = scaled - f64::from(fraction);
    // Round up only when strictly above half, ties go down.
    if remainder > 0.5 {
        fraction += 1;
    }
    trace!(
        "encode: {:?} -> exp={:#x}; scaled fraction={:?}; rounded={:#x}",
        result, exponent, scaled, fraction
    );

    // Rounding up the largest fraction carries into the exponent. This also
    // promotes the largest subnormal to the smallest normal.
    if fraction > Layout::FRACTION.bits() {
        fraction = 0;
        exponent += 1;
        if exponent == Binary16::MAX_BIASED_EXPONENT {
            debug!("encode: {:?} overflows after rounding", result);
            return ArithResult::Overflow { result };
        }
    }

    let encoded = Encoded {
        result,
        sign,
        exponent,
        fraction,
    };
    if remainder == 0.0 {
        ArithResult::Exact(encoded)
    } else {
        ArithResult::Rounded(encoded)
    }
}
