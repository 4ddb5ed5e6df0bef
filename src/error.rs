use raw::Class;

use std::{error, fmt};

/// Names one of the two operands of a binary operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operand {
    First,
    Second,
}

/// Names one of the three fields of a binary16 value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Sign,
    Exponent,
    Fraction,
}

/// Errors reported at the library boundary.
///
/// Exponent overflow during arithmetic is *not* an error; it is a regular
/// outcome of an operation (see `ArithResult::Overflow`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The text is not a hexadecimal number that fits in 16 bits.
    InvalidHex(String),
    /// A separately supplied field does not fit in its bit width.
    FieldOutOfRange {
        field: Field,
        value: u16,
    },
    /// An operand is infinite or NaN, so no arithmetic was attempted.
    SpecialOperand {
        operand: Operand,
        class: Class,
    },
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::First => f.write_str("Operand 1"),
            Operand::Second => f.write_str("Operand 2"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Field::Sign => f.write_str("sign"),
            Field::Exponent => f.write_str("exponent"),
            Field::Fraction => f.write_str("fraction"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidHex(s) => write!(f, "`{}` is not a 16-bit hex value", s),
            Error::FieldOutOfRange { field, value } => {
                write!(f, "{} field out of range: {:#X}", field, value)
            }
            Error::SpecialOperand { operand, class: Class::Infinity } => {
                write!(f, "{} is infinite!", operand)
            }
            Error::SpecialOperand { operand, class } => {
                // only NaN remains, but don't lie if someone constructs this by hand
                if *class == Class::NaN {
                    write!(f, "{} is a NaN!", operand)
                } else {
                    write!(f, "{} is {:?}", operand, class)
                }
            }
        }
    }
}

impl error::Error for Error {}
