//! Evaluation of an operand pair: decode, check, add, multiply.

use arith::{self, ArithResult, Operation};
use canonical::{self, Decoded};
use error::{Error, Operand};
use raw::Binary16;

use std::fmt;

/// Decoded operands together with their sum and product.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Evaluation {
    lhs: Decoded,
    rhs: Decoded,
    sum: ArithResult,
    product: ArithResult,
}

impl Evaluation {
    pub fn lhs(&self) -> &Decoded {
        &self.lhs
    }

    pub fn rhs(&self) -> &Decoded {
        &self.rhs
    }

    pub fn sum(&self) -> ArithResult {
        self.sum
    }

    pub fn product(&self) -> ArithResult {
        self.product
    }
}

/// Decodes both operands and, if both are finite, adds and multiplies them.
///
/// An infinite or NaN operand stops the evaluation before any arithmetic is
/// done; the error names the first such operand.
pub fn evaluate(lhs: Binary16, rhs: Binary16) -> Result<Evaluation, Error> {
    let (lhs, rhs) = (canonical::decode(lhs), canonical::decode(rhs));
    let l = lhs.checked_value(Operand::First)?;
    let r = rhs.checked_value(Operand::Second)?;

    let sum = arith::combine(Operation::Add, l, r);
    let product = arith::combine(Operation::Multiply, l, r);
    trace!("evaluate: {:?}, {:?} -> sum={:?}; product={:?}", lhs.bits(), rhs.bits(), sum, product);

    Ok(Evaluation { lhs, rhs, sum, product })
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}:\n{}\n", Operand::First, self.lhs)?;
        writeln!(f, "{}:\n{}\n", Operand::Second, self.rhs)?;
        writeln!(f, "{}...\n{}\n", Operation::Add, self.sum)?;
        write!(f, "{}...\n{}", Operation::Multiply, self.product)
    }
}

#[cfg(test)]
mod tests {
    extern crate env_logger;

    use super::*;
    use raw::Class;

    fn eval(lhs: u16, rhs: u16) -> Result<Evaluation, Error> {
        env_logger::try_init().ok();
        evaluate(Binary16::from_bits(lhs), Binary16::from_bits(rhs))
    }

    #[test]
    fn one_plus_one() {
        let e = eval(0x3C00, 0x3C00).unwrap();
        assert_eq!(e.lhs().value(), Some(1.0));
        assert_eq!(e.sum().to_bits(), Some(0x4000));
        assert_eq!(e.product().to_bits(), Some(0x3C00));
    }

    #[test]
    fn two_times_half() {
        let e = eval(0x4000, 0x3800).unwrap();
        assert_eq!(e.sum().to_bits(), Some(0x4100));
        assert_eq!(e.product().to_bits(), Some(0x3C00));
    }

    #[test]
    fn product_overflows_sum_doesnt() {
        let e = eval(0x7BFF, 0x4000).unwrap();
        assert_eq!(e.sum().to_bits(), Some(0x7BFF));
        assert!(e.product().is_overflow());
    }

    #[test]
    fn special_operands() {
        assert_eq!(
            eval(0x7C00, 0x3C00),
            Err(Error::SpecialOperand { operand: Operand::First, class: Class::Infinity })
        );
        assert_eq!(
            eval(0x3C00, 0xFE00),
            Err(Error::SpecialOperand { operand: Operand::Second, class: Class::NaN })
        );
        // the first operand is checked first
        assert_eq!(
            eval(0x7C01, 0xFC00),
            Err(Error::SpecialOperand { operand: Operand::First, class: Class::NaN })
        );
    }

    #[test]
    fn report() {
        let report = eval(0x3C00, 0x3C00).unwrap().to_string();
        assert!(report.starts_with("Operand 1:\nSign: 0\n"));
        assert!(report.contains("Adding...\nResult: 2.0\n"));
        assert!(report.ends_with("Multiplying...\nResult: 1.0\nSign: +\nFraction: 0x0\nExponent: 0xf\nIn Hex: 0x3c00"));
    }
}
