//! Operator implementations for `Binary16`.

use fields::Layout;
use raw::Binary16;

use std::ops;

/// Flips the sign bit. This works for every value, including zeros, infinities
/// and NaNs.
impl ops::Neg for Binary16 {
    type Output = Binary16;

    fn neg(self) -> Binary16 {
        Binary16::from_bits(self.to_bits() ^ Layout::SIGN.bits())
    }
}

impl<'a> ops::Neg for &'a Binary16 {
    type Output = Binary16;

    fn neg(self) -> Binary16 {
        -(*self)
    }
}

#[cfg(test)]
mod tests {
    use raw::Binary16;

    #[test]
    fn neg() {
        assert_eq!(-Binary16::ONE, Binary16::from_bits(0xBC00));
        assert_eq!(-Binary16::ZERO, Binary16::NEG_ZERO);
        assert_eq!(-&Binary16::NEG_INFINITY, Binary16::INFINITY);
        assert_eq!(-(-Binary16::NAN), Binary16::NAN);
    }
}
