//! Decoder and arithmetic for IEEE 754 binary16 ("half precision") bit
//! patterns.
//!
//! A [`Binary16`] is nothing more than the raw 16-bit field: 1 sign bit, 5
//! exponent bits (biased by 15) and 10 fraction bits. This crate takes such a
//! field apart ([`decode`]), tells you what kind of value it holds
//! ([`Class`]), and adds or multiplies two of them, re-encoding the
//! mathematical result into a rounded binary16 field ([`combine`]).
//!
//! ```
//! use binary16::{Binary16, Class};
//!
//! let one: Binary16 = "3c00".parse().unwrap();
//! let decoded = one.decode();
//! assert_eq!(decoded.class(), Class::Normal);
//! assert_eq!(decoded.value(), Some(1.0));
//!
//! let sum = one.add_checked(one).unwrap();
//! assert_eq!(sum.to_bits(), Some(0x4000));
//! ```
//!
//! Rounding follows a single rule: the fraction is truncated to 10 bits and
//! bumped by one if the discarded part is *more* than half a unit in the last
//! place. Exact ties round down.

#![doc(html_root_url = "https://docs.rs/binary16/0.1.0")]
#![warn(missing_debug_implementations)]

#[macro_use] extern crate bitflags;
#[macro_use] extern crate log;
extern crate ieee754;

mod arith;
mod canonical;
mod error;
mod eval;
mod fields;
mod ops;
mod raw;

pub use arith::{combine, encode, ArithResult, Encoded, Operation};
pub use canonical::{decode, Canonical, Decoded};
pub use error::{Error, Field, Operand};
pub use eval::{evaluate, Evaluation};
pub use fields::{Fields, Layout};
pub use raw::{Binary16, Class};
