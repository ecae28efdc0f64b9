//! Low-level algorithms on limb vectors.
//!
//! These functions operate on little-endian `Limb` slices and are what
//! [`Mpz`](crate::Mpz) is built from. They never resize a caller's buffer:
//! every output slice must already have the length documented on the
//! function, and outputs never alias inputs unless the function is an
//! explicit `*_assign` variant.

#![allow(clippy::many_single_char_names)]

use smallvec::SmallVec;

use crate::limb::{BITS, Limb};

mod addsub;
mod bdiv;
mod cmp;
mod div;
mod gcd;
mod gcdext;
mod mul;
mod radix;
mod shift;
mod sqrt;

pub use self::addsub::*;
pub use self::bdiv::*;
pub use self::cmp::*;
pub use self::div::*;
pub use self::gcd::*;
pub use self::gcdext::*;
pub use self::mul::*;
pub use self::radix::*;
pub use self::shift::*;
pub use self::sqrt::*;

/// Operands shorter than this (in limbs) are multiplied by the schoolbook method.
pub const KARATSUBA_THRESHOLD: usize = 32;

/// Divisors of at least this many limbs use the accelerated GCD.
pub const GCD_ACCEL_THRESHOLD: usize = 5;

/// Bit-size differences above this reduce with `bdivmod` instead of a k-ary step.
pub const BMOD_THRESHOLD: usize = BITS / 2;

/// Values of at least this many limbs are converted to digits by divide and conquer.
pub const GET_STR_DC_THRESHOLD: usize = 18;

/// Digit strings of at least this length are converted to limbs by divide and conquer.
pub const SET_STR_DC_THRESHOLD: usize = 750;

/// A temporary limb buffer, released when it goes out of scope.
///
/// Small buffers live on the stack; nested calls simply own their own.
pub type Scratch = SmallVec<[Limb; 8]>;

/// A zeroed scratch buffer of `len` limbs.
#[inline]
pub fn scratch(len: usize) -> Scratch {
    SmallVec::from_elem(0, len)
}

#[cold]
#[inline(never)]
pub fn divide_by_zero() -> ! {
    panic!("attempt to divide by zero")
}
