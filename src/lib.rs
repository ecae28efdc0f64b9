//! Multi-precision integer arithmetic on limb vectors.
//!
//! The crate has two layers:
//!
//! - [`algorithms`] works on plain little-endian `&[Limb]` slices: addition,
//!   multiplication, division (single limb, two limb, schoolbook and exact),
//!   binary and accelerated GCD, square roots and radix conversion. Every
//!   output buffer is sized by the caller and never resized.
//! - [`Mpz`] is a sign-magnitude integer that owns its limb buffer, grows it
//!   as needed and routes aliased operands through scratch space before
//!   calling into the slice engines.
//!
//! All word-level arithmetic goes through the [`limb::LimbOps`] trait, which
//! has a portable implementation and an optional x86-64 one (`asm` feature).
//!
//! ## Example
//!
//! ```rust
//! use num_mpz::Mpz;
//!
//! let n: Mpz = "1000000007".parse().unwrap();
//! let (q, r) = n.div_rem(&Mpz::from(97));
//! assert_eq!((q, r), (Mpz::from(10309237), Mpz::from(18)));
//!
//! let (g, s, t) = Mpz::from(462).gcd_ext(&Mpz::from(1071));
//! assert_eq!(g, Mpz::from(21));
//! assert_eq!(Mpz::from(462) * s + Mpz::from(1071) * t, g);
//!
//! assert_eq!(Mpz::from(255).to_str_radix(-16), "FF");
//! ```
//!
//! ## Features
//!
//! - `std` (default): links the standard library. Without it the crate is
//!   `no_std` and needs only `alloc`.
//! - `u64_digit` (default): 64-bit limbs; otherwise limbs are 32 bits.
//! - `rand` (default): random `Mpz` generation through [`RandMpz`].
//! - `serde`: serialization of `Mpz` as its sign and limbs.
//! - `zeroize`: wiping of limb buffers.
//! - `asm`: inline-assembly word primitives on x86-64.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rust_2018_idioms)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod algorithms;
pub mod limb;
mod mpz;
pub mod traits;

#[cfg(feature = "rand")]
mod bigrand;

use thiserror::Error;

pub use crate::limb::{DoubleLimb, Limb};
pub use crate::mpz::{Mpz, Sign};
pub use crate::traits::{DivExact, ExtendedGcd, ModInverse};

#[cfg(feature = "rand")]
pub use crate::bigrand::{RandMpz, RandomBits, UniformMpz};

/// The error returned when a string cannot be parsed as an [`Mpz`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseMpzError {
    kind: MpzErrorKind,
}

/// What went wrong while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MpzErrorKind {
    #[error("cannot parse integer from empty string")]
    Empty,
    #[error("invalid digit found in string")]
    InvalidDigit,
    #[error("radix must be 0 or within 2..=36")]
    InvalidRadix,
}

impl ParseMpzError {
    pub fn kind(&self) -> MpzErrorKind {
        self.kind
    }

    pub(crate) fn empty() -> Self {
        ParseMpzError {
            kind: MpzErrorKind::Empty,
        }
    }

    pub(crate) fn invalid() -> Self {
        ParseMpzError {
            kind: MpzErrorKind::InvalidDigit,
        }
    }

    pub(crate) fn radix() -> Self {
        ParseMpzError {
            kind: MpzErrorKind::InvalidRadix,
        }
    }
}
