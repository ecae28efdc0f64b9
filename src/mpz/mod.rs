//! Sign-magnitude integers on top of the slice engines.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use num_traits::{FromPrimitive, Num, One, Signed, ToPrimitive, Zero};
use tracing::trace;

use crate::ParseMpzError;
use crate::algorithms::{self, bit_len, normalized_len};
use crate::limb::{BITS, Limb};

mod arith;
mod convert;
mod division;
mod gcd;
mod roots;

/// The sign of an [`Mpz`].
#[derive(PartialEq, PartialOrd, Eq, Ord, Copy, Clone, Debug, Hash)]
pub enum Sign {
    Minus,
    NoSign,
    Plus,
}

/// An arbitrary-precision signed integer.
///
/// The magnitude is kept in `limbs[..|size|]`, least significant limb first,
/// with a non-zero top limb; the sign of `size` is the sign of the value and
/// zero has `size == 0`. Limbs past `|size|` are spare capacity with
/// unspecified contents.
///
/// The buffer only grows as operations need room, through [`Mpz::reserve`]
/// or an operation that writes a larger result. It is never shrunk except by
/// an explicit [`Mpz::shrink_to_fit`].
pub struct Mpz {
    size: isize,
    limbs: Vec<Limb>,
}

impl Mpz {
    /// Zero, without allocating.
    #[inline]
    pub const fn new() -> Mpz {
        Mpz {
            size: 0,
            limbs: Vec::new(),
        }
    }

    /// Zero with room for `limbs` limbs.
    pub fn with_capacity(limbs: usize) -> Mpz {
        let mut r = Mpz::new();
        r.reserve(limbs);
        r
    }

    /// Builds a value from a sign and little-endian limbs. Leading zero limbs
    /// are ignored.
    pub fn from_limbs(sign: Sign, limbs: &[Limb]) -> Mpz {
        let mut r = Mpz::new();
        r.assign_magnitude(limbs, sign == Sign::Minus);
        if r.is_zero() || sign == Sign::NoSign {
            r.size = 0;
        }
        r
    }

    /// The magnitude as little-endian limbs without leading zeros. Empty for zero.
    #[inline]
    pub fn limbs(&self) -> &[Limb] {
        &self.limbs[..self.len()]
    }

    /// Number of limbs in the magnitude.
    #[inline]
    pub fn len(&self) -> usize {
        self.size.unsigned_abs()
    }

    /// Number of limbs the buffer holds without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.limbs.capacity()
    }

    /// Makes room for at least `limbs` limbs in total.
    pub fn reserve(&mut self, limbs: usize) {
        self.grow(limbs);
    }

    /// Releases spare capacity beyond the magnitude.
    pub fn shrink_to_fit(&mut self) {
        let len = self.len();
        self.limbs.truncate(len);
        self.limbs.shrink_to_fit();
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        match self.size.cmp(&0) {
            Ordering::Less => Sign::Minus,
            Ordering::Equal => Sign::NoSign,
            Ordering::Greater => Sign::Plus,
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.size < 0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.size > 0
    }

    #[inline]
    pub fn is_even(&self) -> bool {
        self.limbs().first().is_none_or(|&x| x & 1 == 0)
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    /// Number of bits in the magnitude; zero for zero.
    pub fn bits(&self) -> u64 {
        bit_len(self.limbs()) as u64
    }

    pub fn abs(&self) -> Mpz {
        let mut r = self.clone();
        r.size = r.size.abs();
        r
    }

    /// `-1`, `0` or `1` according to the sign.
    pub fn signum(&self) -> Mpz {
        let mut r = Mpz::new();
        if !self.is_zero() {
            r.set_limb(1, self.is_negative());
        }
        r
    }

    /// Sets the value to the single limb `limb`, negated when `negative`.
    pub fn set_limb(&mut self, limb: Limb, negative: bool) {
        if limb == 0 {
            self.size = 0;
            return;
        }
        self.grow(1)[0] = limb;
        self.size = if negative { -1 } else { 1 };
    }

    /// Ensures the buffer holds at least `len` limbs and returns them.
    ///
    /// This is the only place the limb buffer is reallocated.
    pub(crate) fn grow(&mut self, len: usize) -> &mut [Limb] {
        if self.limbs.len() < len {
            trace!(from = self.limbs.len(), to = len, "mpz grow");
            self.limbs.resize(len, 0);
        }
        &mut self.limbs[..len]
    }

    /// Sets the magnitude from the first `len` limbs of the buffer, which the
    /// caller has just written, and the sign from `negative`.
    pub(crate) fn set_len(&mut self, len: usize, negative: bool) {
        let n = normalized_len(&self.limbs[..len]);
        self.size = if negative { -(n as isize) } else { n as isize };
    }

    /// Copies `mag` into the buffer as the new magnitude.
    pub(crate) fn assign_magnitude(&mut self, mag: &[Limb], negative: bool) {
        let n = normalized_len(mag);
        self.grow(n).copy_from_slice(&mag[..n]);
        self.set_len(n, negative);
    }

    /// Builds a value from a `u128` magnitude.
    pub(crate) fn from_u128_magnitude(mut n: u128, negative: bool) -> Mpz {
        let mut r = Mpz::new();
        let mut len = 0;
        let buf = r.grow(128 / BITS);
        while n != 0 {
            buf[len] = n as Limb;
            n >>= BITS;
            len += 1;
        }
        r.set_len(len, negative);
        r
    }

    /// The magnitude as a `u128` if it fits.
    pub(crate) fn to_u128_magnitude(&self) -> Option<u128> {
        let mag = self.limbs();
        if bit_len(mag) > 128 {
            return None;
        }
        Some(mag.iter().rev().fold(0u128, |acc, &x| (acc << BITS) | x as u128))
    }
}

impl Default for Mpz {
    #[inline]
    fn default() -> Mpz {
        Mpz::new()
    }
}

impl Clone for Mpz {
    fn clone(&self) -> Mpz {
        Mpz {
            size: self.size,
            limbs: self.limbs().to_vec(),
        }
    }

    fn clone_from(&mut self, source: &Mpz) {
        self.assign_magnitude(source.limbs(), source.is_negative());
    }
}

impl PartialEq for Mpz {
    #[inline]
    fn eq(&self, other: &Mpz) -> bool {
        self.size == other.size && self.limbs() == other.limbs()
    }
}

impl Eq for Mpz {}

impl PartialOrd for Mpz {
    #[inline]
    fn partial_cmp(&self, other: &Mpz) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Mpz {
    fn cmp(&self, other: &Mpz) -> Ordering {
        // A longer magnitude wins, with the sign in `size` flipping the order.
        match self.size.cmp(&other.size) {
            Ordering::Equal => {}
            ord => return ord,
        }
        let ord = algorithms::cmp(self.limbs(), other.limbs());
        if self.is_negative() { ord.reverse() } else { ord }
    }
}

impl Hash for Mpz {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.limbs().hash(state);
    }
}

impl Zero for Mpz {
    #[inline]
    fn zero() -> Mpz {
        Mpz::new()
    }

    #[inline]
    fn set_zero(&mut self) {
        self.size = 0;
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.size == 0
    }
}

impl One for Mpz {
    #[inline]
    fn one() -> Mpz {
        Mpz::from(1u8)
    }

    #[inline]
    fn set_one(&mut self) {
        self.set_limb(1, false);
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.size == 1 && self.limbs[0] == 1
    }
}

impl Num for Mpz {
    type FromStrRadixErr = ParseMpzError;

    /// Accepts radix 0 to infer the base from a prefix.
    fn from_str_radix(s: &str, radix: u32) -> Result<Mpz, ParseMpzError> {
        Mpz::parse_radix(s, radix)
    }
}

impl Signed for Mpz {
    #[inline]
    fn abs(&self) -> Mpz {
        Mpz::abs(self)
    }

    fn abs_sub(&self, other: &Mpz) -> Mpz {
        if self <= other { Mpz::new() } else { self - other }
    }

    #[inline]
    fn signum(&self) -> Mpz {
        Mpz::signum(self)
    }

    #[inline]
    fn is_positive(&self) -> bool {
        self.size > 0
    }

    #[inline]
    fn is_negative(&self) -> bool {
        self.size < 0
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Mpz {
            #[inline]
            fn from(n: $t) -> Mpz {
                Mpz::from_u128_magnitude(n as u128, false)
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Mpz {
            #[inline]
            fn from(n: $t) -> Mpz {
                Mpz::from_u128_magnitude(n.unsigned_abs() as u128, n < 0)
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

impl ToPrimitive for Mpz {
    fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|n| n.to_i64())
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|n| n.to_u64())
    }

    fn to_i128(&self) -> Option<i128> {
        let mag = self.to_u128_magnitude()?;
        if self.is_negative() {
            if mag <= i128::MIN.unsigned_abs() {
                Some((mag as i128).wrapping_neg())
            } else {
                None
            }
        } else {
            i128::try_from(mag).ok()
        }
    }

    fn to_u128(&self) -> Option<u128> {
        if self.is_negative() {
            return None;
        }
        self.to_u128_magnitude()
    }

    fn to_f64(&self) -> Option<f64> {
        // Keep the top 64 bits and scale; the dropped bits only affect rounding.
        let bits = self.bits();
        let shift = bits.saturating_sub(64);
        let top = (self.abs() >> shift as usize).to_u128_magnitude()? as f64;
        let v = top * libm::exp2(shift as f64);
        Some(if self.is_negative() { -v } else { v })
    }
}

impl FromPrimitive for Mpz {
    fn from_i64(n: i64) -> Option<Mpz> {
        Some(Mpz::from(n))
    }

    fn from_u64(n: u64) -> Option<Mpz> {
        Some(Mpz::from(n))
    }

    fn from_i128(n: i128) -> Option<Mpz> {
        Some(Mpz::from(n))
    }

    fn from_u128(n: u128) -> Option<Mpz> {
        Some(Mpz::from(n))
    }

    fn from_f64(n: f64) -> Option<Mpz> {
        if !n.is_finite() {
            return None;
        }
        let n = libm::trunc(n);
        if n == 0.0 {
            return Some(Mpz::new());
        }

        let bits = n.to_bits();
        let exponent = ((bits >> 52) & 0x7ff) as i64 - 1075;
        let mantissa = (bits & ((1 << 52) - 1)) | (1 << 52);
        let mut r = Mpz::from(mantissa);
        if exponent >= 0 {
            r <<= exponent as usize;
        } else {
            r >>= (-exponent) as usize;
        }
        if n < 0.0 {
            r = -r;
        }
        Some(r)
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for Mpz {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
        self.size = 0;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Mpz {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.is_negative(), self.limbs()).serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Mpz {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Mpz, D::Error> {
        let (negative, limbs): (bool, Vec<Limb>) = serde::Deserialize::deserialize(deserializer)?;
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Ok(Mpz::from_limbs(sign, &limbs))
    }
}
