//! Single-limb primitive operations.
//!
//! Everything above this module reaches the hardware only through the
//! [`LimbOps`] trait. [`Portable`] implements it with double-width native
//! integer arithmetic and is always available; platform-tuned
//! implementations are alternative `LimbOps` types selected at build time
//! through the [`Native`] alias.

cfg_digit!(
    /// A `Limb` is one machine-word digit of a multi-precision magnitude.
    pub type Limb = u32;
    /// A `Limb` is one machine-word digit of a multi-precision magnitude.
    pub type Limb = u64;
);

cfg_digit!(
    /// A `DoubleLimb` holds the full result of a `Limb` by `Limb` product.
    pub type DoubleLimb = u64;
    /// A `DoubleLimb` holds the full result of a `Limb` by `Limb` product.
    pub type DoubleLimb = u128;
);

/// Number of bits in a [`Limb`].
pub const BITS: usize = Limb::BITS as usize;

/// The largest value a [`Limb`] can hold.
pub const MAX: Limb = Limb::MAX;

/// A limb with only its most significant bit set.
pub const HIGH_BIT: Limb = 1 << (BITS - 1);

/// Join two limbs into one double-width value.
#[inline(always)]
pub fn to_double(hi: Limb, lo: Limb) -> DoubleLimb {
    (DoubleLimb::from(hi) << BITS) | DoubleLimb::from(lo)
}

/// Split one double-width value into `(hi, lo)`.
#[inline(always)]
pub fn from_double(n: DoubleLimb) -> (Limb, Limb) {
    ((n >> BITS) as Limb, n as Limb)
}

/// The primitive word operations every algorithm is built from.
///
/// Implementations are pure and never allocate.
pub trait LimbOps {
    /// Returns `a + b + carry` and the carry out.
    fn add_with_carry(a: Limb, b: Limb, carry: bool) -> (Limb, bool);

    /// Returns `a - b - borrow` and the borrow out.
    fn sub_with_borrow(a: Limb, b: Limb, borrow: bool) -> (Limb, bool);

    /// Returns the full product `a * b` as `(hi, lo)`.
    fn mul_wide(a: Limb, b: Limb) -> (Limb, Limb);

    /// Divides the double-limb value `(hi, lo)` by `d`, returning
    /// `(quotient, remainder)`.
    ///
    /// `d` must have its top bit set and `hi < d`, otherwise the quotient
    /// does not fit in one limb and the result is unspecified.
    fn div_wide(hi: Limb, lo: Limb, d: Limb) -> (Limb, Limb);

    /// Number of leading zero bits. Returns [`BITS`] for zero.
    fn leading_zeros(x: Limb) -> u32;

    /// Number of trailing zero bits. Returns [`BITS`] for zero.
    fn trailing_zeros(x: Limb) -> u32;
}

/// Reference implementation on top of [`DoubleLimb`] arithmetic.
#[derive(Clone, Copy, Debug, Default)]
pub struct Portable;

impl LimbOps for Portable {
    #[inline(always)]
    fn add_with_carry(a: Limb, b: Limb, carry: bool) -> (Limb, bool) {
        let (s, c1) = a.overflowing_add(b);
        let (s, c2) = s.overflowing_add(Limb::from(carry));
        (s, c1 | c2)
    }

    #[inline(always)]
    fn sub_with_borrow(a: Limb, b: Limb, borrow: bool) -> (Limb, bool) {
        let (d, b1) = a.overflowing_sub(b);
        let (d, b2) = d.overflowing_sub(Limb::from(borrow));
        (d, b1 | b2)
    }

    #[inline(always)]
    fn mul_wide(a: Limb, b: Limb) -> (Limb, Limb) {
        from_double(DoubleLimb::from(a) * DoubleLimb::from(b))
    }

    #[inline(always)]
    fn div_wide(hi: Limb, lo: Limb, d: Limb) -> (Limb, Limb) {
        debug_assert!(d & HIGH_BIT != 0, "divisor is not normalized");
        debug_assert!(hi < d, "quotient overflows a limb");
        let n = to_double(hi, lo);
        let d = DoubleLimb::from(d);
        ((n / d) as Limb, (n % d) as Limb)
    }

    #[inline(always)]
    fn leading_zeros(x: Limb) -> u32 {
        x.leading_zeros()
    }

    #[inline(always)]
    fn trailing_zeros(x: Limb) -> u32 {
        x.trailing_zeros()
    }
}

/// x86-64 implementation using the `mul` and `div` instructions directly.
#[cfg(all(feature = "asm", feature = "u64_digit", target_arch = "x86_64"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct X86_64;

#[cfg(all(feature = "asm", feature = "u64_digit", target_arch = "x86_64"))]
impl LimbOps for X86_64 {
    #[inline(always)]
    fn add_with_carry(a: Limb, b: Limb, carry: bool) -> (Limb, bool) {
        Portable::add_with_carry(a, b, carry)
    }

    #[inline(always)]
    fn sub_with_borrow(a: Limb, b: Limb, borrow: bool) -> (Limb, bool) {
        Portable::sub_with_borrow(a, b, borrow)
    }

    #[inline(always)]
    fn mul_wide(a: Limb, b: Limb) -> (Limb, Limb) {
        let lo: u64;
        let hi: u64;
        // SAFETY: `mul` only reads and writes the named registers.
        unsafe {
            core::arch::asm!(
                "mul {b}",
                b = in(reg) b,
                inout("rax") a => lo,
                out("rdx") hi,
                options(pure, nomem, nostack),
            );
        }
        (hi, lo)
    }

    #[inline(always)]
    fn div_wide(hi: Limb, lo: Limb, d: Limb) -> (Limb, Limb) {
        debug_assert!(d & HIGH_BIT != 0, "divisor is not normalized");
        debug_assert!(hi < d, "quotient overflows a limb");
        let q: u64;
        let r: u64;
        // SAFETY: `hi < d`, so the quotient fits in `rax` and `div` cannot trap.
        unsafe {
            core::arch::asm!(
                "div {d}",
                d = in(reg) d,
                inout("rax") lo => q,
                inout("rdx") hi => r,
                options(pure, nomem, nostack),
            );
        }
        (q, r)
    }

    #[inline(always)]
    fn leading_zeros(x: Limb) -> u32 {
        x.leading_zeros()
    }

    #[inline(always)]
    fn trailing_zeros(x: Limb) -> u32 {
        x.trailing_zeros()
    }
}

/// The [`LimbOps`] implementation used by the algorithms in this crate.
#[cfg(all(feature = "asm", feature = "u64_digit", target_arch = "x86_64"))]
pub type Native = X86_64;

/// The [`LimbOps`] implementation used by the algorithms in this crate.
#[cfg(not(all(feature = "asm", feature = "u64_digit", target_arch = "x86_64")))]
pub type Native = Portable;

#[inline(always)]
pub(crate) fn adc(a: Limb, b: Limb, carry: &mut bool) -> Limb {
    let (s, c) = Native::add_with_carry(a, b, *carry);
    *carry = c;
    s
}

#[inline(always)]
pub(crate) fn sbb(a: Limb, b: Limb, borrow: &mut bool) -> Limb {
    let (d, b) = Native::sub_with_borrow(a, b, *borrow);
    *borrow = b;
    d
}

#[inline(always)]
pub(crate) fn umul(a: Limb, b: Limb) -> (Limb, Limb) {
    Native::mul_wide(a, b)
}

#[inline(always)]
pub(crate) fn udiv(hi: Limb, lo: Limb, d: Limb) -> (Limb, Limb) {
    Native::div_wide(hi, lo, d)
}

#[inline(always)]
pub(crate) fn clz(x: Limb) -> u32 {
    Native::leading_zeros(x)
}

#[inline(always)]
pub(crate) fn ctz(x: Limb) -> u32 {
    Native::trailing_zeros(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_ops<O: LimbOps>() {
        assert_eq!(O::add_with_carry(MAX, 1, false), (0, true));
        assert_eq!(O::add_with_carry(MAX, MAX, true), (MAX, true));
        assert_eq!(O::add_with_carry(2, 3, true), (6, false));

        assert_eq!(O::sub_with_borrow(0, 1, false), (MAX, true));
        assert_eq!(O::sub_with_borrow(5, 3, true), (1, false));
        assert_eq!(O::sub_with_borrow(0, MAX, true), (0, true));

        assert_eq!(O::mul_wide(MAX, MAX), (MAX - 1, 1));
        assert_eq!(O::mul_wide(0, MAX), (0, 0));

        let d = HIGH_BIT | 12345;
        let (q, r) = O::div_wide(d - 1, MAX, d);
        let (hi, lo) = O::mul_wide(q, d);
        let mut carry = false;
        let lo = adc(lo, r, &mut carry);
        assert_eq!((hi + Limb::from(carry), lo), (d - 1, MAX));
        assert!(r < d);

        assert_eq!(O::leading_zeros(0), BITS as u32);
        assert_eq!(O::trailing_zeros(0), BITS as u32);
        assert_eq!(O::leading_zeros(1), BITS as u32 - 1);
        assert_eq!(O::trailing_zeros(HIGH_BIT), BITS as u32 - 1);
    }

    #[test]
    fn test_portable_ops() {
        check_ops::<Portable>();
    }

    #[test]
    fn test_native_ops() {
        check_ops::<Native>();
    }

    #[test]
    fn test_double_round_trip() {
        let n = to_double(7, MAX);
        assert_eq!(from_double(n), (7, MAX));
    }
}
