use core::cmp::Ordering;
use core::ops::{
    Add, AddAssign, Mul, MulAssign, Neg, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use num_traits::{One, Pow};
use tracing::trace;

use super::Mpz;
use crate::algorithms::{
    KARATSUBA_THRESHOLD, Scratch, add_assign, add_assign_1, cmp_slice, mul, rsub_assign,
    shl_bits, shr_bits, sub_assign, trailing_zeros,
};
use crate::limb::Limb;

impl Mpz {
    /// `self += b` where `b` is a magnitude with the sign `b_negative`.
    fn add_signed(&mut self, b: &[Limb], b_negative: bool) {
        if b.is_empty() {
            return;
        }
        let an = self.len();
        if an == 0 {
            self.assign_magnitude(b, b_negative);
            return;
        }
        let bn = b.len();
        let a_negative = self.is_negative();

        if a_negative == b_negative {
            let n = an.max(bn);
            let buf = self.grow(n + 1);
            buf[an..].fill(0);
            let carry = add_assign(&mut buf[..n], b);
            buf[n] = carry;
            self.set_len(n + 1, a_negative);
            return;
        }

        match cmp_slice(self.limbs(), b) {
            Ordering::Equal => self.size = 0,
            Ordering::Greater => {
                sub_assign(self.grow(an), b);
                self.set_len(an, a_negative);
            }
            Ordering::Less => {
                let buf = self.grow(bn);
                buf[an..].fill(0);
                rsub_assign(b, buf);
                self.set_len(bn, b_negative);
            }
        }
    }

    /// Overwrites `self` with `a * b`, the product sign given by `negative`.
    /// Neither slice may live in `self`.
    fn assign_product(&mut self, a: &[Limb], b: &[Limb], negative: bool) {
        if a.is_empty() || b.is_empty() {
            self.size = 0;
            return;
        }
        let n = a.len() + b.len();
        if a.len().min(b.len()) >= KARATSUBA_THRESHOLD {
            trace!(a_len = a.len(), b_len = b.len(), "karatsuba multiplication");
        }
        mul(self.grow(n), a, b);
        self.set_len(n, negative);
    }

    /// A copy of `self` with room for `len` limbs.
    fn clone_with_room(&self, len: usize) -> Mpz {
        let mut r = Mpz::with_capacity(len);
        r.clone_from(self);
        r
    }

    /// Raises `self` to the power `exp` by repeated squaring. `0^0 == 1`.
    pub fn pow(&self, mut exp: u32) -> Mpz {
        let mut acc = Mpz::one();
        let mut base = self.clone();
        while exp > 0 {
            if exp & 1 == 1 {
                acc *= &base;
            }
            exp >>= 1;
            if exp > 0 {
                base = &base * &base;
            }
        }
        acc
    }
}

impl AddAssign<&Mpz> for Mpz {
    #[inline]
    fn add_assign(&mut self, other: &Mpz) {
        self.add_signed(other.limbs(), other.is_negative());
    }
}

impl SubAssign<&Mpz> for Mpz {
    #[inline]
    fn sub_assign(&mut self, other: &Mpz) {
        self.add_signed(other.limbs(), other.is_positive());
    }
}

impl MulAssign<&Mpz> for Mpz {
    fn mul_assign(&mut self, other: &Mpz) {
        // The product cannot be written over its own operand.
        let a = Scratch::from_slice(self.limbs());
        let negative = self.is_negative() != other.is_negative();
        self.assign_product(&a, other.limbs(), negative);
    }
}

forward_val_assign!(impl AddAssign for Mpz, add_assign);
forward_val_assign!(impl SubAssign for Mpz, sub_assign);
forward_val_assign!(impl MulAssign for Mpz, mul_assign);

impl Add<&Mpz> for &Mpz {
    type Output = Mpz;

    fn add(self, other: &Mpz) -> Mpz {
        let mut r = self.clone_with_room(self.len().max(other.len()) + 1);
        r += other;
        r
    }
}

impl Sub<&Mpz> for &Mpz {
    type Output = Mpz;

    fn sub(self, other: &Mpz) -> Mpz {
        let mut r = self.clone_with_room(self.len().max(other.len()) + 1);
        r -= other;
        r
    }
}

impl Mul<&Mpz> for &Mpz {
    type Output = Mpz;

    fn mul(self, other: &Mpz) -> Mpz {
        let mut r = Mpz::new();
        let negative = self.is_negative() != other.is_negative();
        r.assign_product(self.limbs(), other.limbs(), negative);
        r
    }
}

forward_all_binop_to_ref_ref!(impl Add for Mpz, add);
forward_all_binop_to_ref_ref!(impl Sub for Mpz, sub);
forward_all_binop_to_ref_ref!(impl Mul for Mpz, mul);

macro_rules! impl_scalar_arith {
    ($($t:ty),*) => {$(
        forward_scalar_binop!(impl Add<$t> for Mpz, add, AddAssign, add_assign);
        forward_scalar_binop!(impl Sub<$t> for Mpz, sub, SubAssign, sub_assign);
        forward_scalar_binop!(impl Mul<$t> for Mpz, mul, MulAssign, mul_assign);
    )*};
}

impl_scalar_arith!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Neg for Mpz {
    type Output = Mpz;

    #[inline]
    fn neg(mut self) -> Mpz {
        self.size = -self.size;
        self
    }
}

impl Neg for &Mpz {
    type Output = Mpz;

    #[inline]
    fn neg(self) -> Mpz {
        -self.clone()
    }
}

impl Shl<usize> for &Mpz {
    type Output = Mpz;

    fn shl(self, bits: usize) -> Mpz {
        let mag = shl_bits(self.limbs(), bits);
        let mut r = Mpz::new();
        r.assign_magnitude(&mag, self.is_negative());
        r
    }
}

impl Shr<usize> for &Mpz {
    type Output = Mpz;

    /// Arithmetic shift: rounds toward negative infinity.
    fn shr(self, bits: usize) -> Mpz {
        let mut mag = shr_bits(self.limbs(), bits);
        if self.is_negative() && trailing_zeros(self.limbs()) < bits {
            mag.push(0);
            add_assign_1(&mut mag, 1);
        }
        let mut r = Mpz::new();
        r.assign_magnitude(&mag, self.is_negative());
        r
    }
}

impl Shl<usize> for Mpz {
    type Output = Mpz;

    #[inline]
    fn shl(self, bits: usize) -> Mpz {
        &self << bits
    }
}

impl Shr<usize> for Mpz {
    type Output = Mpz;

    #[inline]
    fn shr(self, bits: usize) -> Mpz {
        &self >> bits
    }
}

impl ShlAssign<usize> for Mpz {
    #[inline]
    fn shl_assign(&mut self, bits: usize) {
        *self = &*self << bits;
    }
}

impl ShrAssign<usize> for Mpz {
    #[inline]
    fn shr_assign(&mut self, bits: usize) {
        *self = &*self >> bits;
    }
}

impl Pow<u32> for &Mpz {
    type Output = Mpz;

    #[inline]
    fn pow(self, exp: u32) -> Mpz {
        Mpz::pow(self, exp)
    }
}

impl Pow<u32> for Mpz {
    type Output = Mpz;

    #[inline]
    fn pow(self, exp: u32) -> Mpz {
        Mpz::pow(&self, exp)
    }
}
