use core::ops::{Div, DivAssign, Rem, RemAssign};

use num_integer::Integer;

use super::Mpz;
use crate::algorithms::{
    InverseCache, Scratch, divexact, divexact_1, divide_by_zero, scratch, tdiv_qr,
};

impl Mpz {
    /// Truncating division into caller-owned results: `q = n / d` rounded
    /// toward zero and `r = n - q*d`, which has the sign of `n`.
    ///
    /// `q` and `r` keep and reuse their buffers. Panics when `d` is zero.
    pub fn tdiv_qr_into(q: &mut Mpz, r: &mut Mpz, n: &Mpz, d: &Mpz) {
        if d.is_zero() {
            divide_by_zero();
        }
        let (nn, dn) = (n.len(), d.len());
        if nn < dn {
            q.size = 0;
            r.clone_from(n);
            return;
        }

        let qn = nn - dn + 1;
        tdiv_qr(q.grow(qn), r.grow(dn), n.limbs(), d.limbs());
        q.set_len(qn, n.is_negative() != d.is_negative());
        r.set_len(dn, n.is_negative());
    }

    /// Truncating division and remainder.
    pub fn div_rem(&self, d: &Mpz) -> (Mpz, Mpz) {
        let mut q = Mpz::new();
        let mut r = Mpz::new();
        Mpz::tdiv_qr_into(&mut q, &mut r, self, d);
        (q, r)
    }

    /// Replaces `self` by the truncated quotient `self / d` and returns the
    /// remainder.
    pub fn div_rem_in_place(&mut self, d: &Mpz) -> Mpz {
        let mut r = Mpz::new();
        self.quotient_in_place(d, Some(&mut r));
        r
    }

    /// Writes the quotient over the dividend. The dividend is copied to
    /// scratch first, since the engines never write over their inputs.
    fn quotient_in_place(&mut self, d: &Mpz, rem: Option<&mut Mpz>) {
        if d.is_zero() {
            divide_by_zero();
        }
        let (nn, dn) = (self.len(), d.len());
        let negative = self.is_negative();
        if nn < dn {
            if let Some(rem) = rem {
                rem.clone_from(self);
            }
            self.size = 0;
            return;
        }

        let n = Scratch::from_slice(self.limbs());
        let qn = nn - dn + 1;
        let mut r = scratch(dn);
        tdiv_qr(self.grow(qn), &mut r, &n, d.limbs());
        self.set_len(qn, negative != d.is_negative());
        if let Some(rem) = rem {
            rem.assign_magnitude(&r, negative);
        }
    }

    /// Writes the remainder over the dividend.
    fn remainder_in_place(&mut self, d: &Mpz) {
        if d.is_zero() {
            divide_by_zero();
        }
        let (nn, dn) = (self.len(), d.len());
        if nn < dn {
            return;
        }

        let n = Scratch::from_slice(self.limbs());
        let mut q = scratch(nn - dn + 1);
        tdiv_qr(&mut q, self.grow(dn), &n, d.limbs());
        let negative = self.is_negative();
        self.set_len(dn, negative);
    }

    /// `self / d` for a `d` known to divide `self` exactly.
    ///
    /// Cheaper than [`Mpz::div_rem`]. The result is unspecified if the
    /// division is not exact. Panics when `d` is zero.
    pub fn div_exact(&self, d: &Mpz) -> Mpz {
        self.div_exact_with_cache(d, &mut InverseCache::new())
    }

    /// [`Mpz::div_exact`] reusing the limb inverse of an earlier division by
    /// the same divisor.
    pub fn div_exact_with_cache(&self, d: &Mpz, cache: &mut InverseCache) -> Mpz {
        if d.is_zero() {
            divide_by_zero();
        }
        let mut q = Mpz::new();
        let (nn, dn) = (self.len(), d.len());
        if nn < dn {
            debug_assert!(self.is_zero(), "division was not exact");
            return q;
        }

        let negative = self.is_negative() != d.is_negative();
        if dn == 1 {
            divexact_1(q.grow(nn), self.limbs(), d.limbs()[0], cache);
            q.set_len(nn, negative);
        } else {
            let qn = nn - dn + 1;
            divexact(q.grow(qn), self.limbs(), d.limbs(), cache);
            q.set_len(qn, negative);
        }
        q
    }
}

impl Div<&Mpz> for &Mpz {
    type Output = Mpz;

    #[inline]
    fn div(self, other: &Mpz) -> Mpz {
        let mut q = self.clone();
        q.quotient_in_place(other, None);
        q
    }
}

impl Rem<&Mpz> for &Mpz {
    type Output = Mpz;

    #[inline]
    fn rem(self, other: &Mpz) -> Mpz {
        let mut r = self.clone();
        r.remainder_in_place(other);
        r
    }
}

impl DivAssign<&Mpz> for Mpz {
    #[inline]
    fn div_assign(&mut self, other: &Mpz) {
        self.quotient_in_place(other, None);
    }
}

impl RemAssign<&Mpz> for Mpz {
    #[inline]
    fn rem_assign(&mut self, other: &Mpz) {
        self.remainder_in_place(other);
    }
}

forward_all_binop_to_ref_ref!(impl Div for Mpz, div);
forward_all_binop_to_ref_ref!(impl Rem for Mpz, rem);
forward_val_assign!(impl DivAssign for Mpz, div_assign);
forward_val_assign!(impl RemAssign for Mpz, rem_assign);

macro_rules! impl_scalar_division {
    ($($t:ty),*) => {$(
        forward_scalar_binop!(impl Div<$t> for Mpz, div, DivAssign, div_assign);
        forward_scalar_binop!(impl Rem<$t> for Mpz, rem, RemAssign, rem_assign);
    )*};
}

impl_scalar_division!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Integer for Mpz {
    #[inline]
    fn div_rem(&self, other: &Mpz) -> (Mpz, Mpz) {
        Mpz::div_rem(self, other)
    }

    fn div_floor(&self, other: &Mpz) -> Mpz {
        let (q, r) = Mpz::div_rem(self, other);
        if !r.is_zero() && r.is_negative() != other.is_negative() {
            q - 1u8
        } else {
            q
        }
    }

    fn mod_floor(&self, other: &Mpz) -> Mpz {
        let r = self % other;
        if !r.is_zero() && r.is_negative() != other.is_negative() {
            r + other
        } else {
            r
        }
    }

    fn div_mod_floor(&self, other: &Mpz) -> (Mpz, Mpz) {
        let (q, r) = Mpz::div_rem(self, other);
        if !r.is_zero() && r.is_negative() != other.is_negative() {
            (q - 1u8, r + other)
        } else {
            (q, r)
        }
    }

    #[inline]
    fn gcd(&self, other: &Mpz) -> Mpz {
        Mpz::gcd(self, other)
    }

    #[inline]
    fn lcm(&self, other: &Mpz) -> Mpz {
        Mpz::lcm(self, other)
    }

    fn is_multiple_of(&self, other: &Mpz) -> bool {
        if other.is_zero() {
            return self.is_zero();
        }
        (self % other).is_zero()
    }

    #[inline]
    fn is_even(&self) -> bool {
        Mpz::is_even(self)
    }

    #[inline]
    fn is_odd(&self) -> bool {
        Mpz::is_odd(self)
    }
}
