//! Number-theoretic operations as traits, for generic code over owned and
//! borrowed operands.

use crate::Mpz;
use crate::algorithms::InverseCache;

/// Inverse of a value modulo `m`, over owned and borrowed operands.
///
/// The result lies in `0..|m|`. It is `None` exactly when the value and `m`
/// share a factor, which includes a zero value for any `|m| > 1`. A zero
/// modulus panics.
pub trait ModInverse<R: Sized>: Sized {
    type Output: Sized;

    fn mod_inverse(self, m: R) -> Option<Self::Output>;
}

/// Bézout cofactors alongside the GCD, over owned and borrowed operands.
///
/// Returns `(g, s, t)` with `g` never negative and `self*s + other*t == g`.
/// Both zero gives `(0, 0, 0)`; with one zero operand the other one's
/// cofactor is its sign and the zero operand's cofactor is `0`.
pub trait ExtendedGcd<R: Sized>: Sized {
    fn extended_gcd(self, other: R) -> (Mpz, Mpz, Mpz);
}

/// Division by a divisor known to divide the dividend exactly.
pub trait DivExact<R: Sized>: Sized {
    /// Returns `self / d`. The result is unspecified if the division leaves
    /// a remainder.
    fn div_exact(self, d: R) -> Mpz;

    /// Like [`DivExact::div_exact`], reusing the divisor's limb inverse
    /// across calls with the same divisor.
    fn div_exact_cached(self, d: R, cache: &mut InverseCache) -> Mpz;
}

// --- ModInverse impls ---

impl ModInverse<&Mpz> for &Mpz {
    type Output = Mpz;

    fn mod_inverse(self, m: &Mpz) -> Option<Mpz> {
        Mpz::mod_inverse(self, m)
    }
}

impl ModInverse<&Mpz> for Mpz {
    type Output = Mpz;

    fn mod_inverse(self, m: &Mpz) -> Option<Mpz> {
        Mpz::mod_inverse(&self, m)
    }
}

impl ModInverse<Mpz> for Mpz {
    type Output = Mpz;

    fn mod_inverse(self, m: Mpz) -> Option<Mpz> {
        Mpz::mod_inverse(&self, &m)
    }
}

// --- ExtendedGcd impls ---

impl ExtendedGcd<&Mpz> for &Mpz {
    fn extended_gcd(self, other: &Mpz) -> (Mpz, Mpz, Mpz) {
        self.gcd_ext(other)
    }
}

impl ExtendedGcd<&Mpz> for Mpz {
    fn extended_gcd(self, other: &Mpz) -> (Mpz, Mpz, Mpz) {
        self.gcd_ext(other)
    }
}

impl ExtendedGcd<Mpz> for Mpz {
    fn extended_gcd(self, other: Mpz) -> (Mpz, Mpz, Mpz) {
        self.gcd_ext(&other)
    }
}

// --- DivExact impls ---

impl DivExact<&Mpz> for &Mpz {
    fn div_exact(self, d: &Mpz) -> Mpz {
        Mpz::div_exact(self, d)
    }

    fn div_exact_cached(self, d: &Mpz, cache: &mut InverseCache) -> Mpz {
        self.div_exact_with_cache(d, cache)
    }
}

impl DivExact<&Mpz> for Mpz {
    fn div_exact(self, d: &Mpz) -> Mpz {
        Mpz::div_exact(&self, d)
    }

    fn div_exact_cached(self, d: &Mpz, cache: &mut InverseCache) -> Mpz {
        self.div_exact_with_cache(d, cache)
    }
}

impl DivExact<Mpz> for Mpz {
    fn div_exact(self, d: Mpz) -> Mpz {
        Mpz::div_exact(&self, &d)
    }

    fn div_exact_cached(self, d: Mpz, cache: &mut InverseCache) -> Mpz {
        self.div_exact_with_cache(&d, cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inverse_of<A, M>(a: A, m: M) -> Option<Mpz>
    where
        A: ModInverse<M, Output = Mpz>,
    {
        a.mod_inverse(m)
    }

    #[test]
    fn test_mod_inverse_operand_forms() {
        let m = Mpz::from(11);
        assert_eq!(inverse_of(&Mpz::from(3), &m), Some(Mpz::from(4)));
        assert_eq!(inverse_of(Mpz::from(3), &m), Some(Mpz::from(4)));
        assert_eq!(inverse_of(Mpz::from(-3), m.clone()), Some(Mpz::from(7)));
        assert_eq!(inverse_of(Mpz::from(22), m), None);
    }

    #[test]
    fn test_extended_gcd_operand_forms() {
        let (a, b) = (Mpz::from(-1071), Mpz::from(462));
        let (g, x, y) = ExtendedGcd::extended_gcd(&a, &b);
        assert_eq!(g, Mpz::from(21));
        assert_eq!(&a * &x + &b * &y, g);
        assert_eq!(a.clone().extended_gcd(b.clone()), (g.clone(), x.clone(), y.clone()));
        assert_eq!(a.extended_gcd(&b), (g, x, y));
    }

    #[test]
    fn test_extended_gcd_zero_operands() {
        let zero = Mpz::new();
        assert_eq!(ExtendedGcd::extended_gcd(&zero, &zero), (Mpz::new(), Mpz::new(), Mpz::new()));
        assert_eq!(
            ExtendedGcd::extended_gcd(&Mpz::from(-8), &zero),
            (Mpz::from(8), Mpz::from(-1), Mpz::new())
        );
        assert_eq!(
            ExtendedGcd::extended_gcd(&zero, &Mpz::from(8)),
            (Mpz::from(8), Mpz::new(), Mpz::from(1))
        );
    }

    #[test]
    fn test_mod_inverse_of_zero() {
        assert_eq!(inverse_of(Mpz::new(), Mpz::from(5)), None);
        assert_eq!(inverse_of(Mpz::new(), Mpz::from(-1)), Some(Mpz::new()));
    }

    #[test]
    fn test_div_exact_operand_forms() {
        let d = Mpz::from(-7);
        let n = Mpz::from(7 * 1_000_003);
        let mut cache = InverseCache::new();
        assert_eq!(DivExact::div_exact(&n, &d), Mpz::from(-1_000_003));
        assert_eq!(n.clone().div_exact_cached(&d, &mut cache), Mpz::from(-1_000_003));
        assert_eq!(DivExact::div_exact(n, d), Mpz::from(-1_000_003));
    }
}
