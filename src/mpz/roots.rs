use num_integer::Roots;

use super::Mpz;
use crate::algorithms::{perfect_square_p, sqrtrem};

impl Mpz {
    /// Writes `floor(sqrt(self))` to `root` and, when given, `self - root^2`
    /// to `rem`, reusing their buffers.
    ///
    /// Panics on a negative value.
    pub fn sqrt_rem_into(&self, root: &mut Mpz, rem: Option<&mut Mpz>) {
        assert!(!self.is_negative(), "square root of a negative number");
        let n = self.limbs();
        if n.is_empty() {
            root.size = 0;
            if let Some(rem) = rem {
                rem.size = 0;
            }
            return;
        }

        let rn = n.len().div_ceil(2);
        match rem {
            Some(rem) => {
                sqrtrem(root.grow(rn), Some(rem.grow(n.len())), n);
                rem.set_len(n.len(), false);
            }
            None => {
                sqrtrem(root.grow(rn), None, n);
            }
        }
        root.set_len(rn, false);
    }

    /// `(floor(sqrt(self)), self - root^2)`. Panics on a negative value.
    pub fn sqrt_rem(&self) -> (Mpz, Mpz) {
        let mut root = Mpz::new();
        let mut rem = Mpz::new();
        self.sqrt_rem_into(&mut root, Some(&mut rem));
        (root, rem)
    }

    /// `floor(sqrt(self))`. Panics on a negative value.
    pub fn sqrt(&self) -> Mpz {
        let mut root = Mpz::new();
        self.sqrt_rem_into(&mut root, None);
        root
    }

    /// Whether `self` is the square of an integer. Negative values never are.
    pub fn is_perfect_square(&self) -> bool {
        !self.is_negative() && perfect_square_p(self.limbs())
    }
}

impl Roots for Mpz {
    /// `floor(self^(1/n))`, rounded toward zero for negative values with odd `n`.
    ///
    /// Panics when `n` is zero, or when `n` is even and `self` is negative.
    fn nth_root(&self, n: u32) -> Mpz {
        assert!(n > 0, "root degree must be at least one");
        if n == 1 || self.is_zero() {
            return self.clone();
        }
        if self.is_negative() {
            assert!(n % 2 == 1, "even root of a negative number");
            return -self.abs().nth_root(n);
        }
        if n == 2 {
            return Mpz::sqrt(self);
        }
        let bits = self.bits();
        if bits <= u64::from(n) {
            return Mpz::from(1u8);
        }

        // Newton from above: 2^ceil(bits/n) is at least the root.
        let n_minus_one = Mpz::from(n - 1);
        let mut x = Mpz::from(1u8) << bits.div_ceil(u64::from(n)) as usize;
        loop {
            let y = (&n_minus_one * &x + self / x.pow(n - 1)) / n;
            if y >= x {
                return x;
            }
            x = y;
        }
    }

    #[inline]
    fn sqrt(&self) -> Mpz {
        Mpz::sqrt(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sign;
    use crate::limb::Limb;
    use rand::prelude::*;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn test_small_roots() {
        assert_eq!(Mpz::from(1024).sqrt_rem(), (Mpz::from(32), Mpz::new()));
        assert_eq!(Mpz::from(1025).sqrt_rem(), (Mpz::from(32), Mpz::from(1)));
        assert_eq!(Mpz::new().sqrt_rem(), (Mpz::new(), Mpz::new()));
        assert!(Mpz::from(1024).is_perfect_square());
        assert!(!Mpz::from(1025).is_perfect_square());
        assert!(!Mpz::from(-4).is_perfect_square());
        assert!(Mpz::new().is_perfect_square());
    }

    #[test]
    fn test_sqrt_law_random() {
        let mut rng = XorShiftRng::seed_from_u64(101);
        for len in 1..30 {
            let mut limbs = vec![0 as Limb; len];
            rng.fill(&mut limbs[..]);
            let n = Mpz::from_limbs(Sign::Plus, &limbs);
            let (root, rem) = n.sqrt_rem();
            assert_eq!(&root * &root + &rem, n);
            let next = &root + 1u8;
            assert!(&next * &next > n);
            assert_eq!(n.sqrt(), root);
            assert!((&root * &root).is_perfect_square());
        }
    }

    #[test]
    fn test_sqrt_into_reuses_buffers() {
        let mut root = Mpz::from(u128::MAX);
        let mut rem = Mpz::from(-3);
        Mpz::from(99).sqrt_rem_into(&mut root, Some(&mut rem));
        assert_eq!((root, rem), (Mpz::from(9), Mpz::from(18)));
    }

    #[test]
    fn test_nth_root() {
        assert_eq!(Mpz::from(1000).nth_root(3), Mpz::from(10));
        assert_eq!(Mpz::from(999).nth_root(3), Mpz::from(9));
        assert_eq!(Mpz::from(-1000).nth_root(3), Mpz::from(-10));
        assert_eq!(Mpz::from(7).nth_root(5), Mpz::from(1));
        let big = Mpz::from(3).pow(200);
        assert_eq!(big.nth_root(40), Mpz::from(3).pow(5));
        assert_eq!((&big - 1u8).nth_root(40), Mpz::from(3).pow(5) - 1u8);
        assert_eq!(Roots::sqrt(&Mpz::from(50)), Mpz::from(7));
    }

    #[test]
    #[should_panic(expected = "square root of a negative number")]
    fn test_sqrt_of_negative_panics() {
        let _ = Mpz::from(-1).sqrt();
    }
}
