//! Randomization of big integers
#![cfg(feature = "rand")]
#![cfg_attr(docsrs, doc(cfg(feature = "rand")))]

use alloc::vec;

use rand::distr::uniform::{Error, SampleBorrow, SampleUniform, UniformSampler};
use rand::prelude::*;

use crate::limb::{BITS, Limb};
use crate::{Mpz, Sign};

/// A trait for sampling random big integers.
///
/// The `rand` feature must be enabled to use this. See crate-level documentation for details.
pub trait RandMpz {
    /// Generate a random non-negative [`Mpz`] of at most the given bit size.
    fn gen_mpz(&mut self, bit_size: u64) -> Mpz;

    /// Generate a random [`Mpz`] whose magnitude has at most the given bit
    /// size, with either sign.
    fn gen_signed_mpz(&mut self, bit_size: u64) -> Mpz;

    /// Generate a random non-negative [`Mpz`] less than the given bound.
    /// Fails when the bound is not positive.
    fn gen_mpz_below(&mut self, bound: &Mpz) -> Mpz;

    /// Generate a random [`Mpz`] within the given range. The lower bound is
    /// inclusive; the upper bound is exclusive. Fails when the upper bound is
    /// not greater than the lower bound.
    fn gen_mpz_range(&mut self, lbound: &Mpz, ubound: &Mpz) -> Mpz;
}

impl<R: Rng + ?Sized> RandMpz for R {
    fn gen_mpz(&mut self, bit_size: u64) -> Mpz {
        let bits = usize::try_from(bit_size).unwrap_or(usize::MAX);
        let (len, rem) = (bits.div_ceil(BITS), bits % BITS);
        let mut data = vec![0 as Limb; len];
        // `fill` is faster than many `random::<Limb>` calls
        self.fill(&mut data[..]);
        if rem > 0 {
            data[len - 1] >>= BITS - rem;
        }
        Mpz::from_limbs(Sign::Plus, &data)
    }

    fn gen_signed_mpz(&mut self, bit_size: u64) -> Mpz {
        loop {
            let n = self.gen_mpz(bit_size);
            // Zero would otherwise come up twice as often as any other value.
            if n.is_zero() {
                if self.random() {
                    continue;
                }
                return n;
            }
            return if self.random() { n } else { -n };
        }
    }

    fn gen_mpz_below(&mut self, bound: &Mpz) -> Mpz {
        assert!(bound.is_positive());
        let bits = bound.bits();
        loop {
            let n = self.gen_mpz(bits);
            if n < *bound {
                return n;
            }
        }
    }

    fn gen_mpz_range(&mut self, lbound: &Mpz, ubound: &Mpz) -> Mpz {
        assert!(*lbound < *ubound);
        if lbound.is_zero() {
            self.gen_mpz_below(ubound)
        } else {
            lbound + self.gen_mpz_below(&(ubound - lbound))
        }
    }
}

/// The back-end implementing rand's [`UniformSampler`] for [`Mpz`].
#[derive(Clone, Debug)]
pub struct UniformMpz {
    base: Mpz,
    len: Mpz,
}

impl UniformSampler for UniformMpz {
    type X = Mpz;

    #[inline]
    fn new<B1, B2>(low_b: B1, high_b: B2) -> Result<Self, Error>
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        let low = low_b.borrow();
        let high = high_b.borrow();
        if low >= high {
            return Err(Error::EmptyRange);
        }
        Ok(UniformMpz {
            len: high - low,
            base: low.clone(),
        })
    }

    #[inline]
    fn new_inclusive<B1, B2>(low_b: B1, high_b: B2) -> Result<Self, Error>
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        let low = low_b.borrow();
        let high = high_b.borrow();
        if low > high {
            return Err(Error::EmptyRange);
        }
        Self::new(low, high + 1u8)
    }

    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::X {
        &self.base + rng.gen_mpz_below(&self.len)
    }

    #[inline]
    fn sample_single<R: Rng + ?Sized, B1, B2>(
        low: B1,
        high: B2,
        rng: &mut R,
    ) -> Result<Self::X, Error>
    where
        B1: SampleBorrow<Self::X> + Sized,
        B2: SampleBorrow<Self::X> + Sized,
    {
        let low = low.borrow();
        let high = high.borrow();
        if low >= high {
            return Err(Error::EmptyRange);
        }
        Ok(rng.gen_mpz_range(low, high))
    }
}

impl SampleUniform for Mpz {
    type Sampler = UniformMpz;
}

/// A random distribution for [`Mpz`] values of a particular bit size, with
/// either sign.
///
/// The `rand` feature must be enabled to use this. See crate-level documentation for details.
#[derive(Clone, Copy, Debug)]
pub struct RandomBits {
    bits: u64,
}

impl RandomBits {
    #[inline]
    pub fn new(bits: u64) -> RandomBits {
        RandomBits { bits }
    }
}

impl Distribution<Mpz> for RandomBits {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Mpz {
        rng.gen_signed_mpz(self.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn test_gen_mpz_bit_size() {
        let mut rng = XorShiftRng::seed_from_u64(111);
        for bits in [0u64, 1, 7, 64, 65, 300] {
            for _ in 0..50 {
                let n = rng.gen_mpz(bits);
                assert!(n.bits() <= bits);
                assert!(!n.is_negative());
            }
        }
    }

    #[test]
    fn test_signed_values_take_both_signs() {
        let mut rng = XorShiftRng::seed_from_u64(112);
        let values: alloc::vec::Vec<Mpz> = (0..100).map(|_| rng.gen_signed_mpz(100)).collect();
        assert!(values.iter().any(|n| n.is_negative()));
        assert!(values.iter().any(|n| n.is_positive()));
    }

    #[test]
    fn test_ranges() {
        let mut rng = XorShiftRng::seed_from_u64(113);
        let low = Mpz::from(-(1i128 << 80));
        let high = Mpz::from(1u128 << 70);
        for _ in 0..200 {
            let n = rng.gen_mpz_range(&low, &high);
            assert!(low <= n && n < high);
            let m = rng.random_range(low.clone()..=high.clone());
            assert!(low <= m && m <= high);
        }
        let bound = Mpz::from(10);
        assert!((0..100).all(|_| rng.gen_mpz_below(&bound) < bound));
    }

    #[test]
    fn test_random_bits_distribution() {
        let mut rng = XorShiftRng::seed_from_u64(114);
        let dist = RandomBits::new(256);
        for _ in 0..20 {
            let n: Mpz = rng.sample(dist);
            assert!(n.bits() <= 256);
        }
    }

    #[test]
    fn test_empty_uniform_range() {
        let a = Mpz::from(5);
        assert!(UniformMpz::new(&a, &a).is_err());
        assert!(UniformMpz::new_inclusive(&a, &a).is_ok());
    }
}
