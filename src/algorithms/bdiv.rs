use crate::limb::{BITS, Limb, ctz, umul};

use super::{divide_by_zero, normalized_len, rshift, scratch, sub_assign_1, submul_1};

/// Inverse of the odd limb `d` modulo `2^BITS`.
///
/// `3d ^ 2` is correct to five bits; each Newton step `x = x * (2 - d*x)`
/// doubles the number of correct bits.
pub fn binvert_limb(d: Limb) -> Limb {
    debug_assert!(d & 1 == 1, "binvert_limb of an even limb");

    let mut inv = d.wrapping_mul(3) ^ 2;
    let mut bits = 5;
    while bits < BITS {
        inv = inv.wrapping_mul((2 as Limb).wrapping_sub(d.wrapping_mul(inv)));
        bits *= 2;
    }
    inv
}

/// Remembers the inverse of the most recently inverted divisor limb.
///
/// The cache belongs to whoever passes it in; repeated exact divisions by the
/// same divisor can share one instead of recomputing the inverse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InverseCache {
    entry: Option<(Limb, Limb)>,
}

impl InverseCache {
    pub const fn new() -> Self {
        InverseCache { entry: None }
    }

    /// The inverse of the odd limb `d` modulo `2^BITS`.
    pub fn inverse(&mut self, d: Limb) -> Limb {
        match self.entry {
            Some((key, inv)) if key == d => inv,
            _ => {
                let inv = binvert_limb(d);
                self.entry = Some((d, inv));
                inv
            }
        }
    }
}

/// Subtracts `qi * v` from the window `u`, dropping whatever does not fit.
fn submul_window(u: &mut [Limb], v: &[Limb], qi: Limb) {
    let n = v.len().min(u.len());
    let (lo, hi) = u.split_at_mut(n);
    let borrow = submul_1(lo, &v[..n], qi);
    sub_assign_1(hi, borrow);
}

/// Hensel division step on the low `d` bits.
///
/// With `Q = U / V mod 2^d`, replaces `u` by `U - Q*V` modulo
/// `B^u.len()` in two's complement, so its low `d` bits become zero. The
/// result is negative when its top bit is set; callers give `u` enough
/// headroom and inspect the sign. `vinv` is the inverse of the odd limb
/// `v[0]`. When `q` is given, the `ceil(d / BITS)` quotient limbs are stored.
pub fn bdivmod(mut q: Option<&mut [Limb]>, u: &mut [Limb], v: &[Limb], d: usize, vinv: Limb) {
    debug_assert!(v[0] & 1 == 1);
    debug_assert!(d <= u.len() * BITS);

    let full = d / BITS;
    let rem = d % BITS;
    for i in 0..full {
        let qi = u[i].wrapping_mul(vinv);
        submul_window(&mut u[i..], v, qi);
        if let Some(q) = q.as_deref_mut() {
            q[i] = qi;
        }
    }
    if rem > 0 {
        let mask = ((1 as Limb) << rem) - 1;
        let qi = u[full].wrapping_mul(vinv) & mask;
        submul_window(&mut u[full..], v, qi);
        if let Some(q) = q.as_deref_mut() {
            q[full] = qi;
        }
    }
}

/// `q = n / d` for a single limb `d` that divides `n` exactly.
/// Requires `q.len() == n.len()`.
pub fn divexact_1(q: &mut [Limb], n: &[Limb], d: Limb, cache: &mut InverseCache) {
    debug_assert_eq!(q.len(), n.len());
    if d == 0 {
        divide_by_zero();
    }

    let shift = ctz(d);
    let d = d >> shift;
    rshift(q, n, shift);
    let inv = cache.inverse(d);

    let mut carry: Limb = 0;
    for x in q.iter_mut() {
        let (s, borrow) = x.overflowing_sub(carry);
        let qi = s.wrapping_mul(inv);
        *x = qi;
        let (hi, _) = umul(qi, d);
        carry = hi + Limb::from(borrow);
    }
    debug_assert_eq!(carry, 0, "division was not exact");
}

/// `q = n / d` where `d` is known to divide `n` exactly.
///
/// `n` and `d` must have non-zero top limbs. Requires
/// `q.len() == n.len() - d.len() + 1`. The quotient is found from the low
/// limbs upward with 2-adic arithmetic, so no quotient digit needs correcting.
pub fn divexact(q: &mut [Limb], n: &[Limb], d: &[Limb], cache: &mut InverseCache) {
    if d.is_empty() {
        divide_by_zero();
    }
    debug_assert!(n.len() >= d.len() && q.len() == n.len() - d.len() + 1);

    // Low zero limbs of `d` are matched by low zero limbs of `n`.
    let z = d.iter().take_while(|&&x| x == 0).count();
    let (n, d) = (&n[z..], &d[z..]);

    if d.len() == 1 {
        let qn = q.len();
        divexact_1(q, &n[..qn], d[0], cache);
        return;
    }

    let shift = ctz(d[0]);
    let mut dd = scratch(d.len());
    let mut nd = scratch(n.len());
    rshift(&mut dd, d, shift);
    rshift(&mut nd, n, shift);
    let dd = &dd[..normalized_len(&dd)];

    let inv = cache.inverse(dd[0]);
    for i in 0..q.len() {
        let qi = nd[i].wrapping_mul(inv);
        q[i] = qi;
        submul_window(&mut nd[i..], dd, qi);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{mul, normalize};
    use crate::limb::MAX;
    use rand::prelude::*;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn test_binvert_limb() {
        let mut rng = XorShiftRng::seed_from_u64(31);
        for _ in 0..1000 {
            let d = rng.random::<Limb>() | 1;
            assert_eq!(d.wrapping_mul(binvert_limb(d)), 1);
        }
        assert_eq!(binvert_limb(1), 1);
        assert_eq!(binvert_limb(MAX), MAX);
    }

    #[test]
    fn test_inverse_cache_reuses_entry() {
        let mut cache = InverseCache::new();
        let a = cache.inverse(7);
        assert_eq!(cache, InverseCache { entry: Some((7, a)) });
        assert_eq!(cache.inverse(7), a);
        let b = cache.inverse(9);
        assert_eq!(cache.entry, Some((9, b)));
    }

    #[test]
    fn test_bdivmod_clears_low_bits() {
        let mut rng = XorShiftRng::seed_from_u64(32);
        for _ in 0..100 {
            let mut u = vec![0; 6];
            rng.fill(&mut u[..]);
            u[5] = 0;
            let mut v = vec![0; 3];
            rng.fill(&mut v[..]);
            v[0] |= 1;
            let d = rng.random_range(1..=2 * BITS + 7);
            let mut q = vec![0; d.div_ceil(BITS)];
            let orig = u.clone();
            bdivmod(Some(&mut q), &mut u, &v, d, binvert_limb(v[0]));

            for bit in 0..d {
                assert_eq!(u[bit / BITS] >> (bit % BITS) & 1, 0);
            }

            // u + q*v == orig modulo B^6
            let mut qv = vec![0; q.len() + v.len()];
            mul(&mut qv, &q, &v);
            qv.resize(6.max(qv.len()), 0);
            let mut back = u.clone();
            crate::algorithms::add_assign(&mut back, &qv[..6]);
            assert_eq!(back, orig);
        }
    }

    #[test]
    fn test_divexact_matches_product() {
        let mut rng = XorShiftRng::seed_from_u64(33);
        let mut cache = InverseCache::new();
        for _ in 0..200 {
            let dn = rng.random_range(1..8);
            let kn = rng.random_range(1..8);
            let mut d = vec![0; dn];
            let mut k = vec![0; kn];
            rng.fill(&mut d[..]);
            rng.fill(&mut k[..]);
            if rng.random_bool(0.2) {
                d[0] = 0;
            }
            d[dn - 1] |= 1;
            k[kn - 1] |= 1;
            let mut n = vec![0; dn + kn];
            mul(&mut n, &d, &k);
            let n = normalize(&n);

            let mut q = vec![0; n.len() - dn + 1];
            divexact(&mut q, n, &d, &mut cache);
            assert_eq!(normalize(&q), &k[..]);
        }
    }

    #[test]
    fn test_divexact_1_even_divisor() {
        let mut cache = InverseCache::new();
        let n = [0, 12];
        let mut q = [0; 2];
        divexact_1(&mut q, &n, 24, &mut cache);
        assert_eq!(q, [(1 as Limb) << (BITS - 1), 0]);
    }
}
