//! Greatest common divisor of limb vectors.
//!
//! Small operands use binary GCD. Large ones first run an accelerated
//! reduction that mixes 2-adic division (to close large size gaps) with
//! k-ary steps (Weber's method, removing two limbs per step). Those steps can
//! introduce spurious factors, so the accelerated result `W` is cleaned up by
//! two binary passes: `gcd(V, gcd(U, W))`.

use core::cmp::Ordering;
use core::mem::swap;

use tracing::{debug, trace};

use crate::limb::{BITS, DoubleLimb, HIGH_BIT, Limb, ctz, from_double, to_double, umul};

use super::{
    BMOD_THRESHOLD, GCD_ACCEL_THRESHOLD, InverseCache, Scratch, add_assign_1, addmul_1,
    binvert_limb, bit_len, bdivmod, cmp_slice, mod_1, mul_1_assign, neg_assign, rshift_assign,
    sub_assign, sub_assign_1, submul_1,
};

/// Binary GCD of two limbs. `gcd_limb(0, v) == v`.
pub fn gcd_limb(mut u: Limb, mut v: Limb) -> Limb {
    if u == 0 {
        return v;
    }
    if v == 0 {
        return u;
    }
    let shift = ctz(u | v);
    u >>= ctz(u);
    loop {
        v >>= ctz(v);
        if u > v {
            swap(&mut u, &mut v);
        }
        v -= u;
        if v == 0 {
            return u << shift;
        }
    }
}

/// GCD of the limb vector `u` and the non-zero limb `v`.
pub fn gcd_1(u: &[Limb], v: Limb) -> Limb {
    debug_assert!(v != 0);
    let r = if u.len() > 1 { mod_1(u, v) } else { u.first().copied().unwrap_or(0) };
    gcd_limb(r, v)
}

/// Binary GCD of two odd double-limb values.
pub fn gcd_2(mut u: DoubleLimb, mut v: DoubleLimb) -> DoubleLimb {
    debug_assert!(u & 1 == 1 && v & 1 == 1);

    while u != v {
        if u > v {
            u -= v;
            u >>= u.trailing_zeros();
        } else {
            v -= u;
            v >>= v.trailing_zeros();
        }
    }
    u
}

/// Weber's "find a": from `C = V/U mod B^2`, returns the small multiplier
/// `a` for which some `|d| < B` gives `a*U - d*V = 0 mod B^2`.
///
/// Runs Euclid on `(B^2 - C, C)` until the remainder fits one limb.
pub fn find_a(c0: Limb, c1: Limb) -> Limb {
    let mut n1 = to_double(c1, c0);
    let mut n2 = n1.wrapping_neg();
    while n2 >> BITS != 0 {
        n1 %= n2;
        swap(&mut n1, &mut n2);
    }
    n2 as Limb
}

/// GCD of `u` and `v`, written to `g`. Returns the number of limbs written.
///
/// Both inputs must be normalized and non-zero, `v` must be odd and
/// `bit_len(u) >= bit_len(v)`. `g` needs `v.len()` limbs.
pub fn gcd(g: &mut [Limb], u: &[Limb], v: &[Limb]) -> usize {
    debug_assert!(!u.is_empty() && !v.is_empty() && v[0] & 1 == 1);
    debug_assert!(bit_len(u) >= bit_len(v) && g.len() >= v.len());

    let mut cache = InverseCache::new();
    let w = if v.len() >= GCD_ACCEL_THRESHOLD {
        debug!(u_len = u.len(), v_len = v.len(), "accelerated gcd");
        match accelerated(u, v, &mut cache) {
            Some(w) => {
                let w = binary(u, w, &mut cache);
                binary(v, w, &mut cache)
            }
            None => Scratch::from_slice(v),
        }
    } else {
        binary(u, Scratch::from_slice(v), &mut cache)
    };

    g[..w.len()].copy_from_slice(&w);
    w.len()
}

/// Drops leading and low zero limbs, then shifts out the remaining low zero bits.
fn strip_zeros(a: &mut Scratch) {
    while a.last() == Some(&0) {
        a.pop();
    }
    let z = a.iter().take_while(|&&x| x == 0).count();
    if z > 0 {
        a.drain(..z);
    }
    if let Some(&low) = a.first() {
        rshift_assign(a, ctz(low));
        if a.last() == Some(&0) {
            a.pop();
        }
    }
}

/// Binary GCD of `u` and the odd `v`.
///
/// A single 2-adic reduction first brings `u` close to the size of `v`.
fn binary(u: &[Limb], mut v: Scratch, cache: &mut InverseCache) -> Scratch {
    let mut u = Scratch::from_slice(u);

    let ubits = bit_len(&u);
    let vbits = bit_len(&v);
    if u.len() > 2 && ubits > vbits + 3 {
        let d = ubits - vbits - 1;
        // |U - Q*V| < 2^(d + vbits) <= U, so the result stays positive.
        bdivmod(None, &mut u, &v, d, cache.inverse(v[0]));
        u.drain(..d / BITS);
    }

    loop {
        strip_zeros(&mut u);
        if u.is_empty() {
            return v;
        }
        match cmp_slice(&u, &v) {
            Ordering::Equal => return v,
            Ordering::Less => swap(&mut u, &mut v),
            Ordering::Greater => {}
        }
        if u.len() <= 2 {
            if v.len() == 1 {
                let g = gcd_1(&u, v[0]);
                return Scratch::from_slice(&[g]);
            }
            let g = gcd_2(to_double(u[1], u[0]), to_double(v[1], v[0]));
            let (hi, lo) = from_double(g);
            let mut r = Scratch::from_slice(&[lo, hi]);
            if hi == 0 {
                r.pop();
            }
            return r;
        }
        sub_assign(&mut u, &v);
    }
}

/// Accelerated reduction of `(u, v)`. Returns `None` when `v` divides `u`,
/// otherwise a value that shares every common factor of `u` and `v` and may
/// carry extra ones.
fn accelerated(u: &[Limb], v: &[Limb], cache: &mut InverseCache) -> Option<Scratch> {
    let mut vbits = bit_len(v);
    let d = bit_len(u) - vbits + 1;

    let mut v = Scratch::from_slice(v);
    let mut u = Scratch::from_slice(u);
    u.push(0);
    bdivmod(None, &mut u, &v, d, cache.inverse(v[0]));
    u.drain(..d / BITS);

    let (mut bmod_steps, mut kary_steps) = (0usize, 0usize);
    loop {
        let z = u.iter().take_while(|&&x| x == 0).count();
        u.drain(..z);
        if u.is_empty() {
            if bmod_steps + kary_steps == 0 {
                return None;
            }
            break;
        }

        // The reduced value is kept in two's complement.
        if u.last().is_some_and(|&top| top & HIGH_BIT != 0) {
            neg_assign(&mut u);
        }
        while u.last() == Some(&0) {
            u.pop();
        }
        let low = ctz(u[0]);
        rshift_assign(&mut u, low);
        if u.last() == Some(&0) {
            u.pop();
        }

        swap(&mut u, &mut v);
        if v.len() <= 2 {
            break;
        }

        let prev_bits = vbits;
        vbits = bit_len(&v);
        let d = prev_bits.saturating_sub(vbits) + 1;

        if d > BMOD_THRESHOLD {
            u.push(0);
            bdivmod(None, &mut u, &v, d, cache.inverse(v[0]));
            u.drain(..d / BITS);
            bmod_steps += 1;
        } else {
            kary_step(&mut u, &v, cache);
            kary_steps += 1;
        }
    }

    trace!(bmod_steps, kary_steps, "accelerated gcd reduction done");
    Some(v)
}

/// Replaces `u` by `(a*U - b*V) / B^2` for the single-limb `a` and the
/// signed `b` that cancel the two low limbs.
fn kary_step(u: &mut Scratch, v: &[Limb], cache: &mut InverseCache) {
    // C = V/U mod B^2
    let uinv = binvert_limb(u[0]);
    let c0 = v[0].wrapping_mul(uinv);
    let (hi, _) = umul(c0, u[0]);
    let c1 = v[1]
        .wrapping_sub(hi)
        .wrapping_sub(c0.wrapping_mul(u[1]))
        .wrapping_mul(uinv);
    let a = find_a(c0, c1);

    let carry = mul_1_assign(u, a);
    u.push(carry);

    // b = U/V mod 2^(BITS+1), read as a signed (BITS+1)-bit value.
    let vinv = cache.inverse(v[0]);
    let b0 = u[0].wrapping_mul(vinv);
    let (hi, _) = umul(b0, v[0]);
    let negative = (u[1].wrapping_add(hi).wrapping_add(b0 & v[1])) & 1 != 0;

    u.push(0);
    let vn = v.len();
    if negative {
        let c = addmul_1(&mut u[..vn], v, b0.wrapping_neg());
        add_assign_1(&mut u[vn..], c);
    } else {
        let c = submul_1(&mut u[..vn], v, b0);
        sub_assign_1(&mut u[vn..], c);
    }
    debug_assert!(u[0] == 0 && u[1] == 0);
    u.drain(..2);
}
