use core::cmp::Ordering;

use crate::limb::{Limb, umul};

use super::{
    KARATSUBA_THRESHOLD, Scratch, add_assign, cmp_slice, normalize, scratch, sub, sub_assign,
};

/// `r = a * b` for a single limb `b`. Returns the carry limb.
pub fn mul_1(r: &mut [Limb], a: &[Limb], b: Limb) -> Limb {
    debug_assert_eq!(r.len(), a.len());

    let mut carry = 0;
    for (r, &a) in r.iter_mut().zip(a) {
        let (hi, lo) = umul(a, b);
        let (lo, c) = lo.overflowing_add(carry);
        *r = lo;
        carry = hi + Limb::from(c);
    }
    carry
}

/// `a *= b` for a single limb `b`. Returns the carry limb.
pub fn mul_1_assign(a: &mut [Limb], b: Limb) -> Limb {
    let mut carry = 0;
    for a in a.iter_mut() {
        let (hi, lo) = umul(*a, b);
        let (lo, c) = lo.overflowing_add(carry);
        *a = lo;
        carry = hi + Limb::from(c);
    }
    carry
}

/// `r += a * b` over the low `a.len()` limbs of `r`. Returns the carry limb.
pub fn addmul_1(r: &mut [Limb], a: &[Limb], b: Limb) -> Limb {
    debug_assert!(r.len() >= a.len());

    let mut carry = 0;
    for (r, &a) in r.iter_mut().zip(a) {
        let (hi, lo) = umul(a, b);
        let (lo, c1) = lo.overflowing_add(carry);
        let (lo, c2) = lo.overflowing_add(*r);
        *r = lo;
        carry = hi + Limb::from(c1) + Limb::from(c2);
    }
    carry
}

/// `r -= a * b` over the low `a.len()` limbs of `r`. Returns the borrow limb.
pub fn submul_1(r: &mut [Limb], a: &[Limb], b: Limb) -> Limb {
    debug_assert!(r.len() >= a.len());

    let mut borrow = 0;
    for (r, &a) in r.iter_mut().zip(a) {
        let (hi, lo) = umul(a, b);
        let (lo, c) = lo.overflowing_add(borrow);
        let (d, o) = r.overflowing_sub(lo);
        *r = d;
        borrow = hi + Limb::from(c) + Limb::from(o);
    }
    borrow
}

/// Schoolbook product, `r = a * b` with `r.len() == a.len() + b.len()`.
pub fn mul_basecase(r: &mut [Limb], a: &[Limb], b: &[Limb]) {
    debug_assert_eq!(r.len(), a.len() + b.len());

    r.fill(0);
    let n = a.len();
    for (i, &bi) in b.iter().enumerate() {
        let carry = addmul_1(&mut r[i..i + n], a, bi);
        r[i + n] = carry;
    }
}

/// `r = a * b` with `r.len() == a.len() + b.len()`.
///
/// Picks schoolbook multiplication for short operands and Karatsuba above
/// [`KARATSUBA_THRESHOLD`]. `r` is fully overwritten.
pub fn mul(r: &mut [Limb], a: &[Limb], b: &[Limb]) {
    debug_assert_eq!(r.len(), a.len() + b.len());

    let (a, b) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if b.len() < KARATSUBA_THRESHOLD {
        mul_basecase(r, a, b);
    } else if a.len() >= 2 * b.len() {
        mul_unbalanced(r, a, b);
    } else {
        mul_karatsuba(r, a, b);
    }
}

/// `r = a * a` with `r.len() == 2 * a.len()`.
#[inline]
pub fn sqr(r: &mut [Limb], a: &[Limb]) {
    mul(r, a, a);
}

/// Cuts `a` into `b`-sized pieces so every sub-product is balanced.
fn mul_unbalanced(r: &mut [Limb], a: &[Limb], b: &[Limb]) {
    let bn = b.len();
    r.fill(0);
    let mut p = scratch(2 * bn);
    for (i, chunk) in a.chunks(bn).enumerate() {
        let p = &mut p[..chunk.len() + bn];
        mul(p, chunk, b);
        let carry = add_assign(&mut r[i * bn..], p);
        debug_assert_eq!(carry, 0);
    }
}

/// Karatsuba step for `b.len() <= a.len() < 2 * b.len()`.
///
/// With `m = b.len() / 2`, `a = a1*B^m + a0`, `b = b1*B^m + b0`:
/// `a*b = z2*B^2m + (z2 + z0 + (a1-a0)*(b0-b1))*B^m + z0`.
fn mul_karatsuba(r: &mut [Limb], a: &[Limb], b: &[Limb]) {
    let m = b.len() / 2;
    let (a0, a1) = a.split_at(m);
    let (b0, b1) = b.split_at(m);

    let mut z0 = scratch(2 * m);
    mul(&mut z0, a0, b0);
    let mut z2 = scratch(a1.len() + b1.len());
    mul(&mut z2, a1, b1);

    r[..2 * m].copy_from_slice(&z0);
    r[2 * m..].copy_from_slice(&z2);

    // The full product fits in `r`, so carries out of the middle sums cancel.
    add_assign(&mut r[m..], &z0);
    add_assign(&mut r[m..], &z2);

    let (da, a_neg) = sub_sign(a1, a0);
    let (db, b_neg) = sub_sign(b0, b1);
    if !da.is_empty() && !db.is_empty() {
        let mut zm = scratch(da.len() + db.len());
        mul(&mut zm, &da, &db);
        let zm = normalize(&zm);
        if a_neg != b_neg {
            sub_assign(&mut r[m..], zm);
        } else {
            add_assign(&mut r[m..], zm);
        }
    }
}

/// Returns `|a - b|`, normalized, and whether `a < b`.
pub fn sub_sign(a: &[Limb], b: &[Limb]) -> (Scratch, bool) {
    let a = normalize(a);
    let b = normalize(b);
    match cmp_slice(a, b) {
        Ordering::Equal => (Scratch::new(), false),
        Ordering::Greater => {
            let mut r = scratch(a.len());
            sub(&mut r, a, b);
            r.truncate(super::normalized_len(&r));
            (r, false)
        }
        Ordering::Less => {
            let mut r = scratch(b.len());
            sub(&mut r, b, a);
            r.truncate(super::normalized_len(&r));
            (r, true)
        }
    }
}
