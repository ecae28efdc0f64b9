use core::cmp::Ordering;

use crate::limb::{BITS, DoubleLimb, HIGH_BIT, Limb, MAX, clz, from_double, sbb, to_double, udiv};

use super::{add_assign, cmp, divide_by_zero, lshift, rshift, scratch, sub_assign, submul_1};

/// Divides `n` in place by the single limb `d`: `n` becomes the quotient and
/// the remainder is returned.
///
/// Unnormalized divisors are shifted up by their leading zero count, and the
/// dividend is shifted along with them as it is consumed.
pub fn divrem_1_assign(n: &mut [Limb], d: Limb) -> Limb {
    if d == 0 {
        divide_by_zero();
    }
    let shift = clz(d);
    if shift == 0 {
        let mut r = 0;
        for x in n.iter_mut().rev() {
            let (q, rr) = udiv(r, *x, d);
            *x = q;
            r = rr;
        }
        return r;
    }

    let len = n.len();
    if len == 0 {
        return 0;
    }
    let back = BITS as u32 - shift;
    let d = d << shift;
    let mut r = n[len - 1] >> back;
    for i in (0..len).rev() {
        let lo = if i > 0 { n[i - 1] >> back } else { 0 };
        let (q, rr) = udiv(r, (n[i] << shift) | lo, d);
        n[i] = q;
        r = rr;
    }
    r >> shift
}

/// `q = n / d` for a single limb `d`, with `q.len() == n.len()`. Returns the remainder.
pub fn divrem_1(q: &mut [Limb], n: &[Limb], d: Limb) -> Limb {
    debug_assert_eq!(q.len(), n.len());

    q.copy_from_slice(n);
    divrem_1_assign(q, d)
}

/// `n % d` for a single limb `d`.
pub fn mod_1(n: &[Limb], d: Limb) -> Limb {
    if d == 0 {
        divide_by_zero();
    }
    let shift = clz(d);
    let d = d << shift;
    let back = BITS as u32 - shift;
    let mut r: Limb = 0;
    let mut prev: Limb = 0;
    for &x in n.iter().rev() {
        if shift == 0 {
            r = udiv(r, x, d).1;
        } else {
            // Feed the shifted dividend one limb late so the top bits are not lost.
            let (_, rr) = udiv(r, (prev << shift) | (x >> back), d);
            r = rr;
        }
        prev = x;
    }
    if shift != 0 {
        r = udiv(r, prev << shift, d).1;
        r >>= shift;
    }
    r
}

/// Divides the three-limb value `(n2, n1, n0)` by the normalized two-limb
/// divisor `(d1, d0)`, where `(n2, n1) < (d1, d0)`.
///
/// Returns the quotient limb and the two-limb remainder `(r1, r0)`.
#[inline]
pub(crate) fn div_3by2(n2: Limb, n1: Limb, n0: Limb, d1: Limb, d0: Limb) -> (Limb, Limb, Limb) {
    debug_assert!(d1 & HIGH_BIT != 0);
    debug_assert!((n2, n1) < (d1, d0));

    let (mut q, mut rhat) = if n2 < d1 {
        let (q, r) = udiv(n2, n1, d1);
        (q, DoubleLimb::from(r))
    } else {
        // n2 == d1: the estimate saturates.
        (MAX, DoubleLimb::from(n1) + DoubleLimb::from(d1))
    };

    // At most two corrections while the remainder estimate still fits a limb.
    while rhat >> BITS == 0
        && DoubleLimb::from(q) * DoubleLimb::from(d0) > (rhat << BITS) | DoubleLimb::from(n0)
    {
        q -= 1;
        rhat += DoubleLimb::from(d1);
    }

    let r = to_double(n1, n0)
        .wrapping_sub(DoubleLimb::from(q) * DoubleLimb::from(d0))
        .wrapping_sub((DoubleLimb::from(q) * DoubleLimb::from(d1)) << BITS);
    let (r1, r0) = from_double(r);
    (q, r1, r0)
}

/// Divides `n` by the normalized two-limb divisor `d`.
///
/// The low `n.len() - 2` quotient limbs go to `q` and the remainder is left in
/// `n[..2]`. Returns the most significant quotient limb, which is 0 or 1.
pub fn divrem_2(q: &mut [Limb], n: &mut [Limb], d: &[Limb]) -> Limb {
    debug_assert!(d.len() == 2 && d[1] & HIGH_BIT != 0);
    debug_assert!(n.len() >= 2 && q.len() == n.len() - 2);

    let (d1, d0) = (d[1], d[0]);
    let nn = n.len();
    let mut r1 = n[nn - 1];
    let mut r0 = n[nn - 2];

    let mut qhigh = 0;
    if (r1, r0) >= (d1, d0) {
        let mut borrow = false;
        r0 = sbb(r0, d0, &mut borrow);
        r1 = sbb(r1, d1, &mut borrow);
        qhigh = 1;
    }

    for i in (0..nn - 2).rev() {
        let (qi, nr1, nr0) = div_3by2(r1, r0, n[i], d1, d0);
        q[i] = qi;
        r1 = nr1;
        r0 = nr0;
    }

    n[1] = r1;
    n[0] = r0;
    qhigh
}

/// Schoolbook division of `n` by the normalized divisor `d` (at least two limbs).
///
/// Each quotient limb is estimated from the top three limbs of the current
/// window and the top two limbs of `d`, then corrected by adding `d` back
/// while the window goes negative. The low `n.len() - d.len()` quotient limbs
/// go to `q`, the remainder is left in `n[..d.len()]`, and the most
/// significant quotient limb (0 or 1) is returned.
pub fn sb_divrem_mn(q: &mut [Limb], n: &mut [Limb], d: &[Limb]) -> Limb {
    let dn = d.len();
    let nn = n.len();
    debug_assert!(dn >= 2 && nn >= dn && q.len() == nn - dn);
    debug_assert!(d[dn - 1] & HIGH_BIT != 0);

    let d1 = d[dn - 1];
    let d0 = d[dn - 2];

    let mut qhigh = 0;
    if cmp(&n[nn - dn..], d) != Ordering::Less {
        sub_assign(&mut n[nn - dn..], d);
        qhigh = 1;
    }

    for i in (0..nn - dn).rev() {
        let n2 = n[i + dn];
        let n1 = n[i + dn - 1];
        let n0 = n[i + dn - 2];

        let mut qi = if n2 == d1 && n1 == d0 {
            MAX
        } else {
            div_3by2(n2, n1, n0, d1, d0).0
        };

        let borrow = submul_1(&mut n[i..i + dn], d, qi);
        let (top, negative) = n[i + dn].overflowing_sub(borrow);
        n[i + dn] = top;

        if negative {
            loop {
                qi -= 1;
                let carry = add_assign(&mut n[i..i + dn], d);
                let (top, restored) = n[i + dn].overflowing_add(carry);
                n[i + dn] = top;
                if restored {
                    break;
                }
            }
        }
        q[i] = qi;
    }

    qhigh
}

/// Truncating division of magnitudes: `q = n / d`, `r = n % d`.
///
/// `d` must have a non-zero top limb and `n.len() >= d.len()`. Requires
/// `q.len() == n.len() - d.len() + 1` and `r.len() == d.len()`. The inputs
/// are left untouched; the normalized working copy of the dividend lives in
/// scratch space with one extra limb for the normalization shift.
pub fn tdiv_qr(q: &mut [Limb], r: &mut [Limb], n: &[Limb], d: &[Limb]) {
    let dn = d.len();
    if dn == 0 {
        divide_by_zero();
    }
    let nn = n.len();
    debug_assert!(nn >= dn && d[dn - 1] != 0);
    debug_assert!(q.len() == nn - dn + 1 && r.len() == dn);

    if dn == 1 {
        r[0] = divrem_1(q, n, d[0]);
        return;
    }

    let shift = clz(d[dn - 1]);
    let mut dd = scratch(dn);
    let mut nd = scratch(nn + 1);
    lshift(&mut dd, d, shift);
    let top = lshift(&mut nd[..nn], n, shift);
    nd[nn] = top;

    let qhigh = if dn == 2 {
        divrem_2(q, &mut nd, &dd)
    } else {
        sb_divrem_mn(q, &mut nd, &dd)
    };
    debug_assert_eq!(qhigh, 0);

    rshift(r, &nd[..dn], shift);
}
