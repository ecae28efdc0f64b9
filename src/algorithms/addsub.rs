use crate::limb::{Limb, adc, sbb};

/// Adds the equal-length slices `a` and `b` into `r`, returning the carry out.
#[inline]
pub fn add_n(r: &mut [Limb], a: &[Limb], b: &[Limb]) -> Limb {
    debug_assert!(r.len() == a.len() && a.len() == b.len());

    let mut carry = false;
    for ((r, &a), &b) in r.iter_mut().zip(a).zip(b) {
        *r = adc(a, b, &mut carry);
    }
    Limb::from(carry)
}

/// `r = a + b` where `a.len() >= b.len()` and `r.len() == a.len()`.
/// Returns the carry out.
pub fn add(r: &mut [Limb], a: &[Limb], b: &[Limb]) -> Limb {
    debug_assert!(a.len() >= b.len() && r.len() == a.len());

    let (a_lo, a_hi) = a.split_at(b.len());
    let (r_lo, r_hi) = r.split_at_mut(b.len());
    let carry = add_n(r_lo, a_lo, b);
    add_1(r_hi, a_hi, carry)
}

/// `r = a + b` for a single limb `b`. Returns the carry out.
pub fn add_1(r: &mut [Limb], a: &[Limb], b: Limb) -> Limb {
    debug_assert_eq!(r.len(), a.len());

    let mut carry = b;
    for (r, &a) in r.iter_mut().zip(a) {
        let (s, c) = a.overflowing_add(carry);
        *r = s;
        carry = Limb::from(c);
    }
    carry
}

/// `a += b` where `a.len() >= b.len()`. Returns the carry out.
pub fn add_assign(a: &mut [Limb], b: &[Limb]) -> Limb {
    debug_assert!(a.len() >= b.len());

    let (a_lo, a_hi) = a.split_at_mut(b.len());
    let mut carry = false;
    for (a, &b) in a_lo.iter_mut().zip(b) {
        *a = adc(*a, b, &mut carry);
    }
    if carry { add_assign_1(a_hi, 1) } else { 0 }
}

/// `a += b` for a single limb `b`. Returns the carry out.
pub fn add_assign_1(a: &mut [Limb], b: Limb) -> Limb {
    let mut carry = b;
    for a in a.iter_mut() {
        if carry == 0 {
            break;
        }
        let (s, c) = a.overflowing_add(carry);
        *a = s;
        carry = Limb::from(c);
    }
    carry
}

/// Subtracts the equal-length slice `b` from `a` into `r`, returning the borrow out.
#[inline]
pub fn sub_n(r: &mut [Limb], a: &[Limb], b: &[Limb]) -> Limb {
    debug_assert!(r.len() == a.len() && a.len() == b.len());

    let mut borrow = false;
    for ((r, &a), &b) in r.iter_mut().zip(a).zip(b) {
        *r = sbb(a, b, &mut borrow);
    }
    Limb::from(borrow)
}

/// `r = a - b` where `a.len() >= b.len()` and `r.len() == a.len()`.
/// Returns the borrow out.
pub fn sub(r: &mut [Limb], a: &[Limb], b: &[Limb]) -> Limb {
    debug_assert!(a.len() >= b.len() && r.len() == a.len());

    let (a_lo, a_hi) = a.split_at(b.len());
    let (r_lo, r_hi) = r.split_at_mut(b.len());
    let borrow = sub_n(r_lo, a_lo, b);
    sub_1(r_hi, a_hi, borrow)
}

/// `r = a - b` for a single limb `b`. Returns the borrow out.
pub fn sub_1(r: &mut [Limb], a: &[Limb], b: Limb) -> Limb {
    debug_assert_eq!(r.len(), a.len());

    let mut borrow = b;
    for (r, &a) in r.iter_mut().zip(a) {
        let (d, o) = a.overflowing_sub(borrow);
        *r = d;
        borrow = Limb::from(o);
    }
    borrow
}

/// `a -= b` where `a.len() >= b.len()`. Returns the borrow out.
pub fn sub_assign(a: &mut [Limb], b: &[Limb]) -> Limb {
    debug_assert!(a.len() >= b.len());

    let (a_lo, a_hi) = a.split_at_mut(b.len());
    let mut borrow = false;
    for (a, &b) in a_lo.iter_mut().zip(b) {
        *a = sbb(*a, b, &mut borrow);
    }
    if borrow { sub_assign_1(a_hi, 1) } else { 0 }
}

/// `a -= b` for a single limb `b`. Returns the borrow out.
pub fn sub_assign_1(a: &mut [Limb], b: Limb) -> Limb {
    let mut borrow = b;
    for a in a.iter_mut() {
        if borrow == 0 {
            break;
        }
        let (d, o) = a.overflowing_sub(borrow);
        *a = d;
        borrow = Limb::from(o);
    }
    borrow
}

/// `b = a - b` for slices of equal length. A shorter subtrahend must be
/// zero-extended to `a.len()` by the caller first. Returns the borrow out.
pub fn rsub_assign(a: &[Limb], b: &mut [Limb]) -> Limb {
    debug_assert_eq!(a.len(), b.len());

    let mut borrow = false;
    for (b, &a) in b.iter_mut().zip(a) {
        *b = sbb(a, *b, &mut borrow);
    }
    Limb::from(borrow)
}

/// Replaces `a` by its two's complement negation modulo `B^a.len()`.
/// Returns `true` if `a` was non-zero.
pub fn neg_assign(a: &mut [Limb]) -> bool {
    let mut iter = a.iter_mut();
    for x in iter.by_ref() {
        if *x != 0 {
            *x = x.wrapping_neg();
            for y in iter {
                *y = !*y;
            }
            return true;
        }
    }
    false
}
