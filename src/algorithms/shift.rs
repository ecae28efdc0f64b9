use crate::limb::{BITS, Limb, ctz};

use super::cmp::normalized_len;
use super::{Scratch, scratch};

/// `r = a << bits` for `bits < BITS`. Returns the bits shifted out of the
/// top limb, in the low end of the returned limb.
pub fn lshift(r: &mut [Limb], a: &[Limb], bits: u32) -> Limb {
    debug_assert!(r.len() == a.len() && (bits as usize) < BITS);

    if bits == 0 {
        r.copy_from_slice(a);
        return 0;
    }
    let back = BITS as u32 - bits;
    let mut carry = 0;
    for (r, &a) in r.iter_mut().zip(a) {
        *r = (a << bits) | carry;
        carry = a >> back;
    }
    carry
}

/// In-place form of [`lshift`].
pub fn lshift_assign(a: &mut [Limb], bits: u32) -> Limb {
    debug_assert!((bits as usize) < BITS);

    if bits == 0 {
        return 0;
    }
    let back = BITS as u32 - bits;
    let mut carry = 0;
    for a in a.iter_mut() {
        let x = *a;
        *a = (x << bits) | carry;
        carry = x >> back;
    }
    carry
}

/// `r = a >> bits` for `bits < BITS`. Returns the bits shifted out of the
/// bottom limb, in the high end of the returned limb.
pub fn rshift(r: &mut [Limb], a: &[Limb], bits: u32) -> Limb {
    debug_assert!(r.len() == a.len() && (bits as usize) < BITS);

    if bits == 0 {
        r.copy_from_slice(a);
        return 0;
    }
    let back = BITS as u32 - bits;
    let mut carry = 0;
    for (r, &a) in r.iter_mut().zip(a).rev() {
        *r = (a >> bits) | carry;
        carry = a << back;
    }
    carry
}

/// In-place form of [`rshift`].
pub fn rshift_assign(a: &mut [Limb], bits: u32) -> Limb {
    debug_assert!((bits as usize) < BITS);

    if bits == 0 {
        return 0;
    }
    let back = BITS as u32 - bits;
    let mut carry = 0;
    for a in a.iter_mut().rev() {
        let x = *a;
        *a = (x >> bits) | carry;
        carry = x << back;
    }
    carry
}

/// Number of trailing zero bits of a limb vector. Zero has none.
pub fn trailing_zeros(a: &[Limb]) -> usize {
    a.iter()
        .position(|&x| x != 0)
        .map_or(0, |i| i * BITS + ctz(a[i]) as usize)
}

/// `a >> bits` for any bit count, normalized.
pub(crate) fn shr_bits(a: &[Limb], bits: usize) -> Scratch {
    let skip = bits / BITS;
    if skip >= a.len() {
        return Scratch::new();
    }
    let src = &a[skip..];
    let mut r = scratch(src.len());
    rshift(&mut r, src, (bits % BITS) as u32);
    r.truncate(normalized_len(&r));
    r
}

/// `a << bits` for any bit count, normalized.
pub(crate) fn shl_bits(a: &[Limb], bits: usize) -> Scratch {
    let a = &a[..normalized_len(a)];
    if a.is_empty() {
        return Scratch::new();
    }
    let skip = bits / BITS;
    let mut r = scratch(skip + a.len() + 1);
    let top = lshift(&mut r[skip..skip + a.len()], a, (bits % BITS) as u32);
    r[skip + a.len()] = top;
    r.truncate(normalized_len(&r));
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limb::{HIGH_BIT, MAX};

    #[test]
    fn test_lshift_carries_across_limbs() {
        let a = [HIGH_BIT | 1, 1];
        let mut r = [0; 2];
        assert_eq!(lshift(&mut r, &a, 1), 0);
        assert_eq!(r, [2, 3]);

        let mut b = [MAX, MAX];
        assert_eq!(lshift_assign(&mut b, 4), 0xf);
        assert_eq!(b, [MAX << 4, MAX]);
    }

    #[test]
    fn test_rshift_returns_shifted_out_bits() {
        let a = [3, 1];
        let mut r = [0; 2];
        assert_eq!(rshift(&mut r, &a, 1), HIGH_BIT);
        assert_eq!(r, [HIGH_BIT | 1, 0]);

        let mut b = [0xf0, 0];
        assert_eq!(rshift_assign(&mut b, 4), 0);
        assert_eq!(b, [0xf, 0]);
    }

    #[test]
    fn test_shift_any_amount() {
        let a = [1, 2, 3];
        let up = shl_bits(&a, 3 * BITS + 5);
        assert_eq!(&shr_bits(&up, 3 * BITS + 5)[..], &a[..]);
        assert!(shr_bits(&a, 3 * BITS).is_empty());
        assert_eq!(trailing_zeros(&[0, 8]), BITS + 3);
    }
}
