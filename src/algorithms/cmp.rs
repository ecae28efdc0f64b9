use core::cmp::Ordering::{self, Equal, Greater, Less};

use crate::limb::{BITS, Limb, clz};

/// Compares two equal-length limb vectors, most significant limb first.
pub fn cmp(a: &[Limb], b: &[Limb]) -> Ordering {
    debug_assert_eq!(a.len(), b.len());

    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        match x.cmp(y) {
            Equal => continue,
            other => return other,
        }
    }
    Equal
}

/// Compares two limb vectors of any length, ignoring leading zero limbs.
pub fn cmp_slice(a: &[Limb], b: &[Limb]) -> Ordering {
    let a = normalize(a);
    let b = normalize(b);
    match a.len().cmp(&b.len()) {
        Equal => cmp(a, b),
        Less => Less,
        Greater => Greater,
    }
}

/// Number of limbs once leading zero limbs are removed.
#[inline]
pub fn normalized_len(a: &[Limb]) -> usize {
    a.iter().rposition(|&x| x != 0).map_or(0, |i| i + 1)
}

/// The slice without its leading zero limbs.
#[inline]
pub fn normalize(a: &[Limb]) -> &[Limb] {
    &a[..normalized_len(a)]
}

#[inline]
pub fn is_zero(a: &[Limb]) -> bool {
    a.iter().all(|&x| x == 0)
}

/// Number of significant bits in `a`.
pub fn bit_len(a: &[Limb]) -> usize {
    let a = normalize(a);
    match a.last() {
        Some(&top) => a.len() * BITS - clz(top) as usize,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limb::MAX;

    #[test]
    fn test_cmp_slice_ignores_leading_zeros() {
        assert_eq!(cmp_slice(&[1, 2, 0, 0], &[1, 2]), Equal);
        assert_eq!(cmp_slice(&[0, 0, 1], &[MAX, MAX]), Greater);
        assert_eq!(cmp_slice(&[], &[0]), Equal);
        assert_eq!(cmp_slice(&[5], &[6, 0]), Less);
    }

    #[test]
    fn test_bit_len() {
        assert_eq!(bit_len(&[]), 0);
        assert_eq!(bit_len(&[1]), 1);
        assert_eq!(bit_len(&[0, 1, 0]), BITS + 1);
        assert_eq!(bit_len(&[MAX]), BITS);
    }
}
