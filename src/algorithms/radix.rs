//! Conversion between limb vectors and digit strings.
//!
//! Digits here are raw values `0..base`, most significant first; mapping to
//! and from characters belongs to the caller. Power-of-two bases are
//! converted bitwise. Other bases work in chunks of `big_base`, the largest
//! power of the base that fits one limb, and switch to divide and conquer
//! over a table of squared powers for large inputs.

use alloc::vec::Vec;

use smallvec::SmallVec;
use tracing::debug;

use crate::limb::{BITS, Limb};

use super::{
    GET_STR_DC_THRESHOLD, SET_STR_DC_THRESHOLD, Scratch, add_assign, add_assign_1, bit_len,
    divrem_1_assign, mul, mul_1_assign, normalized_len, scratch, sqr, tdiv_qr,
};

/// Number of digits per limb and `base^digits`, the largest power of `base`
/// that fits one limb. Only meaningful for bases that are not powers of two.
pub const fn big_base(base: u32) -> (usize, Limb) {
    let mut digits = 0;
    let mut power: Limb = 1;
    loop {
        match power.checked_mul(base as Limb) {
            Some(p) => {
                power = p;
                digits += 1;
            }
            None => return (digits, power),
        }
    }
}

/// An upper bound on the number of digits of `u` in `base`, never less than 1.
///
/// Exact for power-of-two bases.
pub fn size_in_base(u: &[Limb], base: u32) -> usize {
    debug_assert!((2..=36).contains(&base));

    let bits = bit_len(u);
    if bits == 0 {
        return 1;
    }
    if base.is_power_of_two() {
        let per = base.trailing_zeros() as usize;
        return bits.div_ceil(per);
    }
    (libm::ceil(bits as f64 / libm::log2(f64::from(base))) as usize) + 1
}

/// Number of limbs that always holds a value of `len` digits in `base`.
pub fn limbs_for_digits(len: usize, base: u32) -> usize {
    let bits_per_digit = (u32::BITS - (base - 1).leading_zeros()) as usize;
    (len * bits_per_digit).div_ceil(BITS) + 1
}

/// `powers[i] = big_base^(2^i)` together with its digit count.
struct PowerTable {
    powers: Vec<(Scratch, usize)>,
}

impl PowerTable {
    /// Squares until the next entry would exceed `limit` limbs.
    fn new(base: u32, limit: usize) -> Self {
        let (digits, big) = big_base(base);
        let mut powers = Vec::new();
        let mut p = Scratch::from_slice(&[big]);
        let mut d = digits;
        loop {
            let next_len = 2 * p.len();
            powers.push((p, d));
            if next_len > limit {
                break;
            }
            let last = &powers[powers.len() - 1].0;
            let mut sq = scratch(next_len);
            sqr(&mut sq, last);
            sq.truncate(normalized_len(&sq));
            p = sq;
            d *= 2;
        }
        PowerTable { powers }
    }
}

/// Writes the digits of `u` in `base` to `digits`, most significant first,
/// and returns how many were written.
///
/// `u` is used as work space and holds garbage afterwards. `digits` needs
/// [`size_in_base`] entries. Zero is written as a single `0` digit.
pub fn get_str(digits: &mut [u8], base: u32, u: &mut [Limb]) -> usize {
    debug_assert!((2..=36).contains(&base));

    let un = normalized_len(u);
    if un == 0 {
        digits[0] = 0;
        return 1;
    }
    let u = &mut u[..un];

    if base.is_power_of_two() {
        return get_str_pow2(digits, base.trailing_zeros() as usize, u);
    }

    let mut out: Vec<u8> = Vec::with_capacity(digits.len());
    if un < GET_STR_DC_THRESHOLD {
        get_str_basecase(&mut out, 0, base, u);
    } else {
        debug!(limbs = un, base, "divide and conquer get_str");
        let table = PowerTable::new(base, un);
        get_str_dc(&mut out, 0, base, u, &table, table.powers.len() - 1);
    }
    digits[..out.len()].copy_from_slice(&out);
    out.len()
}

fn get_str_pow2(digits: &mut [u8], per: usize, u: &[Limb]) -> usize {
    let bits = bit_len(u);
    let n = bits.div_ceil(per);
    let mask = (1 << per) - 1;
    for (k, digit) in digits[..n].iter_mut().enumerate() {
        let pos = (n - 1 - k) * per;
        let (i, off) = (pos / BITS, pos % BITS);
        let mut v = u[i] >> off;
        if off + per > BITS && i + 1 < u.len() {
            v |= u[i + 1] << (BITS - off);
        }
        *digit = (v & mask) as u8;
    }
    n
}

/// Appends the digits of `u`. With `pad > 0` exactly `pad` digits are
/// produced, zero-filled on the left; otherwise leading zeros are dropped.
fn get_str_basecase(out: &mut Vec<u8>, pad: usize, base: u32, u: &mut [Limb]) {
    let (per, big) = big_base(base);
    let b = Limb::from(base);

    let mut rev: SmallVec<[u8; 64]> = SmallVec::new();
    let mut len = normalized_len(u);
    while len > 0 {
        let mut chunk = divrem_1_assign(&mut u[..len], big);
        len = normalized_len(&u[..len]);
        if len == 0 && pad == 0 {
            while chunk != 0 {
                rev.push((chunk % b) as u8);
                chunk /= b;
            }
        } else {
            for _ in 0..per {
                rev.push((chunk % b) as u8);
                chunk /= b;
            }
        }
    }

    if pad > 0 {
        debug_assert!(rev.len() <= pad + per);
        // Whole chunks may overshoot the requested width with zeros only.
        while rev.len() > pad {
            debug_assert_eq!(rev.last(), Some(&0));
            rev.pop();
        }
        rev.resize(pad, 0);
    }
    out.extend(rev.iter().rev());
}

fn get_str_dc(
    out: &mut Vec<u8>,
    pad: usize,
    base: u32,
    u: &mut [Limb],
    table: &PowerTable,
    level: usize,
) {
    let un = normalized_len(u);
    if un < GET_STR_DC_THRESHOLD {
        get_str_basecase(out, pad, base, &mut u[..un]);
        return;
    }

    // The largest power below u keeps the high half non-zero at the top.
    let mut level = level;
    while table.powers[level].0.len() >= un && level > 0 {
        level -= 1;
    }
    let (power, digits) = &table.powers[level];
    if power.len() >= un {
        get_str_basecase(out, pad, base, &mut u[..un]);
        return;
    }

    let pn = power.len();
    let mut q = scratch(un - pn + 1);
    let mut r = scratch(pn);
    tdiv_qr(&mut q, &mut r, &u[..un], power);

    let hi_pad = if pad > 0 { pad - digits } else { 0 };
    get_str_dc(out, hi_pad, base, &mut q, table, level);
    get_str_dc(out, *digits, base, &mut r, table, level);
}

/// Converts the digit values `digits` (most significant first, each below
/// `base`) into `r`, returning the normalized limb count.
///
/// `r` needs [`limbs_for_digits`] limbs.
pub fn set_str(r: &mut [Limb], digits: &[u8], base: u32) -> usize {
    debug_assert!((2..=36).contains(&base));
    debug_assert!(digits.iter().all(|&d| u32::from(d) < base));

    r.fill(0);
    if base.is_power_of_two() {
        return set_str_pow2(r, digits, base.trailing_zeros() as usize);
    }
    if digits.len() < SET_STR_DC_THRESHOLD {
        return set_str_basecase(r, digits, base);
    }

    debug!(digits = digits.len(), base, "divide and conquer set_str");
    let table = PowerTable::new(base, limbs_for_digits(digits.len(), base) / 2 + 1);
    let n = set_str_dc(digits, base, &table);
    r[..n.len()].copy_from_slice(&n);
    n.len()
}

fn set_str_pow2(r: &mut [Limb], digits: &[u8], per: usize) -> usize {
    for (k, &d) in digits.iter().rev().enumerate() {
        let pos = k * per;
        let (i, off) = (pos / BITS, pos % BITS);
        let d = Limb::from(d);
        r[i] |= d << off;
        if off + per > BITS {
            r[i + 1] |= d >> (BITS - off);
        }
    }
    normalized_len(r)
}

fn set_str_basecase(r: &mut [Limb], digits: &[u8], base: u32) -> usize {
    let (per, big) = big_base(base);
    let b = Limb::from(base);

    let mut n = 0;
    let first = match digits.len() % per {
        0 => per.min(digits.len()),
        m => m,
    };
    let (head, tail) = digits.split_at(first);
    let mut chunks = core::iter::once(head).chain(tail.chunks(per));

    if let Some(head) = chunks.next() {
        let value = head.iter().fold(0, |acc: Limb, &d| acc * b + Limb::from(d));
        if value != 0 {
            r[0] = value;
            n = 1;
        }
    }
    for chunk in chunks {
        let value = chunk.iter().fold(0, |acc: Limb, &d| acc * b + Limb::from(d));
        let carry = mul_1_assign(&mut r[..n], big);
        let carry = carry + add_assign_1(&mut r[..n], value);
        if carry != 0 {
            r[n] = carry;
            n += 1;
        }
    }
    n
}

fn set_str_dc(digits: &[u8], base: u32, table: &PowerTable) -> Scratch {
    if digits.len() < SET_STR_DC_THRESHOLD {
        let mut r = scratch(limbs_for_digits(digits.len(), base));
        let n = set_str_basecase(&mut r, digits, base);
        r.truncate(n);
        return r;
    }

    // Split at the largest power covering at most half of the digits.
    let (power, low_digits) = table
        .powers
        .iter()
        .rev()
        .find(|(_, d)| 2 * d <= digits.len())
        .map_or((&table.powers[0].0, table.powers[0].1), |(p, d)| (p, *d));
    let (hi_digits, lo_digits) = digits.split_at(digits.len() - low_digits);

    let hi = set_str_dc(hi_digits, base, table);
    let lo = set_str_dc(lo_digits, base, table);

    let mut r = scratch(hi.len() + power.len() + 1);
    if !hi.is_empty() {
        mul(&mut r[..hi.len() + power.len()], &hi, power);
    }
    let carry = add_assign(&mut r, &lo);
    debug_assert_eq!(carry, 0);
    r.truncate(normalized_len(&r));
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limb::MAX;
    use rand::prelude::*;
    use rand_xorshift::XorShiftRng;

    fn to_digits(u: &[Limb], base: u32) -> Vec<u8> {
        let mut work = u.to_vec();
        let mut digits = vec![0; size_in_base(u, base)];
        let n = get_str(&mut digits, base, &mut work);
        digits.truncate(n);
        digits
    }

    fn from_digits(digits: &[u8], base: u32) -> Vec<Limb> {
        let mut r = vec![0; limbs_for_digits(digits.len(), base)];
        let n = set_str(&mut r, digits, base);
        r.truncate(n);
        r
    }

    #[test]
    fn test_big_base() {
        assert_eq!(big_base(10).0, if BITS == 64 { 19 } else { 9 });
        let (digits, power) = big_base(3);
        assert_eq!(power, (3 as Limb).pow(digits as u32));
        assert!(power.checked_mul(3).is_none());
    }

    #[test]
    fn test_small_conversions() {
        assert_eq!(to_digits(&[255], 16), vec![15, 15]);
        assert_eq!(to_digits(&[1_000_000_007], 10), vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 7]);
        assert_eq!(to_digits(&[], 7), vec![0]);
        assert_eq!(from_digits(&[15, 15], 16), vec![255]);
        assert_eq!(from_digits(&[0, 0, 4, 2], 10), vec![42]);
        assert!(from_digits(&[0, 0], 10).is_empty());
    }

    #[test]
    fn test_size_in_base_is_upper_bound() {
        let mut rng = XorShiftRng::seed_from_u64(61);
        for base in 2..=36 {
            for len in [1usize, 3, 20] {
                let mut u = vec![0; len];
                rng.fill(&mut u[..]);
                u[len - 1] |= 1;
                let digits = to_digits(&u, base);
                let size = size_in_base(&u, base);
                assert!(size >= digits.len());
                if base.is_power_of_two() {
                    assert_eq!(size, digits.len());
                }
            }
        }
        assert_eq!(size_in_base(&[MAX], 2), BITS);
    }

    #[test]
    fn test_round_trip_every_base() {
        let mut rng = XorShiftRng::seed_from_u64(62);
        for base in 2..=36 {
            for len in [1usize, 2, 5, GET_STR_DC_THRESHOLD + 3, 3 * GET_STR_DC_THRESHOLD] {
                let mut u = vec![0; len];
                rng.fill(&mut u[..]);
                u[len - 1] |= 1;
                let digits = to_digits(&u, base);
                assert_ne!(digits[0], 0);
                assert_eq!(from_digits(&digits, base), u, "base {}", base);
            }
        }
    }

    #[test]
    fn test_divide_and_conquer_paths_agree() {
        let mut rng = XorShiftRng::seed_from_u64(63);
        let digits: Vec<u8> = (0..3 * SET_STR_DC_THRESHOLD + 17)
            .map(|i| if i == 0 { 1 } else { rng.random_range(0..10) })
            .collect();

        let fast = from_digits(&digits, 10);
        let mut slow = vec![0; limbs_for_digits(digits.len(), 10)];
        let n = set_str_basecase(&mut slow, &digits, 10);
        slow.truncate(n);
        assert_eq!(fast, slow);

        assert_eq!(to_digits(&fast, 10), digits);
    }

    #[test]
    fn test_digits_with_interior_zero_chunks() {
        // A power of the base exercises zero-padded low parts.
        let mut digits = vec![0u8; 2000];
        digits[0] = 1;
        let u = from_digits(&digits, 10);
        assert_eq!(to_digits(&u, 10), digits);
    }
}
