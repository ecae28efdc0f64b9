use core::cmp::Ordering;

use tracing::trace;

use smallvec::SmallVec;

use crate::limb::{BITS, DoubleLimb, Limb, MAX, clz, to_double};

use super::{
    Scratch, add, cmp_slice, lshift, normalize, normalized_len, rshift, rshift_assign, scratch,
    sqr, sub, sub_assign, sub_assign_1, tdiv_qr,
};

/// Upper bounds `ceil(sqrt((i + 1) * 256))` for an 8-bit leading window `i`
/// of the operand, starting at window `start`.
const fn sqrt_seed_table<const N: usize>(start: usize) -> [u16; N] {
    let mut table = [0u16; N];
    let mut i = 0;
    while i < N {
        let n = ((start + i + 1) * 256) as u32;
        let mut r = 0u32;
        while r * r < n {
            r += 1;
        }
        table[i] = r as u16;
        i += 1;
    }
    table
}

/// Seeds for operands whose leading bits are `01xxxxxx`.
static SQRT_SEED_LOW: [u16; 64] = sqrt_seed_table::<64>(64);
/// Seeds for operands whose leading bits are `1xxxxxxx`.
static SQRT_SEED_HIGH: [u16; 128] = sqrt_seed_table::<128>(128);

/// Squares modulo 256, one bit per residue.
const fn square_residues_256() -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < 256 {
        table[(i * i) % 256] = true;
        i += 1;
    }
    table
}

static SQUARE_MOD_256: [bool; 256] = square_residues_256();

/// `floor(sqrt(n))` for `n >= B^2 / 4`, which always fits one limb.
fn sqrt_double(n: DoubleLimb) -> Limb {
    let window = (n >> (2 * BITS - 8)) as usize;
    debug_assert!(window >= 64);

    let seed = if window >= 128 {
        SQRT_SEED_HIGH[window - 128]
    } else {
        SQRT_SEED_LOW[window - 64]
    };

    // The seed is an over-estimate, so Newton descends monotonically.
    let mut x = DoubleLimb::from(seed) << (BITS - 8);
    loop {
        let y = (x + n / x) >> 1;
        if y >= x {
            return x as Limb;
        }
        x = y;
    }
}

/// Square root with remainder.
///
/// `n` must be normalized and non-empty, `root` needs `n.len().div_ceil(2)`
/// limbs and `rem`, when given, `n.len()` limbs. Returns the normalized
/// length of the remainder, so zero means `n` is a perfect square.
///
/// The operand is shifted up by an even number of bits until it fills
/// `2 * root.len()` limbs with one of its top two bits set. A table seed and
/// single-limb Newton give the top root limb; each following Newton step
/// roughly doubles the number of known root limbs by dividing the matching
/// top part of the operand by the current root. The root is then shifted back
/// and corrected downwards until `root^2 <= n`.
pub fn sqrtrem(root: &mut [Limb], rem: Option<&mut [Limb]>, n: &[Limb]) -> usize {
    let nn = n.len();
    debug_assert!(nn > 0 && n[nn - 1] != 0);
    let rn = nn.div_ceil(2);
    debug_assert_eq!(root.len(), rn);

    let lead = (2 * rn - nn) * BITS + clz(n[nn - 1]) as usize;
    let shift = lead & !1;
    let (skip, bits) = (shift / BITS, (shift % BITS) as u32);

    let mut work = scratch(2 * rn);
    let top = lshift(&mut work[skip..skip + nn], n, bits);
    if top != 0 {
        work[skip + nn] = top;
    }

    let x = newton_ladder(&work, rn);
    rshift(root, &x, (shift / 2) as u32);

    let (square, corrections) = floor_correct(root, n);
    trace!(limbs = nn, corrections, "sqrtrem");

    let square = normalize(&square);
    match rem {
        Some(rem) => {
            sub(rem, n, square);
            normalized_len(rem)
        }
        None => {
            let mut r = scratch(nn);
            sub(&mut r, n, square);
            normalized_len(&r)
        }
    }
}

/// Decrements `x`, known to be at least `floor(sqrt(n))`, until
/// `x^2 <= n`. Returns `x^2` and the number of decrements.
fn floor_correct(x: &mut [Limb], n: &[Limb]) -> (Scratch, usize) {
    let mut square = scratch(2 * x.len());
    sqr(&mut square, x);
    let mut steps = 0;
    while cmp_slice(&square, n) == Ordering::Greater {
        // (x - 1)^2 = x^2 - x - (x - 1)
        sub_assign(&mut square, x);
        sub_assign_1(x, 1);
        sub_assign(&mut square, x);
        steps += 1;
    }
    (square, steps)
}

/// Runs Newton's iteration on the top limbs of `work` (`2 * rn` limbs, top
/// limb at least `B / 4`) and returns `floor(sqrt(work))` in `rn` limbs.
///
/// Every level is brought down to the exact floor root of its part of the
/// operand, so the next level starts within one unit and a single Newton
/// step lands within a few units again.
fn newton_ladder(work: &[Limb], rn: usize) -> Scratch {
    let wn = work.len();

    // Precisions visited, largest first: rn, ceil(rn/2), ... down to 2.
    let mut ladder: SmallVec<[usize; 16]> = SmallVec::new();
    let mut k = rn;
    while k > 1 {
        ladder.push(k);
        k = k.div_ceil(2);
    }

    let top = to_double(work[wn - 1], work[wn - 2]);
    let mut x = Scratch::from_slice(&[sqrt_double(top)]);

    for &next in ladder.iter().rev() {
        let k = x.len();
        let part = &work[wn - 2 * next..];

        // X' = X * B^(next - k) approximates the root of the top 2*next limbs.
        let mut xs = scratch(next);
        xs[next - k..].copy_from_slice(&x);

        let mut q = scratch(next + 1);
        let mut r = scratch(next);
        tdiv_qr(&mut q, &mut r, part, &xs);

        // (X' + Q) / 2, forced back into `next` limbs.
        let mut s = scratch(next + 2);
        let carry = add(&mut s[..next + 1], &q, &xs);
        s[next + 1] = carry;
        rshift_assign(&mut s, 1);
        if normalized_len(&s) > next {
            s = Scratch::from_elem(MAX, next);
        } else {
            s.truncate(next);
        }

        let (_, steps) = floor_correct(&mut s, part);
        trace!(precision = next, steps, "sqrt newton step");
        x = s;
    }
    x
}

/// Whether `n` is a perfect square. Rejects most non-squares by their low
/// byte before taking the root.
pub fn perfect_square_p(n: &[Limb]) -> bool {
    let n = normalize(n);
    if n.is_empty() {
        return true;
    }
    if !SQUARE_MOD_256[(n[0] & 0xff) as usize] {
        return false;
    }
    let mut root = scratch(n.len().div_ceil(2));
    sqrtrem(&mut root, None, n) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::mul;
    use crate::limb::HIGH_BIT;
    use rand::prelude::*;
    use rand_xorshift::XorShiftRng;

    fn check_sqrtrem(n: &[Limb]) {
        let n = normalize(n);
        let rn = n.len().div_ceil(2);
        let mut root = vec![0; rn];
        let mut rem = vec![0; n.len()];
        let remlen = sqrtrem(&mut root, Some(&mut rem), n);
        assert_eq!(remlen, normalized_len(&rem));
        assert!(root[rn - 1] != 0);

        // root^2 + rem == n
        let mut sq = vec![0; 2 * rn];
        mul(&mut sq, &root, &root);
        let mut total = vec![0; 2 * rn + 1];
        let c = add(&mut total[..2 * rn], &sq, normalize(&rem));
        total[2 * rn] = c;
        assert_eq!(cmp_slice(&total, n), Ordering::Equal);

        // rem <= 2*root, i.e. n < (root + 1)^2
        let mut twice = vec![0; rn + 1];
        let top = lshift(&mut twice[..rn], &root, 1);
        twice[rn] = top;
        assert_ne!(cmp_slice(&rem, &twice), Ordering::Greater);
    }

    #[test]
    fn test_seed_tables_bound_from_above() {
        assert_eq!(SQRT_SEED_LOW[0], 129);
        assert_eq!(SQRT_SEED_HIGH[127], 256);
        for (i, &s) in SQRT_SEED_HIGH.iter().enumerate() {
            let s = u32::from(s);
            assert!(s * s >= (128 + i as u32 + 1) * 256);
            assert!((s - 1) * (s - 1) < (128 + i as u32 + 1) * 256);
        }
    }

    #[test]
    fn test_sqrt_double() {
        let n = DoubleLimb::MAX;
        assert_eq!(sqrt_double(n), MAX);
        let n = DoubleLimb::from(HIGH_BIT) << BITS;
        let r = sqrt_double(n);
        assert!(DoubleLimb::from(r) * DoubleLimb::from(r) <= n);
        assert!((DoubleLimb::from(r) + 1) * (DoubleLimb::from(r) + 1) > n);
    }

    #[test]
    fn test_small_values() {
        let mut root = [0];
        let mut rem = [0];
        assert_eq!(sqrtrem(&mut root, Some(&mut rem), &[1024]), 0);
        assert_eq!(root, [32]);
        assert_eq!(sqrtrem(&mut root, Some(&mut rem), &[1025]), 1);
        assert_eq!((root, rem), ([32], [1]));
        assert_eq!(sqrtrem(&mut root, Some(&mut rem), &[1]), 0);
        assert_eq!(root, [1]);
        assert_eq!(sqrtrem(&mut root, Some(&mut rem), &[3]), 1);
        assert_eq!((root, rem), ([1], [2]));
    }

    #[test]
    fn test_sqrtrem_random_sizes() {
        let mut rng = XorShiftRng::seed_from_u64(51);
        for len in 1..40 {
            for _ in 0..5 {
                let mut n = vec![0; len];
                rng.fill(&mut n[..]);
                n[len - 1] >>= rng.random_range(0..BITS as u32);
                n[len - 1] |= 1;
                check_sqrtrem(&n);
            }
        }
    }

    #[test]
    fn test_sqrtrem_near_squares() {
        let mut rng = XorShiftRng::seed_from_u64(52);
        for len in 1..20 {
            let mut r = vec![0; len];
            rng.fill(&mut r[..]);
            r[len - 1] |= 1;
            let mut sq = vec![0; 2 * len];
            mul(&mut sq, &r, &r);
            let sq = normalize(&sq).to_vec();
            check_sqrtrem(&sq);
            assert!(perfect_square_p(&sq));

            let mut minus_one = sq.clone();
            sub_assign_1(&mut minus_one, 1);
            check_sqrtrem(&minus_one);
            assert!(!perfect_square_p(&minus_one));
        }
        let all_ones = vec![MAX; 7];
        check_sqrtrem(&all_ones);
    }

    #[test]
    fn test_perfect_square_filter() {
        assert!(perfect_square_p(&[]));
        assert!(perfect_square_p(&[144]));
        assert!(!perfect_square_p(&[2]));
        assert!(!perfect_square_p(&[145]));
    }
}
