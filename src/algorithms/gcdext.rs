//! Extended GCD on limb vectors by Lehmer's method.
//!
//! Only the cofactor of the first operand is carried. Along the Euclidean
//! remainder sequence `r[0] = u, r[1] = v, r[i+1] = r[i-1] - q[i]*r[i]` the
//! cofactors `s[i]` (with `r[i] = s[i]*u + t[i]*v`) alternate in sign, so the
//! engine stores their magnitudes and the parity of `i`. Every cofactor update
//! is then a sum of non-negative terms.
//!
//! A round looks at a two-limb window of the leading bits of both remainders
//! and runs Euclid on it for as long as the quotients provably match the
//! full-precision ones. The collected 2x2 matrix is applied to the remainders
//! and the cofactors with single-limb multiply-accumulate passes. Rounds that
//! cannot take two steps fall back to one full division.

use core::mem;

use tracing::trace;

use crate::limb::{BITS, DoubleLimb, Limb, MAX, clz, to_double};

use super::{
    Scratch, add_assign, addmul_1, mul, mul_1, normalized_len, scratch, sub_assign_1, submul_1,
    tdiv_qr,
};

/// Extended GCD of two magnitudes: writes `g = gcd(u, v)` to `g` and the
/// magnitude of a cofactor `s` with `u*s + v*t == g` (for some integer `t`)
/// to `s`.
///
/// `u` and `v` must be non-zero without leading zero limbs, and
/// `u.len() >= v.len()`. Requires `g.len() == s.len() == v.len()`. Returns
/// the lengths of `g` and `|s|`, and whether `s` is negative. The cofactor
/// satisfies `|s| <= v`.
pub fn gcdext(g: &mut [Limb], s: &mut [Limb], u: &[Limb], v: &[Limb]) -> (usize, usize, bool) {
    let vn = v.len();
    debug_assert!(vn > 0 && u.len() >= vn);
    debug_assert!(u[u.len() - 1] != 0 && v[vn - 1] != 0);
    debug_assert!(g.len() == vn && s.len() == vn);

    // One spare limb keeps every intermediate cofactor in range.
    let mut sa = scratch(vn + 1);
    sa[0] = 1;
    let mut st = Remainders {
        a: Scratch::from_slice(u),
        b: Scratch::from_slice(v),
        sa,
        sb: scratch(vn + 1),
        odd: false,
    };

    let (mut divisions, mut matrices) = (0usize, 0usize);
    while st.b.len() > 1 {
        let m = simulate(&st.a, &st.b);
        if m.v0 == 0 {
            st.divide();
            divisions += 1;
        } else {
            st.apply(&m);
            matrices += 1;
        }
    }
    trace!(divisions, matrices, "lehmer gcdext reached single limb");

    if !st.b.is_empty() && st.a.len() > 1 {
        st.divide();
    }
    if !st.b.is_empty() {
        debug_assert!(st.a.len() == 1 && st.b.len() == 1);
        let (mut x, mut y) = (st.a[0], st.b[0]);
        while y != 0 {
            let q = x / y;
            (x, y) = (y, x % y);
            st.push_quotient(q);
        }
        st.a = Scratch::from_slice(&[x]);
    }

    let gn = st.a.len();
    g[..gn].copy_from_slice(&st.a);
    let sn = normalized_len(&st.sa);
    debug_assert!(sn <= vn);
    s[..sn].copy_from_slice(&st.sa[..sn]);
    (gn, sn, st.odd && sn > 0)
}

/// Two consecutive remainders `a = r[i]`, `b = r[i+1]` without leading zero
/// limbs, and the magnitudes of their cofactors of `u`.
struct Remainders {
    a: Scratch,
    b: Scratch,
    sa: Scratch,
    sb: Scratch,
    /// Parity of `i`; `s[i]` is negative when odd.
    odd: bool,
}

impl Remainders {
    /// One full-precision Euclid step.
    fn divide(&mut self) {
        let (an, bn) = (self.a.len(), self.b.len());
        let mut q = scratch(an - bn + 1);
        let mut r = scratch(bn);
        tdiv_qr(&mut q, &mut r, &self.a, &self.b);

        let qn = normalized_len(&q);
        let sbn = normalized_len(&self.sb);
        if qn > 0 && sbn > 0 {
            let mut p = scratch(qn + sbn);
            mul(&mut p, &q[..qn], &self.sb[..sbn]);
            let carry = add_assign(&mut self.sa, &p[..normalized_len(&p)]);
            debug_assert_eq!(carry, 0);
        }
        mem::swap(&mut self.sa, &mut self.sb);

        r.truncate(normalized_len(&r));
        self.a = mem::replace(&mut self.b, r);
        self.odd = !self.odd;
    }

    /// Folds a single-limb quotient into the cofactors once the remainders
    /// themselves are held in machine words.
    fn push_quotient(&mut self, q: Limb) {
        let carry = addmul_1(&mut self.sa, &self.sb, q);
        debug_assert_eq!(carry, 0);
        mem::swap(&mut self.sa, &mut self.sb);
        self.odd = !self.odd;
    }

    /// Moves `k - 1` steps ahead with the matrix collected over `k` simulated
    /// steps.
    fn apply(&mut self, m: &Matrix) {
        let n = self.a.len();
        let mut a = scratch(n + 1);
        let mut b = scratch(n + 1);
        if m.even {
            mul_sub(&mut a, &self.a, m.u0, &self.b, m.v0);
            mul_sub(&mut b, &self.b, m.v1, &self.a, m.u1);
        } else {
            mul_sub(&mut a, &self.b, m.v0, &self.a, m.u0);
            mul_sub(&mut b, &self.a, m.u1, &self.b, m.v1);
        }
        a.truncate(normalized_len(&a));
        b.truncate(normalized_len(&b));
        debug_assert!(!a.is_empty());
        self.a = a;
        self.b = b;

        let len = self.sa.len();
        let mut sa = scratch(len);
        let mut sb = scratch(len);
        mul_add(&mut sa, &self.sa, m.u0, &self.sb, m.v0);
        mul_add(&mut sb, &self.sa, m.u1, &self.sb, m.v1);
        self.sa = sa;
        self.sb = sb;
        self.odd ^= !m.even;
    }
}

/// `r = p*x - q*y`, known not to be negative. `r` is zeroed and one limb
/// longer than both `p` and `q`.
fn mul_sub(r: &mut [Limb], p: &[Limb], x: Limb, q: &[Limb], y: Limb) {
    let pn = p.len();
    let carry = mul_1(&mut r[..pn], p, x);
    r[pn] = carry;
    let borrow = submul_1(r, q, y);
    let borrow = sub_assign_1(&mut r[q.len()..], borrow);
    debug_assert_eq!(borrow, 0);
}

/// `r = p*x + q*y` for equal-length `r`, `p` and `q`, known to fit.
fn mul_add(r: &mut [Limb], p: &[Limb], x: Limb, q: &[Limb], y: Limb) {
    let carry = mul_1(r, p, x);
    debug_assert_eq!(carry, 0);
    let carry = addmul_1(r, q, y);
    debug_assert_eq!(carry, 0);
}

/// Magnitudes of the remainder matrix after `k` simulated steps. With
/// `x = r[i]`, `y = r[i+1]`:
///
/// - `even`: `r[i+k-1] = u0*x - v0*y` and `r[i+k] = v1*y - u1*x`
/// - otherwise: `r[i+k-1] = v0*y - u0*x` and `r[i+k] = u1*x - v1*y`
///
/// The cofactors follow as `s[i+k-1] = u0*s[i] + v0*s[i+1]` and
/// `s[i+k] = u1*s[i] + v1*s[i+1]` in magnitude.
struct Matrix {
    u0: Limb,
    u1: Limb,
    v0: Limb,
    v1: Limb,
    even: bool,
}

/// The top `2 * BITS` bits of `x`, aligned so the leading limb of a
/// `n`-limb value starts `h` bits below the top of the window.
fn window(x: &[Limb], n: usize, h: u32) -> DoubleLimb {
    let limb = |i: usize| x.get(i).copied().unwrap_or(0);
    let top = to_double(limb(n - 1), limb(n - 2));
    if h == 0 {
        return top;
    }
    let below = if n >= 3 { limb(n - 3) } else { 0 };
    (top << h) | DoubleLimb::from(below >> (BITS as u32 - h))
}

/// Runs Euclid on the leading windows of `a >= b` while Jebelean's condition
/// holds and the matrix entries still fit in a limb.
fn simulate(a: &[Limb], b: &[Limb]) -> Matrix {
    let n = a.len();
    let h = clz(a[n - 1]);
    let mut a1 = window(a, n, h);
    let mut a2 = window(b, n, h);

    let (mut u0, mut u1, mut u2): (DoubleLimb, DoubleLimb, DoubleLimb) = (0, 1, 0);
    let (mut v0, mut v1, mut v2): (DoubleLimb, DoubleLimb, DoubleLimb) = (0, 0, 1);
    let mut even = false;
    let limit = DoubleLimb::from(MAX);

    while u2 <= limit
        && v2 <= limit
        && a2 >= v2
        && a1.checked_sub(a2).is_some_and(|d| d >= v1 + v2)
    {
        let q = a1 / a2;
        let next_u = q.checked_mul(u2).and_then(|x| x.checked_add(u1));
        let next_v = q.checked_mul(v2).and_then(|x| x.checked_add(v1));
        let (Some(next_u), Some(next_v)) = (next_u, next_v) else {
            break;
        };

        (a1, a2) = (a2, a1 % a2);
        (u0, u1, u2) = (u1, u2, next_u);
        (v0, v1, v2) = (v1, v2, next_v);
        even = !even;
    }

    Matrix {
        u0: u0 as Limb,
        u1: u1 as Limb,
        v0: v0 as Limb,
        v1: v1 as Limb,
        even,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{add, cmp_slice, is_zero, normalize};
    use core::cmp::Ordering;
    use rand::prelude::*;
    use rand_xorshift::XorShiftRng;

    fn run(u: &[Limb], v: &[Limb]) -> (Vec<Limb>, Vec<Limb>, bool) {
        let mut g = vec![0; v.len()];
        let mut s = vec![0; v.len()];
        let (gn, sn, negative) = gcdext(&mut g, &mut s, u, v);
        g.truncate(gn);
        s.truncate(sn);
        (g, s, negative)
    }

    fn modulo(x: &[Limb], d: &[Limb]) -> Vec<Limb> {
        let x = normalize(x);
        if x.len() < d.len() {
            return x.to_vec();
        }
        let mut q = vec![0; x.len() - d.len() + 1];
        let mut r = vec![0; d.len()];
        tdiv_qr(&mut q, &mut r, x, d);
        normalize(&r).to_vec()
    }

    fn euclid(u: &[Limb], v: &[Limb]) -> Vec<Limb> {
        let (mut a, mut b) = (normalize(u).to_vec(), normalize(v).to_vec());
        while !b.is_empty() {
            let r = modulo(&a, &b);
            a = mem::replace(&mut b, r);
        }
        a
    }

    /// Checks `g` against plain Euclid, `|s| <= v` and `u*s == g (mod v)`.
    fn check(u: &[Limb], v: &[Limb]) {
        let (g, s, negative) = run(u, v);
        assert_eq!(g, euclid(u, v));
        assert_ne!(cmp_slice(&s, v), Ordering::Greater);

        let mut us = vec![0; u.len() + s.len().max(1)];
        if !s.is_empty() {
            mul(&mut us, u, &s);
        }
        if negative {
            // u*|s| + g == 0 (mod v)
            let mut total = vec![0; us.len() + 1];
            let carry = add(&mut total[..us.len()], &us, &g);
            total[us.len()] = carry;
            assert!(modulo(&total, v).is_empty());
        } else {
            assert_eq!(modulo(&us, v), modulo(&g, v));
        }
    }

    fn random_limbs(rng: &mut XorShiftRng, len: usize) -> Vec<Limb> {
        let mut x = vec![0 as Limb; len];
        rng.fill(&mut x[..]);
        x[len - 1] |= 1;
        x
    }

    #[test]
    fn test_small_operands() {
        assert_eq!(run(&[1071], &[462]), (vec![21], vec![3], true));
        assert_eq!(run(&[462], &[1071]), (vec![21], vec![7], false));
        // v divides u: s is the trivial cofactor.
        assert_eq!(run(&[91], &[7]), (vec![7], vec![], false));
        assert_eq!(run(&[5], &[5]), (vec![5], vec![], false));
        assert_eq!(run(&[MAX], &[1]), (vec![1], vec![], false));
    }

    #[test]
    fn test_consecutive_fibonacci() {
        // The longest remainder sequence for operands of their size.
        let (mut a, mut b) = (vec![1 as Limb; 1], vec![1 as Limb; 1]);
        for _ in 0..1500 {
            let n = b.len();
            let mut padded = a.clone();
            padded.resize(n, 0);
            let mut c = vec![0; n + 1];
            let carry = add(&mut c[..n], &b, &padded);
            c[n] = carry;
            a = b;
            b = normalize(&c).to_vec();
        }
        let (g, s, _) = run(&b, &a);
        assert_eq!(g, vec![1]);
        assert!(!is_zero(&s));
        check(&b, &a);
    }

    #[test]
    fn test_random_lengths() {
        let mut rng = XorShiftRng::seed_from_u64(131);
        for _ in 0..300 {
            let vn = rng.random_range(1..24);
            let un = vn + rng.random_range(0..4);
            let u = random_limbs(&mut rng, un);
            let v = random_limbs(&mut rng, vn);
            check(&u, &v);
        }
    }

    #[test]
    fn test_large_common_factor() {
        let mut rng = XorShiftRng::seed_from_u64(132);
        for (kn, xn, yn) in [(1, 3, 2), (4, 8, 8), (12, 20, 15), (30, 35, 30), (2, 60, 1)] {
            let k = random_limbs(&mut rng, kn);
            let x = random_limbs(&mut rng, xn);
            let y = random_limbs(&mut rng, yn);
            let mut u = vec![0; kn + xn];
            let mut v = vec![0; kn + yn];
            mul(&mut u, &x, &k);
            mul(&mut v, &y, &k);
            let (u, v) = (normalize(&u), normalize(&v));
            let (u, v) = if u.len() >= v.len() { (u, v) } else { (v, u) };
            check(u, v);
            let (g, _, _) = run(u, v);
            assert!(g.len() >= kn);
        }
    }

    #[test]
    fn test_same_length_smaller_first() {
        let mut rng = XorShiftRng::seed_from_u64(133);
        for len in 1..16 {
            let mut u = random_limbs(&mut rng, len);
            let mut v = random_limbs(&mut rng, len);
            if cmp_slice(&u, &v) == Ordering::Greater {
                mem::swap(&mut u, &mut v);
            }
            check(&u, &v);
        }
    }

    #[test]
    fn test_simulation_falls_back_on_unbalanced_operands() {
        // The second window is empty, so no quotient can be certified.
        let m = simulate(&[1, 2, 3, 4], &[5, 6]);
        assert_eq!(m.v0, 0);

        // Exact windows: quotients 1 and 999, then the second remainder is zero.
        let m = simulate(&[0, 0, 1000], &[0, 0, 999]);
        assert_eq!((m.u0, m.u1, m.v0, m.v1, m.even), (0, 1, 1, 1, false));
    }
}
