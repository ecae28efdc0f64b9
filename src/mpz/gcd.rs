use num_integer::Integer;

use super::Mpz;
use crate::algorithms::{self, bit_len, gcd_1, gcdext, scratch, shl_bits, shr_bits, trailing_zeros};

impl Mpz {
    /// Greatest common divisor, never negative. `gcd(0, 0) == 0`.
    pub fn gcd(&self, other: &Mpz) -> Mpz {
        let (a, b) = (self.limbs(), other.limbs());
        let mut g = Mpz::new();
        if a.is_empty() || b.is_empty() {
            g.assign_magnitude(if a.is_empty() { b } else { a }, false);
            return g;
        }
        if a.len() == 1 || b.len() == 1 {
            let (long, limb) = if a.len() == 1 { (b, a[0]) } else { (a, b[0]) };
            g.set_limb(gcd_1(long, limb), false);
            return g;
        }

        // The engine wants odd operands; the common power of two goes back on at the end.
        let (za, zb) = (trailing_zeros(a), trailing_zeros(b));
        let a = shr_bits(a, za);
        let b = shr_bits(b, zb);
        let (u, v) = if bit_len(&a) >= bit_len(&b) { (&a, &b) } else { (&b, &a) };

        let mut w = scratch(v.len());
        let n = algorithms::gcd(&mut w, u, v);
        let w = shl_bits(&w[..n], za.min(zb));
        g.assign_magnitude(&w, false);
        g
    }

    /// Extended GCD: returns `(g, s, t)` with `g = gcd(self, other)` and
    /// `self*s + other*t == g`.
    ///
    /// `gcd_ext(0, 0)` is `(0, 0, 0)`. With one zero operand the cofactor of
    /// the other is its sign. Otherwise the cofactor of the longer operand
    /// (`self` on a tie) is the one from the Euclidean remainder sequence and
    /// the other is solved for by exact division.
    pub fn gcd_ext(&self, other: &Mpz) -> (Mpz, Mpz, Mpz) {
        if other.is_zero() {
            return (self.abs(), self.signum(), Mpz::new());
        }
        if self.is_zero() {
            return (other.abs(), Mpz::new(), other.signum());
        }

        let swapped = self.len() < other.len();
        let (u, v) = if swapped { (other, self) } else { (self, other) };
        let vn = v.len();
        let mut g = Mpz::new();
        let mut s = Mpz::new();
        let (gn, sn, negative) = gcdext(g.grow(vn), s.grow(vn), u.limbs(), v.limbs());
        g.set_len(gn, false);
        s.set_len(sn, negative != u.is_negative());

        let t = (&g - &(u * &s)).div_exact(v);
        if swapped { (g, t, s) } else { (g, s, t) }
    }

    /// Least common multiple, never negative. Zero if either operand is zero.
    pub fn lcm(&self, other: &Mpz) -> Mpz {
        if self.is_zero() || other.is_zero() {
            return Mpz::new();
        }
        let g = self.gcd(other);
        (self.div_exact(&g) * other).abs()
    }

    /// The inverse of `self` modulo `|m|`, in `0..|m|`, if `gcd(self, m) == 1`.
    ///
    /// Panics when `m` is zero.
    pub fn mod_inverse(&self, m: &Mpz) -> Option<Mpz> {
        if m.is_zero() {
            algorithms::divide_by_zero();
        }
        let m = m.abs();
        let a = self.mod_floor(&m);
        let (g, s, _) = a.gcd_ext(&m);
        if g != Mpz::from(1u8) {
            return None;
        }
        let mut s = s % &m;
        if s.is_negative() {
            s += &m;
        }
        Some(s)
    }
}
