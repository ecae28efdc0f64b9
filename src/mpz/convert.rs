use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use super::Mpz;
use crate::ParseMpzError;
use crate::algorithms::{Scratch, get_str, limbs_for_digits, set_str, size_in_base};

const LOWER: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Splits a base prefix off `s` for radix 0.
fn infer_radix(s: &[u8]) -> (u32, &[u8]) {
    match s {
        [b'0', b'x' | b'X', rest @ ..] => (16, rest),
        [b'0', b'b' | b'B', rest @ ..] => (2, rest),
        [b'0', rest @ ..] if !rest.is_empty() => (8, rest),
        _ => (10, s),
    }
}

fn digit_value(c: u8) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some(u32::from(c - b'0')),
        b'a'..=b'z' => Some(u32::from(c - b'a') + 10),
        b'A'..=b'Z' => Some(u32::from(c - b'A') + 10),
        _ => None,
    }
}

impl Mpz {
    /// Parses `s` in the given radix.
    ///
    /// The text is an optional `+` or `-` followed by digits of the radix,
    /// letters in either case. Radix 0 infers the base from a prefix: `0x`
    /// for hexadecimal, `0b` for binary, a leading `0` for octal and decimal
    /// otherwise. Whitespace and `_` are rejected anywhere.
    pub fn parse_radix(s: &str, radix: u32) -> Result<Mpz, ParseMpzError> {
        if radix == 1 || radix > 36 {
            return Err(ParseMpzError::radix());
        }
        let bytes = s.as_bytes();
        let (negative, bytes) = match bytes {
            [b'-', rest @ ..] => (true, rest),
            [b'+', rest @ ..] => (false, rest),
            _ => (false, bytes),
        };
        let (radix, bytes) = if radix == 0 { infer_radix(bytes) } else { (radix, bytes) };
        if bytes.is_empty() {
            return Err(ParseMpzError::empty());
        }

        let digits = bytes
            .iter()
            .map(|&c| match digit_value(c) {
                Some(d) if d < radix => Ok(d as u8),
                _ => Err(ParseMpzError::invalid()),
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let mut limbs = Scratch::from_elem(0, limbs_for_digits(digits.len(), radix));
        let n = set_str(&mut limbs, &digits, radix);
        let mut r = Mpz::new();
        r.assign_magnitude(&limbs[..n], negative);
        Ok(r)
    }

    /// Formats the value in base `|radix|`, lowercase for a positive radix
    /// and uppercase for a negative one. No prefix is written and the only
    /// value with a leading zero is `0` itself.
    ///
    /// Panics unless `|radix|` is within `2..=36`.
    pub fn to_str_radix(&self, radix: i32) -> String {
        let base = radix.unsigned_abs();
        assert!(
            (2..=36).contains(&base),
            "the radix must be within 2...36, got {}",
            radix
        );
        let alphabet = if radix < 0 { UPPER } else { LOWER };

        let mut s = String::with_capacity(self.size_in_base(base) + 1);
        if self.is_negative() {
            s.push('-');
        }
        s.extend(self.digits(base).iter().map(|&d| alphabet[d as usize] as char));
        s
    }

    /// An upper bound on the number of digits of `|self|` in `base`, not
    /// counting a sign. Exact for powers of two.
    pub fn size_in_base(&self, base: u32) -> usize {
        assert!((2..=36).contains(&base), "the radix must be within 2...36");
        size_in_base(self.limbs(), base)
    }

    /// Digit values of the magnitude, most significant first.
    fn digits(&self, base: u32) -> Vec<u8> {
        let mut work = Scratch::from_slice(self.limbs());
        let mut digits = vec![0; self.size_in_base(base)];
        let n = get_str(&mut digits, base, &mut work);
        digits.truncate(n);
        digits
    }

    fn fmt_radix(
        &self,
        f: &mut fmt::Formatter<'_>,
        base: u32,
        prefix: &str,
        upper: bool,
    ) -> fmt::Result {
        let alphabet = if upper { UPPER } else { LOWER };
        let digits: String = self
            .digits(base)
            .iter()
            .map(|&d| alphabet[d as usize] as char)
            .collect();
        f.pad_integral(!self.is_negative(), prefix, &digits)
    }
}

impl FromStr for Mpz {
    type Err = ParseMpzError;

    #[inline]
    fn from_str(s: &str) -> Result<Mpz, ParseMpzError> {
        Mpz::parse_radix(s, 10)
    }
}

impl fmt::Display for Mpz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, 10, "", false)
    }
}

impl fmt::Debug for Mpz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::LowerHex for Mpz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, 16, "0x", false)
    }
}

impl fmt::UpperHex for Mpz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, 16, "0x", true)
    }
}

impl fmt::Octal for Mpz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, 8, "0o", false)
    }
}

impl fmt::Binary for Mpz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, 2, "0b", false)
    }
}
