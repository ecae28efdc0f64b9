use num_mpz::{DivExact, Mpz};

#[test]
fn divide_prime_by_small_divisor() {
    let n = Mpz::from(1_000_000_007);
    let d = Mpz::from(97);
    assert_eq!(n.div_rem(&d), (Mpz::from(10_309_237), Mpz::from(18)));

    let mut q = Mpz::from(-1);
    let mut r = Mpz::from(u128::MAX);
    Mpz::tdiv_qr_into(&mut q, &mut r, &n, &d);
    assert_eq!((q, r), (Mpz::from(10_309_237), Mpz::from(18)));
}

#[test]
fn gcd_and_bezout_coefficients() {
    let (a, b) = (Mpz::from(462), Mpz::from(1071));
    assert_eq!(a.gcd(&b), Mpz::from(21));
    let (g, s, t) = a.gcd_ext(&b);
    assert_eq!(g, Mpz::from(21));
    assert_eq!(&a * &s + &b * &t, g);
}

#[test]
fn square_roots_of_1024_and_1025() {
    assert_eq!(Mpz::from(1024).sqrt_rem(), (Mpz::from(32), Mpz::from(0)));
    assert!(Mpz::from(1024).is_perfect_square());
    assert_eq!(Mpz::from(1025).sqrt_rem(), (Mpz::from(32), Mpz::from(1)));
    assert!(!Mpz::from(1025).is_perfect_square());
}

#[test]
fn hex_text() {
    assert_eq!(Mpz::from(255).to_str_radix(16), "ff");
    assert_eq!(Mpz::from(-255).to_str_radix(-16), "-FF");
    assert_eq!(Mpz::parse_radix("ff", 16), Ok(Mpz::from(255)));
}

#[test]
#[cfg(feature = "rand")]
fn exact_division_by_gcd() {
    use num_mpz::RandMpz;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    let mut rng = XorShiftRng::seed_from_u64(2024);
    for bits in [10u64, 64, 65, 500, 2000, 6000] {
        let a = rng.gen_signed_mpz(bits);
        let b = rng.gen_signed_mpz(bits / 2 + 1);
        let k = rng.gen_signed_mpz(bits);
        let g = a.gcd(&b);
        if g.is_zero() {
            continue;
        }
        let n = &g * &k;
        assert_eq!(Mpz::div_exact(&n, &g), k);
        assert_eq!(DivExact::div_exact(n, g), k);
    }
}

#[test]
#[cfg(feature = "rand")]
fn quotient_over_dividend_matches_separate_output() {
    use num_mpz::RandMpz;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    let mut rng = XorShiftRng::seed_from_u64(7);
    for (nbits, dbits) in [(64u64, 64u64), (1000, 63), (1000, 200), (5000, 2500), (300, 900)] {
        let n = rng.gen_signed_mpz(nbits);
        let mut d = rng.gen_signed_mpz(dbits);
        if d.is_zero() {
            d = Mpz::from(3);
        }

        let expected = &n / &d;
        let mut aliased = n.clone();
        aliased /= &d;
        assert_eq!(aliased, expected);

        let mut aliased = n.clone();
        let r = aliased.div_rem_in_place(&d);
        assert_eq!((aliased, r), n.div_rem(&d));

        let mut rem = n.clone();
        rem %= &d;
        assert_eq!(rem, &n % &d);
    }
}
