use std::mem::swap;

use tracing::instrument;

use crate::poly::Gf2Poly;

///
/// Computes the greatest common divisor of `a` and `b` using the Euclidean algorithm.
///
/// Since the only unit of `GF(2)[X]` is `1`, the result is unique. We have
/// `gcd(a, 0) = a`, in particular `gcd(0, 0) = 0`.
///
/// # Example
/// ```
/// # use gf2_math::poly::*;
/// # use gf2_math::algorithms::eea::*;
/// let a = Gf2Poly::from_coefficients([0, 0, 0, 1, 1]);
/// let b = Gf2Poly::from_coefficients([0, 1, 1, 1]);
/// assert_eq!(Gf2Poly::from_coefficients([0, 1]), gcd(&a, &b));
/// ```
///
#[instrument(skip_all, level = "trace")]
pub fn gcd(a: &Gf2Poly, b: &Gf2Poly) -> Gf2Poly {
    let (mut a, mut b) = (a.clone(), b.clone());
    if a.checked_degree() < b.checked_degree() {
        swap(&mut a, &mut b);
    }
    // the degree of b strictly decreases in each iteration
    while !b.is_zero() {
        let r = a.rem_ref(&b);
        a = b;
        b = r;
    }
    return a;
}

///
/// For `a, b` computes `s, t, d` such that `s*a + t*b == d = gcd(a, b)`.
/// The cofactors `s, t` are not unique, and no guarantees are given on which
/// of the possible solutions is returned.
///
#[instrument(skip_all, level = "trace")]
pub fn eea(fst: &Gf2Poly, snd: &Gf2Poly) -> (Gf2Poly, Gf2Poly, Gf2Poly) {
    let (mut a, mut b) = (fst.clone(), snd.clone());

    let (mut sa, mut ta) = (Gf2Poly::one(), Gf2Poly::zero());
    let (mut sb, mut tb) = (Gf2Poly::zero(), Gf2Poly::one());

    while !b.is_zero() {
        let (quo, rem) = a.div_rem(&b);
        ta = ta - quo.mul_ref(&tb);
        sa = sa - quo.mul_ref(&sb);
        a = rem;

        swap(&mut a, &mut b);
        swap(&mut sa, &mut sb);
        swap(&mut ta, &mut tb);
    }
    return (sa, ta, a);
}

///
/// Computes the least common multiple of `a` and `b`, which is zero if one of them is zero.
///
pub fn lcm(a: &Gf2Poly, b: &Gf2Poly) -> Gf2Poly {
    if a.is_zero() || b.is_zero() {
        return Gf2Poly::zero();
    }
    return a.div_ref(&gcd(a, b)).mul_ref(b);
}

#[test]
fn test_gcd() {
    let a = Gf2Poly::from_coefficients([0, 0, 0, 1, 1]);
    let b = Gf2Poly::from_coefficients([0, 0, 3, 4]);
    let g = gcd(&a, &b);
    assert_eq!(Gf2Poly::from_coefficients([0, 0, 1]), g);
    assert!(a.rem_ref(&g).is_zero());
    assert!(b.rem_ref(&g).is_zero());

    let a = Gf2Poly::from_coefficients([0, 0, 0, 1, 1]);
    let b = Gf2Poly::from_coefficients([0, 1, 3, 4]);
    let g = gcd(&a, &b);
    assert_eq!(Gf2Poly::from_coefficients([0, 1, 1]), g);
    assert!(a.rem_ref(&g).is_zero());
    assert!(b.rem_ref(&g).is_zero());
}

#[test]
fn test_gcd_zero() {
    let a = Gf2Poly::from_hex("a466cfdc").unwrap();
    assert_eq!(a, gcd(&a, &Gf2Poly::zero()));
    assert_eq!(a, gcd(&Gf2Poly::zero(), &a));
    assert_eq!(Gf2Poly::zero(), gcd(&Gf2Poly::zero(), &Gf2Poly::zero()));
    assert_eq!(Gf2Poly::one(), gcd(&Gf2Poly::one(), &Gf2Poly::zero()));
    assert_eq!(Gf2Poly::one(), gcd(&Gf2Poly::zero(), &Gf2Poly::one()));
}

#[test]
fn test_gcd_divides_random() {
    let mut rng = oorandom::Rand64::new(4);
    for _ in 0..50 {
        let common = Gf2Poly::from_coefficients((0..rng.rand_range(1..40)).map(|_| rng.rand_u64())) + Gf2Poly::monomial(40);
        let a = Gf2Poly::from_coefficients((0..rng.rand_range(0..100)).map(|_| rng.rand_u64())) * &common;
        let b = Gf2Poly::from_coefficients((0..rng.rand_range(0..100)).map(|_| rng.rand_u64())) * &common;
        let g = gcd(&a, &b);
        assert!(g.divides(&a));
        assert!(g.divides(&b));
        assert!(common.divides(&g));
        assert_eq!(g, gcd(&b, &a));
    }
}

#[test]
fn test_eea() {
    let mut rng = oorandom::Rand64::new(5);
    for _ in 0..50 {
        let a = Gf2Poly::from_coefficients((0..rng.rand_range(0..100)).map(|_| rng.rand_u64()));
        let b = Gf2Poly::from_coefficients((0..rng.rand_range(0..100)).map(|_| rng.rand_u64()));
        let (s, t, d) = eea(&a, &b);
        assert_eq!(gcd(&a, &b), d);
        assert_eq!(d, s * &a + t * &b);
    }
}

#[test]
fn test_lcm() {
    let a = Gf2Poly::from_hex("c").unwrap();
    let b = Gf2Poly::from_hex("6").unwrap();
    assert_eq!(a, lcm(&a, &b));
    assert_eq!(Gf2Poly::zero(), lcm(&a, &Gf2Poly::zero()));
    let c = Gf2Poly::from_hex("7").unwrap();
    assert_eq!(&a * &c, lcm(&a, &c));
}
