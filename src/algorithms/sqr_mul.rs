use crate::poly::Gf2Poly;

///
/// Computes `base^power` by left-to-right square-and-multiply, given functions
/// for squaring and for multiplying by `base`.
///
pub fn generic_square_and_multiply<T, U, F, H>(base: &U, power: u64, mut square: F, mut multiply_base: H, identity: T) -> T
    where F: FnMut(T) -> T,
        H: FnMut(&U, T) -> T
{
    if power == 0 {
        return identity;
    } else if power == 1 {
        return multiply_base(base, identity);
    }

    let mut result = identity;
    for i in (0..=(u64::BITS - 1 - power.leading_zeros())).rev() {
        if (power >> i) & 1 == 1 {
            result = multiply_base(base, square(result));
        } else {
            result = square(result);
        }
    }
    return result;
}

///
/// Computes `g^power mod f`.
///
pub fn pow_mod(g: &Gf2Poly, power: u64, f: &Gf2Poly) -> Gf2Poly {
    assert!(!f.is_zero(), "cannot reduce modulo the zero polynomial");
    let g = g.rem_ref(f);
    return generic_square_and_multiply(
        &g,
        power,
        |a| a.square_mod(f),
        |base, a| base.mul_mod(&a, f),
        Gf2Poly::one().rem_ref(f)
    );
}

///
/// Computes `g^(2^k) mod f`, by `k` repeated squarings in `GF(2)[X]/(f)`.
///
pub fn frobenius_mod(g: &Gf2Poly, k: usize, f: &Gf2Poly) -> Gf2Poly {
    assert!(!f.is_zero(), "cannot reduce modulo the zero polynomial");
    let mut result = g.rem_ref(f);
    for _ in 0..k {
        result = result.square_mod(f);
    }
    return result;
}

#[test]
fn test_pow() {
    assert_eq!(3 * 3, generic_square_and_multiply(&3, 2, |a| a * a, |a, b| *a * b, 1));
    assert_eq!(3 * 3 * 3 * 3 * 3, generic_square_and_multiply(&3, 5, |a| a * a, |a, b| *a * b, 1));
    assert_eq!(1, generic_square_and_multiply(&3, 0, |a| a * a, |a, b| *a * b, 1));
}

#[test]
fn test_pow_mod() {
    let f = Gf2Poly::from_hex("13").unwrap();
    let g = Gf2Poly::from_hex("a466cfdc").unwrap();
    assert_eq!(g.pow(7).rem_ref(&f), pow_mod(&g, 7, &f));
    assert_eq!(Gf2Poly::one(), pow_mod(&g, 0, &f));
    assert_eq!(Gf2Poly::zero(), pow_mod(&g, 3, &Gf2Poly::one()));
    // X^4 + X + 1 is primitive, so X has order 15
    assert_eq!(Gf2Poly::one(), pow_mod(&Gf2Poly::x(), 15, &f));
    assert_ne!(Gf2Poly::one(), pow_mod(&Gf2Poly::x(), 5, &f));
}

#[test]
fn test_frobenius_mod() {
    let f = Gf2Poly::from_hex("13").unwrap();
    assert_eq!(Gf2Poly::x(), frobenius_mod(&Gf2Poly::x(), 4, &f));
    assert_eq!(pow_mod(&Gf2Poly::x(), 8, &f), frobenius_mod(&Gf2Poly::x(), 3, &f));
}
