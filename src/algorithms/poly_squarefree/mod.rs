use tracing::instrument;

use crate::algorithms::eea::gcd;
use crate::poly::Gf2Poly;

///
/// Appends the square-free decomposition of `f` to `out`, with all multiplicities
/// scaled by `multiplicity_multiplier`.
///
fn square_free_decomposition_impl(f: &Gf2Poly, multiplicity_multiplier: usize, out: &mut Vec<(Gf2Poly, usize)>) {
    debug_assert!(!f.is_zero());
    // `repeated` has all multiplicities of f reduced by one, except for those divisible by 2,
    // which stay the same since their derivative vanishes
    let mut repeated = gcd(f, &f.derivative());
    let mut squarefree = f.div_ref(&repeated);
    let mut multiplicity = 1;
    while !squarefree.is_one() {
        let higher_multiplicity = gcd(&squarefree, &repeated);
        let factor = squarefree.div_ref(&higher_multiplicity);
        if !factor.is_one() {
            out.push((factor, multiplicity * multiplicity_multiplier));
        }
        repeated = repeated.div_ref(&higher_multiplicity);
        squarefree = higher_multiplicity;
        multiplicity += 1;
    }
    // what remains only has factors with multiplicity divisible by 2, so it is a square
    if !repeated.is_one() {
        tracing::trace!(degree = repeated.degree(), "recursing into square part");
        square_free_decomposition_impl(&repeated.sqrt(), 2 * multiplicity_multiplier, out);
    }
}

///
/// Computes the square-free decomposition of `f`, i.e. pairs `(f_i, e_i)` such that the
/// `f_i` are square-free, pairwise coprime and nonconstant, and `f = prod_i f_i^e_i`.
/// Within the part of the decomposition computed from `f` directly, the multiplicities
/// are increasing; the factors found in its square part follow afterwards. For a constant
/// `f`, the result is empty.
///
/// # Panics
///
/// Panics if `f` is zero.
///
#[instrument(skip_all, level = "trace")]
pub fn square_free_decomposition(f: &Gf2Poly) -> Vec<(Gf2Poly, usize)> {
    assert!(!f.is_zero(), "cannot compute the square-free decomposition of zero");
    let mut result = Vec::new();
    square_free_decomposition_impl(f, 1, &mut result);
    return result;
}

///
/// Computes the square-free factorization of `f`, returned as polynomials `f_i^e_i`
/// whose product is `f`, where `f_i` is the product of all irreducible factors of `f`
/// of multiplicity exactly `e_i`. Trivial factors `1` are not included, so a constant
/// `f` gives an empty list.
///
/// # Example
/// ```
/// # use gf2_math::poly::*;
/// # use gf2_math::algorithms::poly_squarefree::*;
/// // X^3 + X^2 = (X + 1) X^2
/// let f = Gf2Poly::from_hex("c").unwrap();
/// let factors = square_free_factorization(&f);
/// assert_eq!(vec![Gf2Poly::from_hex("3").unwrap(), Gf2Poly::from_hex("4").unwrap()], factors);
/// ```
///
pub fn square_free_factorization(f: &Gf2Poly) -> Vec<Gf2Poly> {
    square_free_decomposition(f).into_iter()
        .map(|(factor, multiplicity)| factor.pow(multiplicity as u64))
        .collect()
}

///
/// Computes the square-free part of `f`, i.e. the greatest (w.r.t. divisibility) square-free
/// polynomial `g | f`.
///
pub fn squarefree_part(f: &Gf2Poly) -> Gf2Poly {
    square_free_decomposition(f).into_iter().map(|(factor, _)| factor).product()
}

///
/// Returns whether `f` has no repeated irreducible factors. Constants are square-free, the
/// zero polynomial is not.
///
pub fn is_squarefree(f: &Gf2Poly) -> bool {
    !f.is_zero() && gcd(f, &f.derivative()).is_one()
}

#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;

#[test]
fn test_square_free_factorization() {
    LogAlgorithmSubscriber::init_test();
    let g = Gf2Poly::from_hex("c").unwrap();
    let factors = square_free_factorization(&g);
    assert_eq!(2, factors.len());
    assert_eq!(g.to_hex(), factors.iter().product::<Gf2Poly>().to_hex());
}

#[test]
fn test_square_free_decomposition() {
    LogAlgorithmSubscriber::init_test();
    let a = Gf2Poly::from_hex("7").unwrap();
    let b = Gf2Poly::from_hex("b").unwrap();
    let c = Gf2Poly::from_hex("13").unwrap();
    let d = Gf2Poly::x();
    let f = &a * b.pow(2) * c.pow(3) * d.pow(4);
    let decomposition = square_free_decomposition(&f);
    assert_eq!(vec![(a.clone(), 1), (c.clone(), 3), (b.clone(), 2), (d.clone(), 4)], decomposition);
    assert_eq!(f, square_free_factorization(&f).into_iter().product::<Gf2Poly>());
    assert_eq!(&a * &b * &c * &d, squarefree_part(&f));
}

#[test]
fn test_square_free_factorization_of_square() {
    let g = Gf2Poly::from_hex("a466cfdc").unwrap().pow(4);
    assert_eq!(g, square_free_factorization(&g).into_iter().product::<Gf2Poly>());
    assert!(square_free_decomposition(&g).iter().all(|(_, e)| e % 4 == 0));
}

#[test]
fn test_square_free_factorization_constant() {
    assert!(square_free_factorization(&Gf2Poly::one()).is_empty());
    assert!(square_free_decomposition(&Gf2Poly::one()).is_empty());
    assert_eq!(Gf2Poly::one(), squarefree_part(&Gf2Poly::one()));
}

#[test]
fn test_square_free_reconstruction_random() {
    let mut rng = oorandom::Rand64::new(6);
    for _ in 0..30 {
        let parts = (0..4).map(|_| Gf2Poly::from_coefficients((0..rng.rand_range(1..12)).map(|_| rng.rand_u64())) + Gf2Poly::monomial(12));
        let f = parts.enumerate().map(|(i, p)| p.pow(i as u64 + 1)).product::<Gf2Poly>();
        let factors = square_free_factorization(&f);
        assert_eq!(f, factors.iter().product::<Gf2Poly>());
        for (factor, _) in square_free_decomposition(&f) {
            assert!(is_squarefree(&factor));
        }
    }
}

#[test]
fn test_is_squarefree() {
    assert!(is_squarefree(&Gf2Poly::one()));
    assert!(is_squarefree(&Gf2Poly::from_hex("6").unwrap()));
    assert!(!is_squarefree(&Gf2Poly::from_hex("c").unwrap()));
    assert!(!is_squarefree(&Gf2Poly::from_hex("5").unwrap()));
    assert!(!is_squarefree(&Gf2Poly::zero()));
}

#[test]
#[should_panic]
fn test_square_free_factorization_zero() {
    square_free_factorization(&Gf2Poly::zero());
}
