use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::algorithms::eea::gcd;
use crate::algorithms::poly_squarefree::is_squarefree;
use crate::poly::Gf2Poly;

///
/// A factor of a square-free polynomial that is the product of all its irreducible
/// factors of the given degree.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DistinctDegreeFactor {
    pub factor: Gf2Poly,
    pub degree: usize
}

///
/// Computes the distinct-degree factorization of a square-free polynomial `f`, i.e. groups
/// its irreducible factors by their degree. Each returned entry contains the product of all
/// irreducible factors of `f` of degree `degree`, and the product of all entries is `f`.
///
/// The product of all irreducible polynomials whose degree divides `i` is `X^(2^i) - X`. Hence,
/// once all factors of degree `< i` have been removed, `gcd(f, X^(2^i) - X)` is the product of
/// the degree-`i` factors. As soon as the remaining part has degree `< 2i`, it must itself be
/// irreducible.
///
/// If `f` is constant, this returns `[(f, 1)]`.
///
/// # Panics
///
/// Panics if `f` is zero.
///
#[instrument(skip_all, level = "trace")]
pub fn distinct_degree_factorization(f: &Gf2Poly) -> Vec<DistinctDegreeFactor> {
    assert!(!f.is_zero(), "cannot factor the zero polynomial");

    let mut result = Vec::new();
    let mut remaining = f.clone();
    // X^(2^i) mod remaining; X^(2^i) itself would be far too large
    let mut x_power_mod_f = Gf2Poly::x();
    let mut i = 1;
    while remaining.degree() >= 2 * i {
        x_power_mod_f = x_power_mod_f.square_mod(&remaining);
        let deg_i_factor = gcd(&remaining, &(&x_power_mod_f + Gf2Poly::x()));
        if !deg_i_factor.is_one() {
            tracing::debug!(degree = i, factor_degree = deg_i_factor.degree(), "found distinct-degree factor");
            remaining = remaining.div_ref(&deg_i_factor);
            x_power_mod_f = x_power_mod_f.rem_ref(&remaining);
            result.push(DistinctDegreeFactor { factor: deg_i_factor, degree: i });
        }
        i += 1;
    }
    if !remaining.is_one() {
        let degree = remaining.degree();
        result.push(DistinctDegreeFactor { factor: remaining, degree });
    }
    if result.is_empty() {
        result.push(DistinctDegreeFactor { factor: f.clone(), degree: 1 });
    }
    return result;
}

///
/// Returns whether `f` is irreducible, i.e. nonconstant and not the product of two
/// nonconstant polynomials.
///
pub fn is_irreducible(f: &Gf2Poly) -> bool {
    if f.checked_degree().map_or(true, |d| d == 0) || !is_squarefree(f) {
        return false;
    }
    let factorization = distinct_degree_factorization(f);
    return factorization.len() == 1 && factorization[0].degree == f.degree();
}

#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;

#[test]
fn test_distinct_degree_factorization() {
    LogAlgorithmSubscriber::init_test();
    let a1 = Gf2Poly::x() * Gf2Poly::from_coefficients([1, 1]);
    let a2 = Gf2Poly::from_coefficients([1, 1, 1]);
    let a3 = Gf2Poly::from_coefficients([1, 1, 0, 1]) * Gf2Poly::from_coefficients([1, 0, 1, 1]);
    let a = &a1 * &a2 * &a3;
    let expected = vec![
        DistinctDegreeFactor { factor: a1, degree: 1 },
        DistinctDegreeFactor { factor: a2, degree: 2 },
        DistinctDegreeFactor { factor: a3, degree: 3 }
    ];
    assert_eq!(expected, distinct_degree_factorization(&a));
}

#[test]
fn test_distinct_degree_factorization_not_squarefree() {
    LogAlgorithmSubscriber::init_test();
    // X^2 (X + 1)^3 (X^3 + X^2 + 1); the result still multiplies to the input
    let g = Gf2Poly::from_coefficients([0, 0, 1, 1, 0, 1, 0, 0, 1]);
    let factorization = distinct_degree_factorization(&g);
    assert_eq!(g, factorization.iter().map(|entry| &entry.factor).product::<Gf2Poly>());
    assert_eq!(3, factorization.len());
}

#[test]
fn test_distinct_degree_factorization_irreducible() {
    let f = Gf2Poly::from_hex("11b").unwrap();
    assert_eq!(vec![DistinctDegreeFactor { factor: f.clone(), degree: 8 }], distinct_degree_factorization(&f));
    let f = Gf2Poly::x();
    assert_eq!(vec![DistinctDegreeFactor { factor: f.clone(), degree: 1 }], distinct_degree_factorization(&f));
}

#[test]
fn test_distinct_degree_factorization_constant() {
    assert_eq!(vec![DistinctDegreeFactor { factor: Gf2Poly::one(), degree: 1 }], distinct_degree_factorization(&Gf2Poly::one()));
}

#[test]
fn test_distinct_degree_reconstruction_random() {
    let mut rng = oorandom::Rand64::new(7);
    for _ in 0..30 {
        let f = Gf2Poly::from_coefficients((0..rng.rand_range(2..80)).map(|_| rng.rand_u64())) + Gf2Poly::monomial(80);
        if !is_squarefree(&f) {
            continue;
        }
        let factorization = distinct_degree_factorization(&f);
        assert_eq!(f, factorization.iter().map(|entry| &entry.factor).product::<Gf2Poly>());
        for entry in &factorization {
            assert_eq!(0, entry.factor.degree() % entry.degree);
        }
    }
}

#[test]
fn test_is_irreducible() {
    assert!(is_irreducible(&Gf2Poly::x()));
    assert!(is_irreducible(&Gf2Poly::from_hex("3").unwrap()));
    assert!(is_irreducible(&Gf2Poly::from_hex("7").unwrap()));
    assert!(is_irreducible(&Gf2Poly::from_hex("11b").unwrap()));
    assert!(is_irreducible(&Gf2Poly::from_hex("13").unwrap()));
    assert!(!is_irreducible(&Gf2Poly::from_hex("5").unwrap()));
    assert!(!is_irreducible(&Gf2Poly::from_hex("15").unwrap()));
    assert!(!is_irreducible(&Gf2Poly::one()));
    assert!(!is_irreducible(&Gf2Poly::zero()));
}

#[test]
fn test_serialize_distinct_degree_factor() {
    let entry = DistinctDegreeFactor { factor: Gf2Poly::from_hex("7").unwrap(), degree: 2 };
    let json = serde_json::to_string(&entry).unwrap();
    assert_eq!("{\"factor\":\"7\",\"degree\":2}", json);
    assert_eq!(entry, serde_json::from_str::<DistinctDegreeFactor>(&json).unwrap());
}
