use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::algorithms::poly_squarefree::square_free_decomposition;
use crate::poly::Gf2Poly;

pub mod distinct_degree;
pub mod cantor_zassenhaus;

pub use distinct_degree::{distinct_degree_factorization, is_irreducible, DistinctDegreeFactor};
pub use cantor_zassenhaus::equal_degree_factorization;

///
/// Options for the randomized parts of the factorization.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FactorOptions {
    /// Maximal number of random polynomials tried during equal-degree factorization, before
    /// giving up with [`FactorError::TrialLimitExceeded`]. `None` means no limit.
    pub max_trials: Option<usize>
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FactorError {
    #[error("cannot factor the zero polynomial")]
    ZeroPolynomial,
    #[error("degree {degree} is not a positive multiple of the factor degree {factor_degree}")]
    DegreeMismatch { degree: usize, factor_degree: usize },
    #[error("no complete factorization found after {trials} random trials")]
    TrialLimitExceeded { trials: usize }
}

///
/// Factors `f` into irreducible polynomials, returning each irreducible factor together
/// with its multiplicity. The factors are sorted w.r.t. the ordering of [`Gf2Poly`], i.e.
/// by degree first. A constant `f` gives an empty result.
///
/// This runs square-free decomposition, distinct-degree factorization and equal-degree
/// factorization one after another. The randomness for the last step comes from `rng`.
///
#[instrument(skip_all, level = "trace")]
pub fn factor_with<R>(f: &Gf2Poly, mut rng: R, options: &FactorOptions) -> Result<Vec<(Gf2Poly, usize)>, FactorError>
    where R: FnMut() -> u64
{
    if f.is_zero() {
        return Err(FactorError::ZeroPolynomial);
    }
    let mut result = Vec::new();
    for (part, multiplicity) in square_free_decomposition(f) {
        for DistinctDegreeFactor { factor, degree } in distinct_degree_factorization(&part) {
            if factor.is_one() {
                continue;
            }
            for irreducible in equal_degree_factorization(&factor, degree, &mut rng, options)? {
                result.push((irreducible, multiplicity));
            }
        }
    }
    result.sort();
    tracing::debug!(degree = f.degree(), factors = result.len(), "factored polynomial");
    return Ok(result);
}

///
/// Factors `f` into irreducible polynomials, as in [`factor_with()`]. The randomness is
/// seeded from `f`, so the result is deterministic.
///
/// # Example
/// ```
/// # use gf2_math::poly::*;
/// # use gf2_math::algorithms::poly_factor::*;
/// // X^3 + X^2 = X^2 (X + 1)
/// let f = Gf2Poly::from_hex("c").unwrap();
/// assert_eq!(vec![(Gf2Poly::x(), 2), (Gf2Poly::from_hex("3").unwrap(), 1)], factor(&f).unwrap());
/// ```
///
pub fn factor(f: &Gf2Poly) -> Result<Vec<(Gf2Poly, usize)>, FactorError> {
    let mut hasher = DefaultHasher::new();
    f.hash(&mut hasher);
    let mut rng = oorandom::Rand64::new(hasher.finish() as u128);
    return factor_with(f, || rng.rand_u64(), &FactorOptions::default());
}

#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;

#[cfg(test)]
fn assert_is_factorization(f: &Gf2Poly, factorization: &[(Gf2Poly, usize)]) {
    assert_eq!(*f, factorization.iter().map(|(p, e)| p.pow(*e as u64)).product::<Gf2Poly>());
    assert!(factorization.iter().all(|(p, _)| is_irreducible(p)));
    assert!(factorization.windows(2).all(|w| w[0].0 < w[1].0));
}

#[test]
fn test_factor() {
    LogAlgorithmSubscriber::init_test();
    let a = Gf2Poly::from_hex("7").unwrap();
    let b = Gf2Poly::from_hex("b").unwrap();
    let c = Gf2Poly::from_hex("d").unwrap();
    let d = Gf2Poly::from_hex("11b").unwrap();
    let f = Gf2Poly::x().pow(3) * &a * b.pow(2) * &c * d.pow(4);
    let expected = vec![(Gf2Poly::x(), 3), (a, 1), (b, 2), (c, 1), (d, 4)];
    assert_eq!(expected, factor(&f).unwrap());
}

#[test]
fn test_factor_large() {
    LogAlgorithmSubscriber::init_test();
    let f = Gf2Poly::from_hex("6677e20146508fb7").unwrap();
    let factorization = factor(&f).unwrap();
    assert_is_factorization(&f, &factorization);

    let g = Gf2Poly::from_hex("b0c152f9").unwrap() * Gf2Poly::from_hex("ebf2831f").unwrap();
    let factorization = factor(&g).unwrap();
    assert_is_factorization(&g, &factorization);
}

#[test]
fn test_factor_random() {
    LogAlgorithmSubscriber::init_test();
    let mut rng = oorandom::Rand64::new(8);
    for _ in 0..20 {
        let f = Gf2Poly::from_coefficients((0..rng.rand_range(1..100)).map(|_| rng.rand_u64())) + Gf2Poly::monomial(100);
        let factorization = factor_with(&f, || rng.rand_u64(), &FactorOptions { max_trials: Some(10000) }).unwrap();
        assert_is_factorization(&f, &factorization);
    }
}

#[test]
fn test_factor_trivial() {
    assert_eq!(Ok(Vec::new()), factor(&Gf2Poly::one()));
    assert_eq!(Err(FactorError::ZeroPolynomial), factor(&Gf2Poly::zero()));
    assert_eq!(Ok(vec![(Gf2Poly::x(), 1)]), factor(&Gf2Poly::x()));
}

#[test]
fn test_factor_is_deterministic() {
    let f = Gf2Poly::from_hex("a466cfdc").unwrap();
    assert_eq!(factor(&f), factor(&f));
}

#[test]
fn test_factor_options_serialization() {
    let options = FactorOptions { max_trials: Some(64) };
    let json = serde_json::to_string(&options).unwrap();
    assert_eq!("{\"max_trials\":64}", json);
    assert_eq!(options, serde_json::from_str::<FactorOptions>(&json).unwrap());
    assert_eq!(FactorOptions::default(), serde_json::from_str::<FactorOptions>("{\"max_trials\":null}").unwrap());
}

#[test]
fn test_factor_error_display() {
    assert_eq!("cannot factor the zero polynomial", FactorError::ZeroPolynomial.to_string());
    assert_eq!("no complete factorization found after 7 random trials", FactorError::TrialLimitExceeded { trials: 7 }.to_string());
}
