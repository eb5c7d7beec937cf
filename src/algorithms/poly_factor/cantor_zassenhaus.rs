use tracing::instrument;

use crate::algorithms::eea::gcd;
use crate::algorithms::poly_factor::{FactorError, FactorOptions};
use crate::poly::{Gf2Poly, LIMB_BITS};

///
/// Draws a uniformly random polynomial of degree `< n`.
///
fn random_poly_below<R>(n: usize, rng: &mut R) -> Gf2Poly
    where R: FnMut() -> u64
{
    let mut limbs = (0..n.div_ceil(LIMB_BITS)).map(|_| rng()).collect::<Vec<_>>();
    if n % LIMB_BITS != 0 {
        if let Some(last) = limbs.last_mut() {
            *last &= (1 << (n % LIMB_BITS)) - 1;
        }
    }
    return Gf2Poly::from_limbs(limbs);
}

///
/// Computes `h + h^2 + h^4 + ... + h^(2^(d - 1)) mod f`, or `None` if `h` is divisible by `f`.
///
/// If `f` has only irreducible factors of degree `d`, then modulo each of these factors,
/// this is the trace of `h` from `GF(2^d)` to `GF(2)`, and so either `0` or `1`.
///
fn trace_poly(h: &Gf2Poly, d: usize, f: &Gf2Poly) -> Option<Gf2Poly> {
    let mut term = h.rem_ref(f);
    if term.is_zero() {
        return None;
    }
    let mut result = term.clone();
    for _ in 1..d {
        term = term.square_mod(f);
        if term.is_zero() {
            return None;
        }
        result += &term;
    }
    return Some(result);
}

///
/// Uses the Cantor-Zassenhaus algorithm to find all irreducible factors of a polynomial `f`,
/// that is square-free and consists only of irreducible factors of degree `d`.
///
/// # Algorithm
///
/// For a random polynomial `h`, consider the trace-like polynomial
/// ```text
/// T = h + h^2 + h^4 + ... + h^(2^(d - 1)) mod f
/// ```
/// Modulo each irreducible factor `p` of `f`, the residue of `T` is the trace of `h mod p`
/// in `GF(2)[X]/(p) = GF(2^d)`, thus either `0` or `1`. Moreover, for uniformly random `h`, the
/// residues modulo the different factors are independent and uniform. Hence `gcd(T, u)` is,
/// for every product `u` of at least two of the factors, a nontrivial factor of `u` with
/// probability at least `1/2`. We repeat this, refining a list of candidate factors, until
/// it contains `deg(f) / d` entries.
///
/// The random polynomials are built from the values returned by `rng`, which makes the
/// result reproducible when `rng` is seeded. If `options.max_trials` is set and no complete
/// factorization is found within this number of random polynomials, an error is returned.
/// This can only happen for unlucky choices, or if `f` does not satisfy the requirements.
///
/// # Example
/// ```
/// # use gf2_math::poly::*;
/// # use gf2_math::algorithms::poly_factor::*;
/// // X^3 + X + 1 and X^3 + X^2 + 1
/// let f = Gf2Poly::from_hex("b").unwrap();
/// let g = Gf2Poly::from_hex("d").unwrap();
/// let mut rng = oorandom::Rand64::new(1);
/// let mut factors = equal_degree_factorization(&(&f * &g), 3, || rng.rand_u64(), &FactorOptions::default()).unwrap();
/// factors.sort();
/// assert_eq!(vec![f, g], factors);
/// ```
///
#[instrument(skip_all, level = "trace")]
pub fn equal_degree_factorization<R>(f: &Gf2Poly, d: usize, mut rng: R, options: &FactorOptions) -> Result<Vec<Gf2Poly>, FactorError>
    where R: FnMut() -> u64
{
    let Some(n) = f.checked_degree() else {
        return Err(FactorError::ZeroPolynomial);
    };
    if d == 0 || n == 0 || n % d != 0 {
        return Err(FactorError::DegreeMismatch { degree: n, factor_degree: d });
    }
    let factor_count = n / d;
    let mut factors = vec![f.clone()];
    let mut trials = 0;

    while factors.len() < factor_count {
        if options.max_trials.is_some_and(|max_trials| trials >= max_trials) {
            tracing::debug!(trials, found = factors.len(), expected = factor_count, "giving up equal-degree factorization");
            return Err(FactorError::TrialLimitExceeded { trials });
        }
        trials += 1;

        let h = random_poly_below(n, &mut rng);
        let Some(t) = trace_poly(&h, d, f) else {
            continue;
        };
        if t.is_zero() {
            continue;
        }
        for i in 0..factors.len() {
            if factors[i].degree() <= d {
                continue;
            }
            let split = gcd(&t, &factors[i]);
            if !split.is_one() && split != factors[i] {
                let cofactor = factors[i].div_ref(&split);
                tracing::trace!(trial = trials, left = split.degree(), right = cofactor.degree(), "split candidate factor");
                factors[i] = split;
                factors.push(cofactor);
            }
        }
    }
    tracing::debug!(trials, factors = factor_count, degree = d, "finished equal-degree factorization");
    debug_assert!(factors.iter().all(|factor| factor.degree() == d));
    return Ok(factors);
}

#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;
#[cfg(test)]
use crate::algorithms::poly_factor::distinct_degree::is_irreducible;

#[test]
fn test_equal_degree_factorization() {
    LogAlgorithmSubscriber::init_test();
    let mut rng = oorandom::Rand64::new(1);
    let f = Gf2Poly::from_hex("b").unwrap();
    let g = Gf2Poly::from_hex("d").unwrap();
    let mut factors = equal_degree_factorization(&(&f * &g), 3, || rng.rand_u64(), &FactorOptions::default()).unwrap();
    factors.sort();
    assert_eq!(vec![f, g], factors);
}

#[test]
fn test_equal_degree_factorization_linear() {
    LogAlgorithmSubscriber::init_test();
    let mut rng = oorandom::Rand64::new(2);
    let f = Gf2Poly::from_hex("6").unwrap();
    let mut factors = equal_degree_factorization(&f, 1, || rng.rand_u64(), &FactorOptions::default()).unwrap();
    factors.sort();
    assert_eq!(vec![Gf2Poly::x(), Gf2Poly::from_hex("3").unwrap()], factors);
}

#[test]
fn test_equal_degree_factorization_many_factors() {
    LogAlgorithmSubscriber::init_test();
    // all irreducible polynomials of degree 5 over GF(2)
    let irreducibles = ["25", "29", "2f", "37", "3b", "3d"].map(|hex| Gf2Poly::from_hex(hex).unwrap());
    let f = irreducibles.iter().product::<Gf2Poly>();
    for seed in 0..5 {
        let mut rng = oorandom::Rand64::new(seed);
        let mut factors = equal_degree_factorization(&f, 5, || rng.rand_u64(), &FactorOptions { max_trials: Some(1000) }).unwrap();
        factors.sort();
        assert_eq!(irreducibles.to_vec(), factors);
        assert!(factors.iter().all(is_irreducible));
    }
}

#[test]
fn test_equal_degree_factorization_reproducible() {
    let f = ["25", "29", "2f", "37"].map(|hex| Gf2Poly::from_hex(hex).unwrap()).iter().product::<Gf2Poly>();
    let mut rng1 = oorandom::Rand64::new(42);
    let mut rng2 = oorandom::Rand64::new(42);
    assert_eq!(
        equal_degree_factorization(&f, 5, || rng1.rand_u64(), &FactorOptions::default()),
        equal_degree_factorization(&f, 5, || rng2.rand_u64(), &FactorOptions::default())
    );
}

#[test]
fn test_equal_degree_factorization_irreducible() {
    let f = Gf2Poly::from_hex("11b").unwrap();
    let result = equal_degree_factorization(&f, 8, || panic!("no randomness required"), &FactorOptions::default());
    assert_eq!(Ok(vec![f]), result);
}

#[test]
fn test_equal_degree_factorization_errors() {
    let mut rng = oorandom::Rand64::new(3);
    let f = Gf2Poly::from_hex("b").unwrap() * Gf2Poly::from_hex("d").unwrap();
    assert_eq!(Err(FactorError::ZeroPolynomial), equal_degree_factorization(&Gf2Poly::zero(), 3, || rng.rand_u64(), &FactorOptions::default()));
    assert_eq!(Err(FactorError::DegreeMismatch { degree: 6, factor_degree: 4 }), equal_degree_factorization(&f, 4, || rng.rand_u64(), &FactorOptions::default()));
    assert_eq!(Err(FactorError::DegreeMismatch { degree: 6, factor_degree: 0 }), equal_degree_factorization(&f, 0, || rng.rand_u64(), &FactorOptions::default()));
    assert_eq!(Err(FactorError::DegreeMismatch { degree: 0, factor_degree: 1 }), equal_degree_factorization(&Gf2Poly::one(), 1, || rng.rand_u64(), &FactorOptions::default()));
}

#[test]
fn test_equal_degree_factorization_trial_limit() {
    // a product of two irreducible cubics never splits into three factors of degree 2
    let f = Gf2Poly::from_hex("b").unwrap() * Gf2Poly::from_hex("d").unwrap();
    let mut rng = oorandom::Rand64::new(4);
    let options = FactorOptions { max_trials: Some(20) };
    assert_eq!(Err(FactorError::TrialLimitExceeded { trials: 20 }), equal_degree_factorization(&f, 2, || rng.rand_u64(), &options));
}
