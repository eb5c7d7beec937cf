use std::ops::{Div, DivAssign, Rem, RemAssign};

use tracing::instrument;

use crate::poly::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("attempted to divide by the zero polynomial")]
pub struct DivisionByZeroError;

///
/// Reduces `lhs` modulo the nonzero polynomial with limbs `rhs` and degree `rhs_deg`, by
/// repeatedly cancelling the leading term of `lhs`. If `quotient` is given, the bit
/// `X^(deg(lhs) - rhs_deg)` is set for every cancelled term.
///
fn reduce_in_place(lhs: &mut Vec<u64>, rhs: &[u64], rhs_deg: usize, mut quotient: Option<&mut Vec<u64>>) {
    while let Some(lhs_deg) = highest_set_bit(lhs) {
        if lhs_deg < rhs_deg {
            break;
        }
        let shift = lhs_deg - rhs_deg;
        if let Some(quotient) = quotient.as_deref_mut() {
            quotient[shift / LIMB_BITS] |= 1 << (shift % LIMB_BITS);
        }
        xor_shifted_into(lhs, rhs, shift);
        trim(lhs);
    }
}

impl Gf2Poly {

    ///
    /// Computes the polynomial division of `self` by `rhs`, i.e. `(q, r)` such that
    /// `self = q * rhs + r` and `r = 0` or `deg(r) < deg(rhs)`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero. See [`Gf2Poly::checked_div_rem()`] for a non-panicking version.
    ///
    /// # Example
    /// ```
    /// # use gf2_math::poly::*;
    /// let a = Gf2Poly::from_coefficients([0, 0, 0, 1, 1]);
    /// let b = Gf2Poly::from_coefficients([0, 0, 1]);
    /// let (q, r) = a.div_rem(&b);
    /// assert_eq!(Gf2Poly::from_coefficients([0, 1, 1]), q);
    /// assert!(r.is_zero());
    /// ```
    ///
    #[instrument(skip_all, level = "trace")]
    pub fn div_rem(&self, rhs: &Gf2Poly) -> (Gf2Poly, Gf2Poly) {
        assert!(!rhs.is_zero(), "attempted to divide by the zero polynomial");
        let rhs_deg = rhs.degree();
        let quotient_len = match self.checked_degree() {
            Some(lhs_deg) if lhs_deg >= rhs_deg => lhs_deg - rhs_deg + 1,
            _ => 1
        };
        let mut quotient = vec![0; quotient_len.div_ceil(LIMB_BITS)];
        let mut remainder = self.limbs().to_vec();
        reduce_in_place(&mut remainder, rhs.limbs(), rhs_deg, Some(&mut quotient));
        return (Gf2Poly::from_limbs(quotient), Gf2Poly::from_limbs(remainder));
    }

    pub fn checked_div_rem(&self, rhs: &Gf2Poly) -> Result<(Gf2Poly, Gf2Poly), DivisionByZeroError> {
        if rhs.is_zero() {
            return Err(DivisionByZeroError);
        }
        return Ok(self.div_rem(rhs));
    }

    ///
    /// Returns the quotient of the polynomial division of `self` by `rhs`.
    /// Panics if `rhs` is zero.
    ///
    pub fn div_ref(&self, rhs: &Gf2Poly) -> Gf2Poly {
        self.div_rem(rhs).0
    }

    ///
    /// Returns the remainder of the polynomial division of `self` by `rhs`.
    /// Panics if `rhs` is zero.
    ///
    /// As opposed to [`Gf2Poly::div_rem()`], this does not build the quotient.
    ///
    pub fn rem_ref(&self, rhs: &Gf2Poly) -> Gf2Poly {
        assert!(!rhs.is_zero(), "attempted to divide by the zero polynomial");
        let mut remainder = self.limbs().to_vec();
        reduce_in_place(&mut remainder, rhs.limbs(), rhs.degree(), None);
        return Gf2Poly::from_limbs(remainder);
    }

    pub fn checked_div(&self, rhs: &Gf2Poly) -> Result<Gf2Poly, DivisionByZeroError> {
        self.checked_div_rem(rhs).map(|(q, _)| q)
    }

    pub fn checked_rem(&self, rhs: &Gf2Poly) -> Result<Gf2Poly, DivisionByZeroError> {
        if rhs.is_zero() {
            return Err(DivisionByZeroError);
        }
        return Ok(self.rem_ref(rhs));
    }

    ///
    /// Returns whether `self` divides `other`. The zero polynomial only divides itself.
    ///
    pub fn divides(&self, other: &Gf2Poly) -> bool {
        if self.is_zero() {
            other.is_zero()
        } else {
            other.rem_ref(self).is_zero()
        }
    }

    /// Computes `self * rhs mod modulus`.
    pub fn mul_mod(&self, rhs: &Gf2Poly, modulus: &Gf2Poly) -> Gf2Poly {
        self.mul_ref(rhs).rem_ref(modulus)
    }

    /// Computes `self^2 mod modulus`.
    pub fn square_mod(&self, modulus: &Gf2Poly) -> Gf2Poly {
        self.square().rem_ref(modulus)
    }
}

impl Div<&Gf2Poly> for &Gf2Poly {
    type Output = Gf2Poly;

    fn div(self, rhs: &Gf2Poly) -> Gf2Poly {
        self.div_ref(rhs)
    }
}

impl Div<Gf2Poly> for Gf2Poly {
    type Output = Gf2Poly;

    fn div(self, rhs: Gf2Poly) -> Gf2Poly {
        self.div_ref(&rhs)
    }
}

impl Div<&Gf2Poly> for Gf2Poly {
    type Output = Gf2Poly;

    fn div(self, rhs: &Gf2Poly) -> Gf2Poly {
        self.div_ref(rhs)
    }
}

impl Rem<&Gf2Poly> for &Gf2Poly {
    type Output = Gf2Poly;

    fn rem(self, rhs: &Gf2Poly) -> Gf2Poly {
        self.rem_ref(rhs)
    }
}

impl Rem<Gf2Poly> for Gf2Poly {
    type Output = Gf2Poly;

    fn rem(self, rhs: Gf2Poly) -> Gf2Poly {
        self.rem_ref(&rhs)
    }
}

impl Rem<&Gf2Poly> for Gf2Poly {
    type Output = Gf2Poly;

    fn rem(self, rhs: &Gf2Poly) -> Gf2Poly {
        self.rem_ref(rhs)
    }
}

impl DivAssign<&Gf2Poly> for Gf2Poly {

    fn div_assign(&mut self, rhs: &Gf2Poly) {
        *self = self.div_ref(rhs);
    }
}

impl RemAssign<&Gf2Poly> for Gf2Poly {

    fn rem_assign(&mut self, rhs: &Gf2Poly) {
        assert!(!rhs.is_zero(), "attempted to divide by the zero polynomial");
        let mut limbs = std::mem::take(self).into_limbs();
        reduce_in_place(&mut limbs, rhs.limbs(), rhs.degree(), None);
        *self = Gf2Poly::from_limbs(limbs);
    }
}

#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;

#[cfg(test)]
fn assert_division_contract(a: &Gf2Poly, b: &Gf2Poly) {
    let (q, r) = a.div_rem(b);
    assert_eq!(*a, &q * b + &r);
    assert!(r.is_zero() || r.degree() < b.degree());
    assert_eq!(q, a / b);
    assert_eq!(r, a % b);
}

#[test]
fn test_euclidean_division() {
    LogAlgorithmSubscriber::init_test();
    let a = Gf2Poly::from_coefficients([0, 0, 0, 1, 1]);
    let b = Gf2Poly::from_coefficients([0, 0, 1]);
    let (q, r) = a.div_rem(&b);
    assert_eq!(Gf2Poly::from_coefficients([0, 1, 1]), q);
    assert_eq!(Gf2Poly::zero(), r);

    let a = Gf2Poly::from_coefficients([0, 0, 0, 1, 1, 0, 1, 0]);
    let b = Gf2Poly::from_coefficients([0, 1, 1, 1]);
    assert_division_contract(&a, &b);
    assert_division_contract(&b, &a);
}

#[test]
fn test_division_edge_cases() {
    LogAlgorithmSubscriber::init_test();
    let a = Gf2Poly::from_hex("a466cfdc").unwrap();
    assert_eq!((a.clone(), Gf2Poly::zero()), a.div_rem(&Gf2Poly::one()));
    assert_eq!((Gf2Poly::one(), Gf2Poly::zero()), a.div_rem(&a));
    assert_eq!((Gf2Poly::zero(), Gf2Poly::zero()), Gf2Poly::zero().div_rem(&a));
    assert_eq!((Gf2Poly::zero(), Gf2Poly::one()), Gf2Poly::one().div_rem(&a));
    assert_eq!((Gf2Poly::zero(), Gf2Poly::zero()), Gf2Poly::zero().div_rem(&Gf2Poly::one()));
}

#[test]
fn test_division_contract_random() {
    LogAlgorithmSubscriber::init_test();
    let mut rng = oorandom::Rand64::new(3);
    for _ in 0..100 {
        let a = Gf2Poly::from_coefficients((0..rng.rand_range(0..300)).map(|_| rng.rand_u64()));
        let b = Gf2Poly::from_coefficients((0..rng.rand_range(1..150)).map(|_| rng.rand_u64())) + Gf2Poly::monomial(150);
        assert_division_contract(&a, &b);
        let mut c = a.clone();
        c %= &b;
        assert_eq!(a.rem_ref(&b), c);
        let mut c = a.clone();
        c /= &b;
        assert_eq!(a.div_ref(&b), c);
    }
}

#[test]
fn test_division_by_zero() {
    let a = Gf2Poly::from_hex("c").unwrap();
    assert_eq!(Err(DivisionByZeroError), a.checked_div_rem(&Gf2Poly::zero()));
    assert_eq!(Err(DivisionByZeroError), a.checked_div(&Gf2Poly::zero()));
    assert_eq!(Err(DivisionByZeroError), a.checked_rem(&Gf2Poly::zero()));
    assert_eq!(Ok(Gf2Poly::from_hex("6").unwrap()), a.checked_div(&Gf2Poly::from_hex("2").unwrap()));
}

#[test]
#[should_panic]
fn test_division_by_zero_panics() {
    let _ = Gf2Poly::one().div_rem(&Gf2Poly::zero());
}

#[test]
fn test_divides() {
    let a = Gf2Poly::from_hex("c").unwrap();
    assert!(Gf2Poly::x().divides(&a));
    assert!(Gf2Poly::from_hex("3").unwrap().divides(&a));
    assert!(!Gf2Poly::from_hex("7").unwrap().divides(&a));
    assert!(a.divides(&Gf2Poly::zero()));
    assert!(!Gf2Poly::zero().divides(&a));
    assert!(Gf2Poly::zero().divides(&Gf2Poly::zero()));
}
