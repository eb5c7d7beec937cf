use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use crate::algorithms::sqr_mul::generic_square_and_multiply;
use crate::poly::*;

const EVEN_BITS: u64 = 0x5555_5555_5555_5555;
const ODD_BITS: u64 = 0xAAAA_AAAA_AAAA_AAAA;

///
/// Maps bit `i` of `x` to bit `2i` of the result, which is exactly squaring in `GF(2)[X]`.
///
fn spread_bits(x: u32) -> u64 {
    let mut x = x as u64;
    x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & EVEN_BITS;
    return x;
}

/// Inverse of [`spread_bits()`]; odd bits are ignored.
fn compact_bits(x: u64) -> u32 {
    let mut x = x & EVEN_BITS;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x >> 16)) & 0x0000_0000_FFFF_FFFF;
    return x as u32;
}

impl Gf2Poly {

    ///
    /// Adds two polynomials. Since we are in characteristic 2, this is the same as
    /// subtraction, and amounts to xor-ing the coefficient vectors.
    ///
    pub fn add_ref(&self, rhs: &Gf2Poly) -> Gf2Poly {
        let (longer, shorter) = if self.limbs().len() >= rhs.limbs().len() { (self, rhs) } else { (rhs, self) };
        let mut limbs = longer.limbs().to_vec();
        for (a, b) in limbs.iter_mut().zip(shorter.limbs()) {
            *a ^= b;
        }
        return Gf2Poly::from_limbs(limbs);
    }

    pub fn sub_ref(&self, rhs: &Gf2Poly) -> Gf2Poly {
        self.add_ref(rhs)
    }

    ///
    /// Carry-less multiplication: for every set coefficient of `X^i` in `self`, the
    /// product accumulates `rhs * X^i` via xor.
    ///
    pub fn mul_ref(&self, rhs: &Gf2Poly) -> Gf2Poly {
        if self.is_zero() || rhs.is_zero() {
            return Gf2Poly::zero();
        }
        let mut result = Vec::with_capacity(self.limbs().len() + rhs.limbs().len());
        for (index, limb) in self.limbs().iter().enumerate() {
            let mut remaining = *limb;
            while remaining != 0 {
                let bit = remaining.trailing_zeros() as usize;
                xor_shifted_into(&mut result, rhs.limbs(), index * LIMB_BITS + bit);
                remaining &= remaining - 1;
            }
        }
        return Gf2Poly::from_limbs(result);
    }

    ///
    /// Computes `self^2`. The result is the same as `self.mul_ref(self)`, but the cross
    /// terms cancel in characteristic 2, so it suffices to spread out the coefficients.
    ///
    pub fn square(&self) -> Gf2Poly {
        let limbs = self.limbs().iter()
            .flat_map(|limb| [spread_bits(*limb as u32), spread_bits((*limb >> 32) as u32)])
            .collect();
        return Gf2Poly::from_limbs(limbs);
    }

    ///
    /// The formal derivative. Terms `X^i` with even `i` vanish, all other terms become `X^(i - 1)`.
    /// In particular, the derivative of any square is zero.
    ///
    pub fn derivative(&self) -> Gf2Poly {
        let limbs = self.limbs().iter().map(|limb| (limb & ODD_BITS) >> 1).collect();
        return Gf2Poly::from_limbs(limbs);
    }

    ///
    /// Computes `self^power`, with `self^0 = 1` (also for `self = 0`).
    ///
    pub fn pow(&self, power: u64) -> Gf2Poly {
        generic_square_and_multiply(
            self,
            power,
            |a| a.square(),
            |base, a| base.mul_ref(&a),
            Gf2Poly::one()
        )
    }

    ///
    /// Returns whether `self` is the square of some polynomial, which is the case if
    /// and only if all coefficients of odd powers of `X` are zero.
    ///
    pub fn is_square(&self) -> bool {
        self.limbs().iter().all(|limb| limb & ODD_BITS == 0)
    }

    ///
    /// Computes the polynomial `g` with `g^2 = self`, by taking the coefficients of the
    /// even powers of `X`.
    ///
    /// The caller has to ensure that `self` is indeed a square. This is only checked in
    /// debug builds; for a non-square, the coefficients of odd powers are ignored and the
    /// result is meaningless. See [`Gf2Poly::try_sqrt()`] for a checked version.
    ///
    pub fn sqrt(&self) -> Gf2Poly {
        debug_assert!(self.is_square(), "{:?} is not a square", self);
        let limbs = self.limbs().chunks(2)
            .map(|chunk| compact_bits(chunk[0]) as u64 | ((chunk.get(1).map_or(0, |limb| compact_bits(*limb)) as u64) << 32))
            .collect();
        return Gf2Poly::from_limbs(limbs);
    }

    ///
    /// Returns the square root of `self`, or `None` if `self` is not a square.
    ///
    pub fn try_sqrt(&self) -> Option<Gf2Poly> {
        if self.is_square() {
            Some(self.sqrt())
        } else {
            None
        }
    }
}

macro_rules! forward_binop {
    ($op_trait:ident, $op_fn:ident, $assign_trait:ident, $assign_fn:ident, $impl_fn:ident) => {
        impl $op_trait<&Gf2Poly> for &Gf2Poly {
            type Output = Gf2Poly;

            fn $op_fn(self, rhs: &Gf2Poly) -> Gf2Poly {
                Gf2Poly::$impl_fn(self, rhs)
            }
        }

        impl $op_trait<Gf2Poly> for &Gf2Poly {
            type Output = Gf2Poly;

            fn $op_fn(self, rhs: Gf2Poly) -> Gf2Poly {
                Gf2Poly::$impl_fn(self, &rhs)
            }
        }

        impl $op_trait<&Gf2Poly> for Gf2Poly {
            type Output = Gf2Poly;

            fn $op_fn(self, rhs: &Gf2Poly) -> Gf2Poly {
                Gf2Poly::$impl_fn(&self, rhs)
            }
        }

        impl $op_trait<Gf2Poly> for Gf2Poly {
            type Output = Gf2Poly;

            fn $op_fn(self, rhs: Gf2Poly) -> Gf2Poly {
                Gf2Poly::$impl_fn(&self, &rhs)
            }
        }

        impl $assign_trait<&Gf2Poly> for Gf2Poly {

            fn $assign_fn(&mut self, rhs: &Gf2Poly) {
                *self = Gf2Poly::$impl_fn(self, rhs);
            }
        }

        impl $assign_trait<Gf2Poly> for Gf2Poly {

            fn $assign_fn(&mut self, rhs: Gf2Poly) {
                *self = Gf2Poly::$impl_fn(self, &rhs);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign, add_ref);
forward_binop!(Sub, sub, SubAssign, sub_assign, sub_ref);
forward_binop!(Mul, mul, MulAssign, mul_assign, mul_ref);

impl Sum for Gf2Poly {

    fn sum<I: Iterator<Item = Gf2Poly>>(iter: I) -> Self {
        iter.fold(Gf2Poly::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Gf2Poly> for Gf2Poly {

    fn sum<I: Iterator<Item = &'a Gf2Poly>>(iter: I) -> Self {
        iter.fold(Gf2Poly::zero(), |acc, x| acc + x)
    }
}

impl Product for Gf2Poly {

    fn product<I: Iterator<Item = Gf2Poly>>(iter: I) -> Self {
        iter.fold(Gf2Poly::one(), |acc, x| acc * x)
    }
}

impl<'a> Product<&'a Gf2Poly> for Gf2Poly {

    fn product<I: Iterator<Item = &'a Gf2Poly>>(iter: I) -> Self {
        iter.fold(Gf2Poly::one(), |acc, x| acc * x)
    }
}

#[cfg(test)]
fn random_poly(rng: &mut oorandom::Rand64, max_degree: usize) -> Gf2Poly {
    let degree = rng.rand_range(0..(max_degree as u64 + 1)) as usize;
    Gf2Poly::from_coefficients((0..=degree).map(|_| rng.rand_u64()))
}

#[test]
fn test_add() {
    let g1 = Gf2Poly::from_coefficients([0, 1, 1, 1]);
    let g2 = Gf2Poly::from_coefficients([1, 0, 1, 0, 1]);
    assert_eq!(Gf2Poly::from_coefficients([1, 1, 0, 1, 1]), &g1 + &g2);
    assert_eq!(Gf2Poly::zero(), &g1 + &g1);
    assert_eq!(g1, &g1 + Gf2Poly::zero());
}

#[test]
fn test_sub() {
    let g1 = Gf2Poly::from_coefficients([0, 1, 1, 1]);
    let g2 = Gf2Poly::from_coefficients([1, 0, 1, 0, 1]);
    assert_eq!(Gf2Poly::from_coefficients([1, 1, 0, 1, 1]), g1 - g2);
}

#[test]
fn test_mul() {
    let g1 = Gf2Poly::from_coefficients([0, 1, 1, 1]);
    let g2 = Gf2Poly::from_coefficients([1, 0, 1, 0, 1]);
    assert_eq!(Gf2Poly::from_coefficients([0, 1, 1, 0, 1, 0, 1, 1]), &g1 * &g2);
    assert_eq!(Gf2Poly::zero(), &g1 * Gf2Poly::zero());
    assert_eq!(g1, &g1 * Gf2Poly::one());
}

#[test]
fn test_mul_across_limbs() {
    let a = Gf2Poly::monomial(63) + Gf2Poly::one();
    let b = Gf2Poly::monomial(65) + Gf2Poly::x();
    let expected = Gf2Poly::monomial(128) + Gf2Poly::monomial(65) + Gf2Poly::monomial(64) + Gf2Poly::x();
    assert_eq!(expected, &a * &b);
}

#[test]
fn test_ring_axioms() {
    let mut rng = oorandom::Rand64::new(1);
    for _ in 0..50 {
        let a = random_poly(&mut rng, 150);
        let b = random_poly(&mut rng, 150);
        let c = random_poly(&mut rng, 150);
        assert_eq!(&a + &b, &b + &a);
        assert_eq!((&a + &b) + &c, &a + (&b + &c));
        assert_eq!(Gf2Poly::zero(), &a + &a);
        assert_eq!(&a * &b, &b * &a);
        assert_eq!((&a * &b) * &c, &a * (&b * &c));
        assert_eq!(&a * (&b + &c), &a * &b + &a * &c);
    }
}

#[test]
fn test_square() {
    let mut rng = oorandom::Rand64::new(2);
    for _ in 0..50 {
        let a = random_poly(&mut rng, 200);
        assert_eq!(a.mul_ref(&a), a.square());
    }
}

#[test]
fn test_derivative() {
    let g1 = Gf2Poly::from_coefficients([0, 0, 0, 3, 101, 6, 8]);
    assert_eq!(Gf2Poly::from_coefficients([0, 0, 1]), g1.derivative());
    assert_eq!(Gf2Poly::one(), Gf2Poly::x().derivative());
    assert_eq!(Gf2Poly::zero(), Gf2Poly::one().derivative());
    assert_eq!(Gf2Poly::monomial(64), Gf2Poly::monomial(65).derivative());
    assert_eq!(Gf2Poly::zero(), Gf2Poly::from_hex("a466cfdc").unwrap().square().derivative());
}

#[test]
fn test_pow() {
    let g = Gf2Poly::from_hex("a466cfdc").unwrap();
    assert_eq!(Gf2Poly::one(), g.pow(0));
    assert_eq!(Gf2Poly::one(), Gf2Poly::zero().pow(0));
    assert_eq!(g, g.pow(1));
    assert_eq!(&g * &g * &g * &g * &g, g.pow(5));
    let x_plus_one = Gf2Poly::from_coefficients([1, 1]);
    assert_eq!(Gf2Poly::monomial(8) + Gf2Poly::one(), x_plus_one.pow(8));
}

#[test]
fn test_sqrt() {
    let g = Gf2Poly::from_coefficients([1, 0, 1]);
    assert_eq!(Gf2Poly::from_coefficients([1, 1]), g.sqrt());
    let g = Gf2Poly::from_hex("a466cfdc").unwrap();
    assert_eq!(g, g.pow(2).sqrt());
    let g = Gf2Poly::from_hex("6677e20146508fb7b0c152f9").unwrap();
    assert_eq!(g, g.square().sqrt());
    assert_eq!(Gf2Poly::zero(), Gf2Poly::zero().sqrt());
}

#[test]
fn test_try_sqrt() {
    assert!(!Gf2Poly::x().is_square());
    assert_eq!(None, Gf2Poly::from_coefficients([1, 1, 1]).try_sqrt());
    assert_eq!(Some(Gf2Poly::x()), Gf2Poly::monomial(2).try_sqrt());
}

#[test]
fn test_sum_product() {
    let factors = [Gf2Poly::x(), Gf2Poly::from_coefficients([1, 1]), Gf2Poly::from_coefficients([1, 1, 1])];
    assert_eq!(Gf2Poly::from_coefficients([0, 1, 0, 0, 1]), factors.iter().product::<Gf2Poly>());
    assert_eq!(Gf2Poly::from_coefficients([0, 1, 1]), factors.iter().sum::<Gf2Poly>());
    assert_eq!(Gf2Poly::one(), Vec::<Gf2Poly>::new().into_iter().product::<Gf2Poly>());
}
