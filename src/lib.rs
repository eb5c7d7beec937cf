//!
//! Arithmetic and factorization in the polynomial ring `GF(2)[X]`, i.e. polynomials
//! whose coefficients are bits that are added and multiplied modulo 2.
//!
//! The main type is [`Gf2Poly`], which implements the usual arithmetic operators, together
//! with a hexadecimal encoding. On top of it, [`algorithms`] provides the Euclidean
//! algorithm and the factorization pipeline: square-free decomposition, distinct-degree
//! factorization and the randomized equal-degree factorization.
//!
//! # Example
//! ```
//! # use gf2_math::poly::*;
//! # use gf2_math::algorithms::poly_factor::*;
//! let f = Gf2Poly::from_hex("b0c152f9").unwrap() * Gf2Poly::from_hex("ebf2831f").unwrap();
//! let factorization = factor(&f).unwrap();
//! assert_eq!(f, factorization.iter().map(|(p, e)| p.pow(*e as u64)).product::<Gf2Poly>());
//! assert!(factorization.iter().all(|(p, _)| is_irreducible(p)));
//! ```
//!

pub mod poly;
mod arith;
pub mod algorithms;
pub mod tracing;

pub use poly::{Coefficient, Gf2Poly, ParseGf2PolyError};
pub use algorithms::poly_div::DivisionByZeroError;
pub use algorithms::poly_factor::{factor, factor_with, FactorError, FactorOptions};
