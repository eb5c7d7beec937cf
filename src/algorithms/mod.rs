///
/// Contains [`sqr_mul::generic_square_and_multiply()`] and modular exponentiation
/// of polynomials.
///
pub mod sqr_mul;
///
/// Contains polynomial division with remainder, and the corresponding operators.
///
pub mod poly_div;
///
/// Contains the Euclidean algorithm and its extended variant for polynomials.
///
pub mod eea;
///
/// Contains algorithms for the square-free decomposition of polynomials.
///
pub mod poly_squarefree;
///
/// Contains distinct-degree and equal-degree factorization, and the combined
/// factorization of arbitrary polynomials into irreducible factors.
///
pub mod poly_factor;
