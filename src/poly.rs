use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub(crate) const LIMB_BITS: usize = u64::BITS as usize;

///
/// Values that can be used as coefficients when building a [`Gf2Poly`].
/// Only the lowest bit is relevant, every other bit is masked away.
///
pub trait Coefficient: Copy {

    fn low_bit(self) -> bool;
}

macro_rules! impl_coefficient_for_int {
    ($($int:ty),*) => {
        $(
            impl Coefficient for $int {

                fn low_bit(self) -> bool {
                    self & 1 == 1
                }
            }
        )*
    };
}

impl_coefficient_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Coefficient for bool {

    fn low_bit(self) -> bool {
        self
    }
}

///
/// A polynomial in `GF(2)[X]`, i.e. a polynomial whose coefficients are bits that are
/// added and multiplied modulo 2.
///
/// The coefficients are packed into `u64` limbs, the coefficient of `X^i` being bit
/// `i % 64` of limb `i / 64`. Every value is kept in canonical form, i.e. the last limb
/// is never zero, and the zero polynomial is represented by no limbs at all. Hence the
/// derived equality compares polynomials as values.
///
/// # Example
/// ```
/// # use gf2_math::poly::*;
/// let f = Gf2Poly::from_coefficients([1, 0, 0, 1, 1, 0]);
/// assert_eq!(4, f.degree());
/// assert_eq!("X^4 + X^3 + 1", f.to_string());
/// assert_eq!("19", f.to_hex());
/// ```
///
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Gf2Poly {
    limbs: Vec<u64>
}

impl Gf2Poly {

    ///
    /// Creates the polynomial whose coefficient of `X^i` is the lowest bit of the
    /// `i`-th element of the given sequence. Trailing zeros are removed.
    ///
    pub fn from_coefficients<I>(coefficients: I) -> Self
        where I: IntoIterator,
            I::Item: Coefficient
    {
        let mut limbs = Vec::new();
        for (i, c) in coefficients.into_iter().enumerate() {
            if i % LIMB_BITS == 0 {
                limbs.push(0);
            }
            if c.low_bit() {
                limbs[i / LIMB_BITS] |= 1 << (i % LIMB_BITS);
            }
        }
        return Self::from_limbs(limbs);
    }

    pub(crate) fn from_limbs(mut limbs: Vec<u64>) -> Self {
        trim(&mut limbs);
        Gf2Poly { limbs }
    }

    pub(crate) fn limbs(&self) -> &[u64] {
        &self.limbs
    }

    pub(crate) fn into_limbs(self) -> Vec<u64> {
        self.limbs
    }

    pub fn zero() -> Self {
        Gf2Poly { limbs: Vec::new() }
    }

    pub fn one() -> Self {
        Gf2Poly { limbs: vec![1] }
    }

    /// The indeterminate `X`.
    pub fn x() -> Self {
        Self::monomial(1)
    }

    ///
    /// Returns `X^n`. In particular, `monomial(0)` is the constant `1`.
    ///
    pub fn monomial(n: usize) -> Self {
        let mut limbs = vec![0; n / LIMB_BITS + 1];
        limbs[n / LIMB_BITS] = 1 << (n % LIMB_BITS);
        Gf2Poly { limbs }
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.limbs.len() == 1 && self.limbs[0] == 1
    }

    ///
    /// Returns the degree of the polynomial.
    ///
    /// By convention, the degree of the zero polynomial is `0`, so the degree cannot be
    /// used to distinguish `0` from `1`. Use [`Gf2Poly::checked_degree()`] or
    /// [`Gf2Poly::is_zero()`] where this matters.
    ///
    pub fn degree(&self) -> usize {
        self.checked_degree().unwrap_or(0)
    }

    ///
    /// Returns the degree of the polynomial, or `None` if it is zero.
    ///
    pub fn checked_degree(&self) -> Option<usize> {
        highest_set_bit(&self.limbs)
    }

    pub fn coefficient(&self, i: usize) -> bool {
        self.limbs.get(i / LIMB_BITS).map_or(false, |limb| (limb >> (i % LIMB_BITS)) & 1 == 1)
    }

    ///
    /// Iterates over the coefficients of `X^0, ..., X^deg`. For the zero polynomial, the
    /// iterator is empty.
    ///
    pub fn coefficients(&self) -> impl Iterator<Item = bool> + '_ {
        let len = self.checked_degree().map_or(0, |d| d + 1);
        (0..len).map(move |i| self.coefficient(i))
    }

    ///
    /// Returns the raw coefficient sequence, one `0` or `1` per entry, without trailing zeros.
    ///
    pub fn to_coefficients(&self) -> Vec<u8> {
        self.coefficients().map(u8::from).collect()
    }

    ///
    /// Returns the hexadecimal encoding of this polynomial, most significant digit first.
    /// The `k`-th hex digit from the right encodes the coefficients of `X^(4k), ..., X^(4k + 3)`,
    /// with the coefficient of `X^(4k)` being the lowest bit of the digit.
    ///
    pub fn to_hex(&self) -> String {
        format!("{:x}", self)
    }

    ///
    /// Parses a polynomial from its hexadecimal encoding, see [`Gf2Poly::to_hex()`].
    ///
    pub fn from_hex(hex: &str) -> Result<Self, ParseGf2PolyError> {
        if hex.is_empty() {
            return Err(ParseGf2PolyError::Empty);
        }
        let digit_count = hex.chars().count();
        let mut limbs = vec![0; (digit_count * 4).div_ceil(LIMB_BITS)];
        for (k, (position, character)) in hex.char_indices().rev().enumerate() {
            let digit = character.to_digit(16).ok_or(ParseGf2PolyError::InvalidDigit { character, position })?;
            let bit = 4 * k;
            limbs[bit / LIMB_BITS] |= (digit as u64) << (bit % LIMB_BITS);
        }
        return Ok(Self::from_limbs(limbs));
    }

    ///
    /// Packs the coefficients into bytes, byte `k` holding the coefficients of
    /// `X^(8k), ..., X^(8k + 7)`. The zero polynomial gives an empty vector.
    ///
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = self.limbs.iter().flat_map(|limb| limb.to_le_bytes()).collect::<Vec<_>>();
        while bytes.last() == Some(&0) {
            bytes.pop();
        }
        return bytes;
    }

    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        let limbs = bytes.chunks(8).map(|chunk| {
            let mut buffer = [0u8; 8];
            buffer[..chunk.len()].copy_from_slice(chunk);
            u64::from_le_bytes(buffer)
        }).collect();
        return Self::from_limbs(limbs);
    }
}

pub(crate) fn trim(limbs: &mut Vec<u64>) {
    while limbs.last() == Some(&0) {
        limbs.pop();
    }
}

pub(crate) fn highest_set_bit(limbs: &[u64]) -> Option<usize> {
    let (index, limb) = limbs.iter().enumerate().rev().find(|(_, limb)| **limb != 0)?;
    Some(index * LIMB_BITS + (LIMB_BITS - 1 - limb.leading_zeros() as usize))
}

///
/// Adds `src * X^shift` to `acc`, growing `acc` where necessary. `acc` is not trimmed.
///
pub(crate) fn xor_shifted_into(acc: &mut Vec<u64>, src: &[u64], shift: usize) {
    if src.is_empty() {
        return;
    }
    let limb_shift = shift / LIMB_BITS;
    let bit_shift = shift % LIMB_BITS;
    let required_len = src.len() + limb_shift + usize::from(bit_shift != 0);
    if acc.len() < required_len {
        acc.resize(required_len, 0);
    }
    if bit_shift == 0 {
        for (a, s) in acc[limb_shift..].iter_mut().zip(src) {
            *a ^= s;
        }
    } else {
        for (i, s) in src.iter().enumerate() {
            acc[i + limb_shift] ^= s << bit_shift;
            acc[i + limb_shift + 1] ^= s >> (LIMB_BITS - bit_shift);
        }
    }
}

impl PartialOrd for Gf2Poly {

    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

///
/// Orders polynomials first by degree, and polynomials of the same degree by the value
/// of their coefficient vectors read as binary numbers. The zero polynomial is the smallest.
///
impl Ord for Gf2Poly {

    fn cmp(&self, other: &Self) -> Ordering {
        self.limbs.len().cmp(&other.limbs.len())
            .then_with(|| self.limbs.iter().rev().cmp(other.limbs.iter().rev()))
    }
}

impl FromIterator<bool> for Gf2Poly {

    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::from_coefficients(iter)
    }
}

impl fmt::Display for Gf2Poly {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for i in (0..=self.degree()).rev().filter(|i| self.coefficient(*i)) {
            if !first {
                write!(f, " + ")?;
            }
            if i == 0 {
                write!(f, "1")?;
            } else {
                write!(f, "X^{}", i)?;
            }
            first = false;
        }
        return Ok(());
    }
}

impl fmt::LowerHex for Gf2Poly {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(degree) = self.checked_degree() else {
            return write!(f, "0");
        };
        let digits = (0..=(degree / 4)).rev().map(|k| {
            let bit = 4 * k;
            let digit = (self.limbs[bit / LIMB_BITS] >> (bit % LIMB_BITS)) & 0xF;
            char::from_digit(digit as u32, 16).unwrap_or('?')
        }).collect::<String>();
        f.pad(&digits)
    }
}

impl fmt::Debug for Gf2Poly {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gf2Poly(0x{:x})", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ParseGf2PolyError {
    #[error("cannot parse a polynomial from an empty string")]
    Empty,
    #[error("invalid hex digit {character:?} at position {position}")]
    InvalidDigit { character: char, position: usize }
}

impl FromStr for Gf2Poly {

    type Err = ParseGf2PolyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

///
/// Human-readable formats store the hex encoding, binary formats the packed bytes
/// as returned by [`Gf2Poly::to_le_bytes()`].
///
impl Serialize for Gf2Poly {

    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serde_bytes::Bytes::new(&self.to_le_bytes()).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Gf2Poly {

    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de>
    {
        struct HexVisitor;

        impl<'de> Visitor<'de> for HexVisitor {
            type Value = Gf2Poly;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a polynomial over GF(2) as hex string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where E: de::Error
            {
                Gf2Poly::from_hex(v).map_err(E::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(HexVisitor)
        } else {
            let bytes = serde_bytes::ByteBuf::deserialize(deserializer)?;
            Ok(Gf2Poly::from_le_bytes(&bytes))
        }
    }
}

#[cfg(test)]
use serde_assert::{Deserializer as AssertDeserializer, Serializer as AssertSerializer};

#[test]
fn test_construction() {
    let f = Gf2Poly::from_coefficients([1, 0, 0, 1, 1, 0]);
    assert_eq!(5, f.to_coefficients().len());
    assert_eq!(vec![1, 0, 0, 1, 1], f.to_coefficients());
}

#[test]
fn test_construction_masks_low_bit() {
    let f = Gf2Poly::from_coefficients([1, 2, 3, 4, 5, 6]);
    assert_eq!(vec![1, 0, 1, 0, 1], f.to_coefficients());
    assert_eq!(Gf2Poly::zero(), Gf2Poly::from_coefficients([2, 4, 6, 8]));
    assert_eq!(Gf2Poly::zero(), Gf2Poly::from_coefficients(Vec::<u8>::new()));
    assert_eq!(Gf2Poly::one(), Gf2Poly::from_coefficients([true]));
}

#[test]
fn test_normalization_idempotent() {
    let inputs: [&[u64]; 4] = [&[1, 0, 0, 1, 1, 0], &[0, 0, 0], &[3, 5, 7, 0, 0, 9], &[]];
    for c in inputs {
        let f = Gf2Poly::from_coefficients(c.iter().copied());
        assert_eq!(f, Gf2Poly::from_coefficients(f.to_coefficients()));
    }
}

#[test]
fn test_display() {
    assert_eq!("X^4 + X^3 + 1", Gf2Poly::from_coefficients([1, 0, 0, 1, 1, 0]).to_string());
    assert_eq!("X^4 + X^2 + 1", Gf2Poly::from_coefficients([1, 2, 3, 4, 5, 6]).to_string());
    assert_eq!("0", Gf2Poly::zero().to_string());
    assert_eq!("1", Gf2Poly::one().to_string());
    assert_eq!("X^1", Gf2Poly::x().to_string());
}

#[test]
fn test_degree() {
    assert_eq!(4, Gf2Poly::from_coefficients([1, 2, 3, 4, 5, 6]).degree());
    assert_eq!(130, Gf2Poly::monomial(130).degree());
    // zero and one share degree 0, only checked_degree() tells them apart
    assert_eq!(0, Gf2Poly::zero().degree());
    assert_eq!(0, Gf2Poly::one().degree());
    assert_eq!(None, Gf2Poly::zero().checked_degree());
    assert_eq!(Some(0), Gf2Poly::one().checked_degree());
}

#[test]
fn test_equal() {
    let g1 = Gf2Poly::from_coefficients([1, 2, 3, 4, 5, 6]);
    let g2 = Gf2Poly::from_coefficients([1, 0, 1, 0, 1]);
    let g3 = Gf2Poly::zero();
    let g4 = Gf2Poly::from_coefficients([2, 4, 6, 8]);
    assert_eq!(g1, g2);
    assert_eq!(g3, g4);
    assert_ne!(g1, g3);
    assert_ne!(g1, g4);
    assert_ne!(g2, g3);
    assert_ne!(Gf2Poly::zero(), Gf2Poly::one());
}

#[test]
fn test_monomial() {
    assert_eq!(Gf2Poly::from_coefficients([0, 0, 0, 1]), Gf2Poly::monomial(3));
    assert_eq!(Gf2Poly::from_coefficients([0, 0, 1]), Gf2Poly::monomial(2));
    assert_eq!(Gf2Poly::from_coefficients([0, 1]), Gf2Poly::monomial(1));
    assert_eq!(Gf2Poly::from_coefficients([1]), Gf2Poly::monomial(0));
    assert!(Gf2Poly::monomial(64).coefficient(64));
    assert!(!Gf2Poly::monomial(64).coefficient(63));
}

#[test]
fn test_hex() {
    let g = Gf2Poly::from_hex("c").unwrap();
    assert_eq!(Gf2Poly::from_coefficients([0, 0, 1, 1]), g);
    assert_eq!("c", g.to_hex());
    assert_eq!("a466cfdc", Gf2Poly::from_hex("a466cfdc").unwrap().to_hex());
    assert_eq!("6677e20146508fb7", "6677e20146508fb7".parse::<Gf2Poly>().unwrap().to_hex());
    assert_eq!("0", Gf2Poly::zero().to_hex());
    assert_eq!("0", Gf2Poly::from_hex("000").unwrap().to_hex());
    assert_eq!("ff", Gf2Poly::from_hex("00FF").unwrap().to_hex());
    let long = "1b0c152f9ebf2831f6677e20146508fb7a466cfdc";
    assert_eq!(long, Gf2Poly::from_hex(long).unwrap().to_hex());
}

#[test]
fn test_hex_errors() {
    assert_eq!(Err(ParseGf2PolyError::Empty), Gf2Poly::from_hex(""));
    assert_eq!(Err(ParseGf2PolyError::InvalidDigit { character: 'g', position: 2 }), Gf2Poly::from_hex("a4g6"));
    assert_eq!(Err(ParseGf2PolyError::InvalidDigit { character: ' ', position: 0 }), " 1".parse::<Gf2Poly>());
}

#[test]
fn test_le_bytes() {
    let f = Gf2Poly::from_hex("1a466cfdc").unwrap();
    assert_eq!(vec![0xdc, 0xcf, 0x66, 0xa4, 0x01], f.to_le_bytes());
    assert_eq!(f, Gf2Poly::from_le_bytes(&f.to_le_bytes()));
    assert_eq!(Gf2Poly::zero(), Gf2Poly::from_le_bytes(&[0, 0]));
    assert!(Gf2Poly::zero().to_le_bytes().is_empty());
}

#[test]
fn test_ordering() {
    let mut polys = vec![Gf2Poly::from_hex("13").unwrap(), Gf2Poly::one(), Gf2Poly::monomial(70), Gf2Poly::zero(), Gf2Poly::from_hex("1f").unwrap()];
    polys.sort();
    assert_eq!(vec![Gf2Poly::zero(), Gf2Poly::one(), Gf2Poly::from_hex("13").unwrap(), Gf2Poly::from_hex("1f").unwrap(), Gf2Poly::monomial(70)], polys);
}

#[test]
fn test_serialize_json() {
    let f = Gf2Poly::from_hex("a466cfdc").unwrap();
    let json = serde_json::to_string(&f).unwrap();
    assert_eq!("\"a466cfdc\"", json);
    assert_eq!(f, serde_json::from_str::<Gf2Poly>(&json).unwrap());
    assert!(serde_json::from_str::<Gf2Poly>("\"xyz\"").is_err());
}

#[test]
fn test_serialization() {
    let edge_case_elements = [Gf2Poly::zero(), Gf2Poly::one(), Gf2Poly::monomial(64), Gf2Poly::from_hex("6677e20146508fb7").unwrap()];

    let serializer = AssertSerializer::builder().is_human_readable(true).build();
    for x in &edge_case_elements {
        let tokens = x.serialize(&serializer).unwrap();
        let mut deserializer = AssertDeserializer::builder(tokens).is_human_readable(true).build();
        assert_eq!(x, &Gf2Poly::deserialize(&mut deserializer).unwrap());
    }

    let serializer = AssertSerializer::builder().is_human_readable(false).build();
    for x in &edge_case_elements {
        let tokens = x.serialize(&serializer).unwrap();
        let mut deserializer = AssertDeserializer::builder(tokens).is_human_readable(false).build();
        assert_eq!(x, &Gf2Poly::deserialize(&mut deserializer).unwrap());
    }
}
