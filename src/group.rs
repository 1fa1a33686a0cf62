//! Group and scalar field contract (§4.1).
//!
//! `Scalar` and `Point` are thin newtypes over a concrete `arkworks` curve
//! (BLS12-381's G1 group). They exist so the rest of the crate never touches
//! `ark_ec`/`ark_ff` directly: every method the spec names (`is_zero`,
//! `is_infinity`, `to_bytes`, `from_bytes`, `random`, …) is implemented here
//! once, and the `std::ops` impls give call sites the same `a*P + b*Q`
//! notation the spec's prose uses.

use ark_bls12_381::{Fr, G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, PrimeField, UniformRand, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, RngCore};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use zeroize::Zeroize;

use crate::error::CodecError;

const LOG_TARGET: &str = "shuffle_argument::group";

/// Idempotent, first-caller-wins initialization hook for the underlying
/// curve library. The `arkworks` backend needs no process-wide setup, so
/// this is a documented no-op — kept so the public API has the same shape
/// as a backend that does need one (see SPEC_FULL.md §5, §9).
pub fn curve_init() {
    tracing::trace!(target: LOG_TARGET, "curve_init: arkworks backend needs no setup");
}

/// An element of the scalar field F_q.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scalar(pub(crate) Fr);

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0 = Fr::zero();
    }
}

impl Scalar {
    pub const BYTE_SIZE: usize = 32;

    pub fn zero() -> Self {
        Self(Fr::zero())
    }

    pub fn from_u64(v: u64) -> Self {
        Self(Fr::from(v))
    }

    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self(Fr::rand(rng))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Fixed-width, big-endian encoding, reduced mod q.
    pub fn to_bytes(&self) -> [u8; Self::BYTE_SIZE] {
        let big = self.0.into_bigint();
        let be = big.to_bytes_be();
        let mut out = [0u8; Self::BYTE_SIZE];
        // `to_bytes_be` is already `BYTE_SIZE` long for this field's modulus.
        out[Self::BYTE_SIZE - be.len()..].copy_from_slice(&be);
        out
    }

    /// Reads a big-endian scalar and reduces it mod q (never fails beyond
    /// a length check, per §3/§7).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != Self::BYTE_SIZE {
            return Err(CodecError::WrongLength {
                expected: Self::BYTE_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self(Fr::from_be_bytes_mod_order(bytes)))
    }
}

impl Add for Scalar {
    type Output = Scalar;
    fn add(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 + rhs.0)
    }
}

impl AddAssign for Scalar {
    fn add_assign(&mut self, rhs: Scalar) {
        self.0 += rhs.0;
    }
}

impl Sub for Scalar {
    type Output = Scalar;
    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 - rhs.0)
    }
}

impl SubAssign for Scalar {
    fn sub_assign(&mut self, rhs: Scalar) {
        self.0 -= rhs.0;
    }
}

impl Mul for Scalar {
    type Output = Scalar;
    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 * rhs.0)
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Scalar(-self.0)
    }
}

/// An element of G, or the point at infinity. Defaults to infinity.
#[derive(Clone, Copy, Debug)]
pub struct Point(pub(crate) G1Projective);

impl Default for Point {
    fn default() -> Self {
        Self::infinity()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Point {}

/// Leading infinity-flag byte + the `arkworks` compressed affine body.
/// `arkworks`' own compressed encoding already distinguishes infinity
/// internally; the extra leading byte matches §3's explicit format and is
/// intentionally redundant (see SPEC_FULL.md §9, "extraneous infinity byte").
impl Point {
    fn compressed_body_len() -> usize {
        G1Affine::generator().compressed_size()
    }

    pub fn byte_size() -> usize {
        1 + Self::compressed_body_len()
    }

    pub fn infinity() -> Self {
        Self(G1Projective::zero())
    }

    pub fn generator() -> Self {
        Self(G1Projective::from(G1Affine::generator()))
    }

    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self(G1Projective::rand(rng))
    }

    pub fn is_infinity(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::byte_size());
        out.push(if self.is_infinity() { 1 } else { 0 });
        let affine = self.0.into_affine();
        affine
            .serialize_compressed(&mut out)
            .expect("serialization into a growable buffer cannot fail");
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let expected = Self::byte_size();
        if bytes.len() != expected {
            return Err(CodecError::WrongLength {
                expected,
                actual: bytes.len(),
            });
        }
        let infinity_flag = bytes[0];
        let affine = G1Affine::deserialize_compressed(&bytes[1..]).map_err(|_| CodecError::NotOnCurve)?;
        if infinity_flag == 1 {
            return Ok(Self::infinity());
        }
        if !affine.is_on_curve() || !affine.is_in_correct_subgroup_assuming_on_curve() {
            return Err(CodecError::NotOnCurve);
        }
        Ok(Self(G1Projective::from(affine)))
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point(self.0 + rhs.0)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.0 += rhs.0;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point(self.0 - rhs.0)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.0 -= rhs.0;
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point(-self.0)
    }
}

impl Mul<Scalar> for Point {
    type Output = Point;
    fn mul(self, rhs: Scalar) -> Point {
        Point(self.0 * rhs.0)
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;
    fn mul(self, rhs: Point) -> Point {
        Point(rhs.0 * self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> impl RngCore + CryptoRng {
        ark_std::test_rng()
    }

    #[test]
    fn scalar_roundtrips_through_bytes() {
        let s = Scalar::random(&mut rng());
        let bytes = s.to_bytes();
        assert_eq!(bytes.len(), Scalar::BYTE_SIZE);
        assert_eq!(Scalar::from_bytes(&bytes).unwrap(), s);
    }

    #[test]
    fn scalar_from_bytes_rejects_wrong_length() {
        assert!(Scalar::from_bytes(&[0u8; 31]).is_err());
    }

    #[test]
    fn point_roundtrips_through_bytes_both_forms() {
        let mut r = rng();
        let p = Point::random(&mut r);
        let bytes = p.to_bytes();
        assert_eq!(bytes.len(), Point::byte_size());
        assert_eq!(Point::from_bytes(&bytes).unwrap(), p);

        let inf = Point::infinity();
        let inf_bytes = inf.to_bytes();
        assert_eq!(inf_bytes[0], 1);
        assert_eq!(Point::from_bytes(&inf_bytes).unwrap(), Point::infinity());
    }

    #[test]
    fn scalar_mul_commutes_with_point_mul() {
        let mut r = rng();
        let a = Scalar::random(&mut r);
        let p = Point::random(&mut r);
        assert_eq!(p * a, a * p);
    }

    #[test]
    fn distributive_laws_hold() {
        let mut r = rng();
        let a = Scalar::random(&mut r);
        let b = Scalar::random(&mut r);
        let p = Point::random(&mut r);
        let q = Point::random(&mut r);

        assert_eq!(a * (p + q), a * p + a * q);
        assert_eq!((a + b) * p, a * p + b * p);
    }
}
