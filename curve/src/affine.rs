//! Twisted Edwards curve (Baby Jubjub), embedded in the BN254/alt_bn128 scalar field.
//!
//! `a*x^2 + y^2 = 1 + d*x^2*y^2`, with `a = 168700`, `d = 168696`.
//! Base field: BN254 `Fr` (see [`crate::basefield`]). Prime-order subgroup order
//! `r` (see [`crate::scalarfield`]), cofactor 8.
//!
//! The addition law below is the standard unified twisted-Edwards formula; for
//! this curve's parameters it is complete (it handles doubling and the identity
//! without special-casing), so there is no separate infinity flag to track.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use num_bigint::BigUint;
use num_traits::One as _;
use serde::{Deserialize, Serialize};

use crate::basefield::BaseField;
use crate::error::CurveError;
use crate::group::Group;
use crate::scalarfield::ScalarField;

/// A point on the curve in affine coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affine {
    pub x: BaseField,
    pub y: BaseField,
}

impl Affine {
    /// Curve coefficient `a`.
    #[inline]
    pub fn curve_a() -> BaseField {
        BaseField::from_u64(168700)
    }

    /// Curve coefficient `d`.
    #[inline]
    pub fn curve_d() -> BaseField {
        BaseField::from_u64(168696)
    }

    /// Cofactor of the curve's full point group relative to the prime-order subgroup.
    pub const COFACTOR: u64 = 8;

    /// The identity element, `(0, 1)`.
    pub fn identity() -> Self {
        Affine {
            x: BaseField::zero(),
            y: BaseField::one(),
        }
    }

    /// Build a point from raw coordinates without checking it lies on the curve.
    pub fn new_unchecked(x: BaseField, y: BaseField) -> Self {
        Affine { x, y }
    }

    /// Whether this point is the identity.
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == BaseField::one()
    }

    /// Whether the point satisfies the curve equation.
    pub fn is_on_curve(&self) -> bool {
        let x2 = &self.x * &self.x;
        let y2 = &self.y * &self.y;
        let lhs = &(&Self::curve_a() * &x2) + &y2;
        let rhs = &BaseField::one() + &(&Self::curve_d() * &(&x2 * &y2));
        lhs == rhs
    }

    /// Whether the point lies in the prime-order subgroup: `r * P == identity`.
    pub fn is_in_prime_order_subgroup(&self) -> bool {
        self.scalar_mul_biguint(&crate::scalarfield::MODULUS).is_identity()
    }

    /// Unified addition law, exact for doubling and identity as well.
    pub fn add_points(p: &Affine, q: &Affine) -> Affine {
        let a = Self::curve_a();
        let d = Self::curve_d();

        let x1y2 = &p.x * &q.y;
        let y1x2 = &p.y * &q.x;
        let x1x2 = &p.x * &q.x;
        let y1y2 = &p.y * &q.y;
        let dxy = &d * &(&x1x2 * &y1y2);

        let num_x = &x1y2 + &y1x2;
        let denom_x = &BaseField::one() + &dxy;
        let x3 = &num_x / &denom_x;

        let num_y = &y1y2 - &(&a * &x1x2);
        let denom_y = &BaseField::one() - &dxy;
        let y3 = &num_y / &denom_y;

        Affine { x: x3, y: y3 }
    }

    /// Point doubling. Uses the same complete addition law as [`Self::add_points`].
    pub fn double(&self) -> Self {
        Self::add_points(self, self)
    }

    /// Point negation: `(-x, y)`.
    pub fn negate(&self) -> Self {
        Affine {
            x: self.x.negate(),
            y: self.y.clone(),
        }
    }

    /// Scalar multiplication by an arbitrary non-negative integer, applying the
    /// oversized-scalar identity `n*P = (r-1)*P + (n+1-r)*P` whenever `n >= r`.
    /// This matters when a scalar originates from a larger enclosing field
    /// (e.g. a hash output reduced mod the base field rather than the scalar
    /// field) and must still act correctly as a group exponent.
    pub fn scalar_mul_biguint(&self, n: &BigUint) -> Self {
        if ScalarField::exceeds_subgroup_order(n) {
            let r = &*crate::scalarfield::MODULUS;
            let a = ScalarField::from_biguint(r - BigUint::one());
            let b = ScalarField::from_biguint(n + BigUint::one() - r);
            self.scalar_mul(&a) + self.scalar_mul(&b)
        } else {
            self.scalar_mul(&ScalarField::from_biguint(n.clone()))
        }
    }

    /// Compress to 32 bytes: the y-coordinate, little-endian, with the curve's
    /// sign convention for `x` (its least-significant bit) folded into the
    /// otherwise-unused top bit of the encoding.
    pub fn compress(&self) -> [u8; 32] {
        let mut bytes = self.y.to_bytes_le();
        if self.x.as_biguint().bit(0) {
            bytes[31] |= 0x80;
        }
        bytes
    }

    /// Decompress from the format produced by [`Self::compress`].
    pub fn decompress(bytes: &[u8; 32]) -> Result<Self, CurveError> {
        let sign = bytes[31] & 0x80 != 0;
        let mut y_bytes = *bytes;
        y_bytes[31] &= 0x7f;
        let y = BaseField::from_bytes_le(&y_bytes).ok_or(CurveError::InputDomain)?;

        let y2 = &y * &y;
        let one = BaseField::one();
        let numerator = &one - &y2;
        let denominator = &Self::curve_a() - &(&Self::curve_d() * &y2);
        if denominator.is_zero() {
            return Err(CurveError::CurveInvalid);
        }
        let x2 = &numerator / &denominator;
        let mut x = x2.sqrt().ok_or(CurveError::CurveInvalid)?;
        if x.as_biguint().bit(0) != sign {
            x = x.negate();
        }

        let point = Affine { x, y };
        if !point.is_on_curve() {
            return Err(CurveError::CurveInvalid);
        }
        Ok(point)
    }

    /// Try-and-increment hash-to-curve, cofactor-cleared into the prime-order
    /// subgroup. Used to derive independent generators from a domain tag
    /// rather than hardcoding coordinates that can't be verified without
    /// running the curve arithmetic.
    pub fn hash_to_curve(domain: &[u8]) -> Self {
        use blake2::digest::{Update, VariableOutput};
        use blake2::Blake2bVar;

        let mut counter: u64 = 0;
        loop {
            let mut hasher = Blake2bVar::new(32).expect("32 is a valid blake2b output length");
            hasher.update(domain);
            hasher.update(&counter.to_le_bytes());
            let mut out = [0u8; 32];
            hasher.finalize_variable(&mut out).expect("output buffer is correctly sized");
            // Clear the top two bits so the candidate is always < p (p is a 254-bit prime).
            out[31] &= 0x3f;

            if let Ok(candidate) = Self::decompress(&out) {
                let cleared = candidate.scalar_mul_u64(Self::COFACTOR);
                if !cleared.is_identity() {
                    return cleared;
                }
            }
            counter += 1;
        }
    }

    fn scalar_mul_u64(&self, n: u64) -> Self {
        <Self as Group>::mul_u64(self, n)
    }
}

impl Group for Affine {
    type Scalar = ScalarField;

    #[inline]
    fn identity() -> Self {
        Affine::identity()
    }

    #[inline]
    fn is_identity(&self) -> bool {
        Affine::is_identity(self)
    }

    #[inline]
    fn generator() -> Self {
        crate::generators::generator_g()
    }

    #[inline]
    fn double(&self) -> Self {
        Affine::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Affine::negate(self)
    }
}

impl Add for Affine {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Affine::add_points(&self, &other)
    }
}
impl Add for &Affine {
    type Output = Affine;
    fn add(self, other: Self) -> Affine {
        Affine::add_points(self, other)
    }
}
impl AddAssign for Affine {
    fn add_assign(&mut self, other: Self) {
        *self = Affine::add_points(self, &other);
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Affine {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}
impl SubAssign for Affine {
    fn sub_assign(&mut self, other: Self) {
        *self = self.clone() - other;
    }
}

impl Neg for Affine {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<ScalarField> for Affine {
    type Output = Self;
    fn mul(self, scalar: ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}
impl Mul<&ScalarField> for Affine {
    type Output = Self;
    fn mul(self, scalar: &ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}
impl Mul<Affine> for ScalarField {
    type Output = Affine;
    fn mul(self, point: Affine) -> Affine {
        <Affine as Group>::scalar_mul(&point, &self)
    }
}
impl Mul<&Affine> for ScalarField {
    type Output = Affine;
    fn mul(self, point: &Affine) -> Affine {
        <Affine as Group>::scalar_mul(point, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_on_curve() {
        let id = Affine::identity();
        assert!(id.is_on_curve());
        assert!(id.is_identity());
    }

    #[test]
    fn generator_on_curve_and_not_identity() {
        let g = crate::generators::generator_g();
        assert!(g.is_on_curve());
        assert!(!g.is_identity());
    }

    #[test]
    fn addition_with_identity_is_noop() {
        let g = crate::generators::generator_g();
        let id = Affine::identity();
        assert_eq!(g.clone() + id.clone(), g);
        assert_eq!(id + g.clone(), g);
    }

    #[test]
    fn doubling_matches_self_addition() {
        let g = crate::generators::generator_g();
        let g2 = g.double();
        assert!(g2.is_on_curve());
        assert_eq!(g.clone() + g.clone(), g2);
    }

    #[test]
    fn negation_cancels() {
        let g = crate::generators::generator_g();
        let neg_g = g.negate();
        assert!(neg_g.is_on_curve());
        assert_eq!(g + neg_g, Affine::identity());
    }

    #[test]
    fn scalar_mul_matches_repeated_addition() {
        let g = crate::generators::generator_g();
        let five = ScalarField::from_u64(5);
        let result = g.scalar_mul(&five);
        let expected = g.clone() + g.clone() + g.clone() + g.clone() + g.clone();
        assert_eq!(result, expected);
    }

    #[test]
    fn scalar_mul_zero_and_one() {
        let g = crate::generators::generator_g();
        assert_eq!(g.scalar_mul(&ScalarField::zero()), Affine::identity());
        assert_eq!(g.scalar_mul(&ScalarField::one()), g);
    }

    #[test]
    fn scalar_mul_distributes_over_addition() {
        let g = crate::generators::generator_g();
        let a = ScalarField::from_u64(12345);
        let b = ScalarField::from_u64(67890);
        let lhs = g.scalar_mul(&(a.clone() + b.clone()));
        let rhs = g.scalar_mul(&a) + g.scalar_mul(&b);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn windowed_matches_double_and_add() {
        let g = crate::generators::generator_g();
        let scalar = ScalarField::from_u64(123456);
        assert_eq!(g.scalar_mul(&scalar), g.scalar_mul_windowed(&scalar));
    }

    #[test]
    fn compress_decompress_roundtrip() {
        let g = crate::generators::generator_g();
        let bytes = g.compress();
        let back = Affine::decompress(&bytes).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn decompress_rejects_non_curve_points() {
        // All-zero y with a forced sign bit does not correspond to a valid point
        // with that sign (identity's x is 0, with sign bit clear).
        let mut bytes = [0u8; 32];
        bytes[31] = 0x80;
        assert!(Affine::decompress(&bytes).is_err());
    }

    #[test]
    fn oversized_scalar_matches_reduced_scalar() {
        let g = crate::generators::generator_g();
        let r = &*crate::scalarfield::MODULUS;
        let n = r + BigUint::from(5u8);
        let reduced = ScalarField::from_biguint(n.clone());
        assert_eq!(g.scalar_mul_biguint(&n), g.scalar_mul(&reduced));
    }

    #[test]
    fn hash_to_curve_is_in_subgroup() {
        let p = Affine::hash_to_curve(b"test-domain");
        assert!(p.is_on_curve());
        assert!(p.is_in_prime_order_subgroup());
        assert!(!p.is_identity());
    }

    #[test]
    fn distinct_domains_give_distinct_points() {
        let p1 = Affine::hash_to_curve(b"domain-one");
        let p2 = Affine::hash_to_curve(b"domain-two");
        assert_ne!(p1, p2);
    }
}
