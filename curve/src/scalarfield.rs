//! Scalar field of the curve: the prime-order subgroup size `r`.
//!
//! `r = 2736030358979909402780800718157159386076813972158567259200215660948447373041`
//!
//! Elements are kept as a canonical [`BigUint`] representative in `[0, r)`. Ordering
//! is defined over that canonical integer, not over any internal representation, so
//! `a < b` always matches the intuitive integer comparison.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_bigint::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// `r`, the order of the curve's prime-order subgroup.
pub static MODULUS: Lazy<BigUint> = Lazy::new(|| {
    "2736030358979909402780800718157159386076813972158567259200215660948447373041"
        .parse()
        .expect("scalar field modulus literal")
});

/// Number of bytes needed for a canonical little-endian encoding.
pub const NUM_BYTES: usize = 32;
/// Number of bits needed to represent any element of the field.
pub const NUM_BITS: usize = 254;

/// A scalar: an element of the curve's prime-order subgroup's scalar ring,
/// always kept in canonical form `[0, r)`.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScalarField(BigUint);

impl ScalarField {
    /// The additive identity.
    pub fn zero() -> Self {
        ScalarField(BigUint::zero())
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        ScalarField(BigUint::one())
    }

    /// Build a scalar from any non-negative integer, reducing mod `r`.
    pub fn from_biguint(n: BigUint) -> Self {
        ScalarField(n % &*MODULUS)
    }

    /// Build a scalar from a `u64`.
    pub fn from_u64(n: u64) -> Self {
        Self::from_biguint(BigUint::from(n))
    }

    /// The canonical representative in `[0, r)`.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Whether this scalar is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Additive inverse.
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            self.clone()
        } else {
            ScalarField(&*MODULUS - &self.0)
        }
    }

    /// Multiplicative inverse via Fermat's little theorem (`a^{r-2}`).
    ///
    /// Panics if `self` is zero.
    pub fn inverse(&self) -> Self {
        assert!(!self.is_zero(), "attempted to invert zero scalar");
        let exponent = &*MODULUS - BigUint::from(2u8);
        ScalarField(self.0.modpow(&exponent, &MODULUS))
    }

    /// A uniformly random scalar in `[lo, hi)`.
    ///
    /// Matches the sampling approach of the protocol this field backs: secrets
    /// are drawn from a bounded sub-range, not the whole field, so callers can
    /// exclude zero or reserve room for blinding arithmetic.
    pub fn random_range<R: Rng>(rng: &mut R, lo: &BigUint, hi: &BigUint) -> Self {
        assert!(lo < hi, "random_range requires lo < hi");
        let span = hi - lo;
        let candidate = crate::random::random_below(rng, &span);
        ScalarField::from_biguint(lo + candidate)
    }

    /// A uniformly random nonzero scalar in `[0, r)`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        loop {
            let candidate = crate::random::random_below(rng, &MODULUS);
            if !candidate.is_zero() {
                return ScalarField(candidate);
            }
        }
    }

    /// Little-endian bit decomposition, fixed at [`NUM_BITS`] bits (zero-padded).
    pub fn to_bits(&self) -> Vec<bool> {
        let mut bits = Vec::with_capacity(NUM_BITS);
        for i in 0..NUM_BITS {
            bits.push(self.0.bit(i as u64));
        }
        bits
    }

    /// Little-endian byte encoding, fixed at [`NUM_BYTES`] bytes.
    pub fn to_bytes_le(&self) -> [u8; NUM_BYTES] {
        let mut out = [0u8; NUM_BYTES];
        let bytes = self.0.to_bytes_le();
        out[..bytes.len()].copy_from_slice(&bytes);
        out
    }

    /// Parse a little-endian byte encoding. Rejects encodings `>= r`.
    pub fn from_bytes_le(bytes: &[u8; NUM_BYTES]) -> Option<Self> {
        let n = BigUint::from_bytes_le(bytes);
        if n >= *MODULUS {
            None
        } else {
            Some(ScalarField(n))
        }
    }

    /// Whether `n`, taken as an unreduced integer, is `>= r` and therefore needs
    /// the oversized-scalar correction when used to scale a curve point.
    pub fn exceeds_subgroup_order(n: &BigUint) -> bool {
        n >= &*MODULUS
    }

    /// The subgroup order `r` itself, for callers that need to draw a value
    /// from a sub-range of the full scalar field (e.g. `[1, r)`).
    pub fn subgroup_order() -> &'static BigUint {
        &MODULUS
    }
}

impl crate::group::ScalarBits for ScalarField {
    fn to_bits_le(&self) -> Vec<bool> {
        self.to_bits()
    }
}

impl Add for &ScalarField {
    type Output = ScalarField;
    fn add(self, rhs: Self) -> ScalarField {
        ScalarField((&self.0 + &rhs.0) % &*MODULUS)
    }
}
impl Add for ScalarField {
    type Output = ScalarField;
    fn add(self, rhs: Self) -> ScalarField {
        &self + &rhs
    }
}
impl AddAssign for ScalarField {
    fn add_assign(&mut self, rhs: Self) {
        *self = &*self + &rhs;
    }
}

impl Sub for &ScalarField {
    type Output = ScalarField;
    fn sub(self, rhs: Self) -> ScalarField {
        if self.0 >= rhs.0 {
            ScalarField(&self.0 - &rhs.0)
        } else {
            ScalarField(&*MODULUS - (&rhs.0 - &self.0))
        }
    }
}
impl Sub for ScalarField {
    type Output = ScalarField;
    fn sub(self, rhs: Self) -> ScalarField {
        &self - &rhs
    }
}
impl SubAssign for ScalarField {
    fn sub_assign(&mut self, rhs: Self) {
        *self = &*self - &rhs;
    }
}

impl Neg for ScalarField {
    type Output = ScalarField;
    fn neg(self) -> ScalarField {
        self.negate()
    }
}
impl Neg for &ScalarField {
    type Output = ScalarField;
    fn neg(self) -> ScalarField {
        self.negate()
    }
}

impl Mul for &ScalarField {
    type Output = ScalarField;
    fn mul(self, rhs: Self) -> ScalarField {
        ScalarField((&self.0 * &rhs.0) % &*MODULUS)
    }
}
impl Mul for ScalarField {
    type Output = ScalarField;
    fn mul(self, rhs: Self) -> ScalarField {
        &self * &rhs
    }
}
impl MulAssign for ScalarField {
    fn mul_assign(&mut self, rhs: Self) {
        *self = &*self * &rhs;
    }
}

/// Ordering over the canonical integer representative in `[0, r)`. This is
/// deliberately hand-written rather than derived: any internal representation
/// that isn't the canonical integer itself (e.g. a Montgomery form) would make
/// a derived `Ord` compare the wrong thing.
impl Ord for ScalarField {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}
impl PartialOrd for ScalarField {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for ScalarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for ScalarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ScalarField({})", self.0)
    }
}
