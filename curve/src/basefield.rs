//! Base field of the curve: the BN254/alt_bn128 scalar field, used throughout
//! the SNARK ecosystem this curve is embedded in.
//!
//! `p = 21888242871839275222246405745257275088548364400416034343698204186575808495617`

use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// `p`, the base field modulus (BN254 scalar field).
pub static MODULUS: Lazy<BigUint> = Lazy::new(|| {
    "21888242871839275222246405745257275088548364400416034343698204186575808495617"
        .parse()
        .expect("base field modulus literal")
});

/// Number of bytes needed for a canonical little-endian encoding.
pub const NUM_BYTES: usize = 32;
/// Number of bits needed to represent any element of the field.
pub const NUM_BITS: usize = 254;

/// An element of the curve's base field, always kept in canonical form `[0, p)`.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BaseField(BigUint);

impl BaseField {
    /// The additive identity.
    pub fn zero() -> Self {
        BaseField(BigUint::zero())
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        BaseField(BigUint::one())
    }

    /// Build a field element from any non-negative integer, reducing mod `p`.
    pub fn from_biguint(n: BigUint) -> Self {
        BaseField(n % &*MODULUS)
    }

    /// Build a field element from a `u64`.
    pub fn from_u64(n: u64) -> Self {
        Self::from_biguint(BigUint::from(n))
    }

    /// The element's canonical representative in `[0, p)`.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Whether this element is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Additive inverse.
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            self.clone()
        } else {
            BaseField(&*MODULUS - &self.0)
        }
    }

    /// Multiplicative inverse via Fermat's little theorem (`a^{p-2}`).
    ///
    /// Panics if `self` is zero; callers that may hit zero should check first.
    pub fn inverse(&self) -> Self {
        assert!(!self.is_zero(), "attempted to invert zero base field element");
        let exponent = &*MODULUS - BigUint::from(2u8);
        BaseField(self.0.modpow(&exponent, &MODULUS))
    }

    /// `self^exp mod p`.
    pub fn pow(&self, exp: &BigUint) -> Self {
        BaseField(self.0.modpow(exp, &MODULUS))
    }

    /// Legendre symbol: `1` if a nonzero quadratic residue, `p - 1` (i.e. `-1`) if a
    /// non-residue, `0` if `self` is zero.
    fn legendre(&self) -> BigUint {
        if self.is_zero() {
            return BigUint::zero();
        }
        let exp = (&*MODULUS - BigUint::one()) >> 1;
        self.0.modpow(&exp, &MODULUS)
    }

    /// Whether `self` is a nonzero quadratic residue mod `p`.
    pub fn is_square(&self) -> bool {
        !self.is_zero() && self.legendre() == BigUint::one()
    }

    /// Square root via Tonelli-Shanks. Returns `None` if `self` is not a
    /// quadratic residue. When a root exists, both `r` and `p - r` are roots;
    /// this returns the smaller of the two canonical representatives.
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(Self::zero());
        }
        if self.legendre() != BigUint::one() {
            return None;
        }

        let p_minus_one = &*MODULUS - BigUint::one();
        let mut q = p_minus_one.clone();
        let mut s: u64 = 0;
        while (&q).is_even() {
            q >>= 1;
            s += 1;
        }

        if s == 1 {
            // p ≡ 3 mod 4 fast path; unreachable for this particular modulus
            // (p ≡ 1 mod 4) but kept for robustness if the modulus ever changes.
            let exp = (&*MODULUS + BigUint::one()) >> 2;
            let root = self.0.modpow(&exp, &MODULUS);
            return Some(Self::canonical_sqrt_root(root));
        }

        // Find a quadratic non-residue z.
        let mut z = BigUint::from(2u8);
        let half = (&p_minus_one) / BigUint::from(2u8);
        loop {
            let ls = z.modpow(&half, &MODULUS);
            if ls == p_minus_one {
                break;
            }
            z += BigUint::one();
        }

        let mut m = s;
        let mut c = z.modpow(&q, &MODULUS);
        let mut t = self.0.modpow(&q, &MODULUS);
        let mut r = self.0.modpow(&((&q + BigUint::one()) >> 1), &MODULUS);

        loop {
            if t == BigUint::one() {
                return Some(Self::canonical_sqrt_root(r));
            }
            let mut i = 0u64;
            let mut temp = t.clone();
            while temp != BigUint::one() {
                temp = (&temp * &temp) % &*MODULUS;
                i += 1;
                if i == m {
                    return None;
                }
            }
            let exp = BigUint::from(1u8) << (m - i - 1);
            let b = c.modpow(&exp, &MODULUS);
            m = i;
            c = (&b * &b) % &*MODULUS;
            t = (&t * &c) % &*MODULUS;
            r = (&r * &b) % &*MODULUS;
        }
    }

    fn canonical_sqrt_root(root: BigUint) -> Self {
        let other = &*MODULUS - &root;
        if root <= other {
            BaseField(root)
        } else {
            BaseField(other)
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

    /// Parse a little-endian byte encoding. Rejects encodings `>= p`.
    pub fn from_bytes_le(bytes: &[u8; NUM_BYTES]) -> Option<Self> {
        let n = BigUint::from_bytes_le(bytes);
        if n >= *MODULUS {
            None
        } else {
            Some(BaseField(n))
        }
    }
}

impl Add for &BaseField {
    type Output = BaseField;
    fn add(self, rhs: Self) -> BaseField {
        BaseField((&self.0 + &rhs.0) % &*MODULUS)
    }
}
impl Add for BaseField {
    type Output = BaseField;
    fn add(self, rhs: Self) -> BaseField {
        &self + &rhs
    }
}
impl AddAssign for BaseField {
    fn add_assign(&mut self, rhs: Self) {
        *self = &*self + &rhs;
    }
}

impl Sub for &BaseField {
    type Output = BaseField;
    fn sub(self, rhs: Self) -> BaseField {
        if self.0 >= rhs.0 {
            BaseField(&self.0 - &rhs.0)
        } else {
            BaseField(&*MODULUS - (&rhs.0 - &self.0))
        }
    }
}
impl Sub for BaseField {
    type Output = BaseField;
    fn sub(self, rhs: Self) -> BaseField {
        &self - &rhs
    }
}
impl SubAssign for BaseField {
    fn sub_assign(&mut self, rhs: Self) {
        *self = &*self - &rhs;
    }
}

impl Neg for BaseField {
    type Output = BaseField;
    fn neg(self) -> BaseField {
        self.negate()
    }
}
impl Neg for &BaseField {
    type Output = BaseField;
    fn neg(self) -> BaseField {
        self.negate()
    }
}

impl Mul for &BaseField {
    type Output = BaseField;
    fn mul(self, rhs: Self) -> BaseField {
        BaseField((&self.0 * &rhs.0) % &*MODULUS)
    }
}
impl Mul for BaseField {
    type Output = BaseField;
    fn mul(self, rhs: Self) -> BaseField {
        &self * &rhs
    }
}
impl MulAssign for BaseField {
    fn mul_assign(&mut self, rhs: Self) {
        *self = &*self * &rhs;
    }
}

impl Div for &BaseField {
    type Output = BaseField;
    fn div(self, rhs: Self) -> BaseField {
        self * &rhs.inverse()
    }
}
impl Div for BaseField {
    type Output = BaseField;
    fn div(self, rhs: Self) -> BaseField {
        &self / &rhs
    }
}
impl DivAssign for BaseField {
    fn div_assign(&mut self, rhs: Self) {
        *self = &*self / &rhs;
    }
}

impl Display for BaseField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for BaseField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BaseField({})", self.0)
    }
}
