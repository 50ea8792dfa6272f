//! Twisted Edwards curve (Baby Jubjub) arithmetic.
//!
//! ## Overview
//!
//! This crate provides the elliptic curve group and the two prime fields
//! it is built from:
//!
//! - **Base field**: the BN254/alt_bn128 scalar field, in which curve
//!   coordinates live.
//! - **Scalar field**: the order of the curve's prime-order subgroup, used
//!   for exponents.
//! - **Affine point arithmetic**: a complete (exception-free) unified
//!   addition law, compression/decompression, and hash-to-curve generator
//!   derivation.
//!
//! ## Curve specification
//!
//! - **Equation**: `a*x^2 + y^2 = 1 + d*x^2*y^2`, `a = 168700`, `d = 168696`
//! - **Base field**: `p = 21888242871839275222246405745257275088548364400416034343698204186575808495617`
//! - **Scalar field**: `r = 2736030358979909402780800718157159386076813972158567259200215660948447373041`
//! - **Cofactor**: 8
//!
//! ## Quick start
//!
//! ```rust
//! use curve::{generators, Affine, Group, RandomField, ScalarField};
//! use rand::thread_rng;
//!
//! let mut rng = thread_rng();
//! let scalar = ScalarField::random(&mut rng);
//!
//! let point = generators::generator_g().scalar_mul(&scalar);
//! assert!(point.is_on_curve());
//!
//! let compressed = point.compress();
//! let recovered = Affine::decompress(&compressed).unwrap();
//! assert_eq!(point, recovered);
//! ```
//!
//! ## Oversized scalars
//!
//! Scalars sometimes arrive reduced modulo a larger enclosing field (the base
//! field) rather than the scalar field `r`. [`Affine::scalar_mul_biguint`]
//! applies the correction `n*P = (r-1)*P + (n+1-r)*P` for `n >= r`, which
//! keeps the action correct without requiring the caller to reduce first.

mod affine;
mod basefield;
mod error;
pub mod generators;
mod group;
mod msm;
mod random;
mod scalarfield;

pub use affine::Affine;
pub use basefield::BaseField;
pub use error::CurveError;
pub use group::{Group, ScalarBits};
pub use msm::double_scalar_mul_basepoint_affine;
pub use random::RandomField;
pub use scalarfield::ScalarField;
