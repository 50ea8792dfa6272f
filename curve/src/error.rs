//! Errors produced by curve and field operations.

use thiserror::Error;

/// Failures that can occur while constructing or operating on curve points
/// and field elements.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum CurveError {
    /// An input value fell outside the domain an operation requires (e.g. a
    /// byte string that is not a canonical field encoding).
    #[error("input value is outside the required domain")]
    InputDomain,

    /// A compressed or constructed point does not lie on the curve, or does
    /// not lie in the prime-order subgroup.
    #[error("point is not a valid curve point")]
    CurveInvalid,
}
