//! Errors produced by MMR construction and verification.

use thiserror::Error;

/// Failures that can occur while building or verifying the accumulator.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum MmrError {
    /// A peak-existence bit disagreed with the corresponding peak slot (an
    /// empty slot claimed to exist, or a populated slot claimed not to), or
    /// the width decomposition implied by the peaks was otherwise inconsistent.
    #[error("MMR peak/width invariant violated")]
    MmrInvariant,

    /// A recomputed root or cursor did not match the claimed value during
    /// inclusion verification.
    #[error("MMR inclusion proof does not match the claimed root")]
    InclusionMismatch,
}
