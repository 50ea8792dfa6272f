//! The proof oracle adapter: an opaque interface to whatever external
//! zero-knowledge circuit backend proves deposit, range, and the other
//! circuits this protocol relies on. This crate's job stops at ferrying a
//! fixed-shape argument vector to the backend; it neither parses nor
//! verifies the bytes that come back.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which circuit a [`Prover::prove`] call targets. `RollUp` carries the
/// batch size `N` since the argument vector's shape depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircuitId {
    Deposit,
    Range,
    Mimblewimble,
    MmrInclusion,
    Withdraw,
    RollUp(u32),
}

/// Opaque proof payload. The core treats this as inert bytes; only the
/// external verifier gives it meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof(pub Vec<u8>);

impl Proof {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Failures surfaced by the proof oracle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The external prover returned an error or a proof the caller could
    /// not make sense of.
    #[error("proof oracle returned an error or malformed proof")]
    OracleFailure,
}

/// Adapter over an external proving system. Implementations decide how
/// `args` — an ordered list of field-element-sized integers, public inputs
/// first — reach whatever backend proves `circuit`.
///
/// `Send + Sync` because proof requests are expected to run concurrently
/// across independent TXOs, even though the rest of the core is
/// single-threaded.
pub trait Prover: Send + Sync {
    fn prove(&self, circuit: CircuitId, args: &[BigUint]) -> Result<Proof, OracleError>;
}

/// A prover that never contacts a real backend: it hands back an empty
/// stub proof for every request. Used to exercise memoization and the
/// transaction-building paths in tests without a real circuit available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProver;

impl Prover for NullProver {
    fn prove(&self, _circuit: CircuitId, _args: &[BigUint]) -> Result<Proof, OracleError> {
        Ok(Proof(Vec::new()))
    }
}
