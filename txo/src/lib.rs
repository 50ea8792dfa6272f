//! Pedersen-committed transaction outputs (TXOs) and the proof oracle
//! adapter that supplies their deposit and range proofs.
//!
//! A TXO pairs a commitment `C = r*G + v*H` with lazily-memoized proofs of
//! its own well-formedness; the proofs are produced by an external prover
//! this crate only ferries fixed-shape arguments to (see [`oracle`]).

mod error;
mod oracle;
mod output;

pub use error::TxoError;
pub use oracle::{CircuitId, NullProver, OracleError, Proof, Prover};
pub use output::{deposit_args, range_args, Output};
