//! Errors produced while constructing or proving about a TXO.

use thiserror::Error;

use crate::oracle::OracleError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TxoError {
    /// A constructed commitment did not equal `r*G + v*H` for the given
    /// secrets.
    #[error("commitment does not equal r*G + v*H")]
    CommitmentMismatch,

    /// An operation needed the blinding factor `r` but this TXO only knows
    /// its public key.
    #[error("this TXO's blinding factor r is not known")]
    MissingBlindingFactor,

    /// An operation needed the value `v` but this TXO does not know it.
    #[error("this TXO's value v is not known")]
    MissingValue,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}
