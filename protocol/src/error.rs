//! Errors produced by transaction construction, verification, and codec use.

use curve::CurveError;
use mmr::MmrError;
use thiserror::Error;
use txo::{OracleError, TxoError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Mmr(#[from] MmrError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Txo(#[from] TxoError),

    /// The Mimblewimble balance equation did not hold.
    #[error("balance equation does not hold: inputs + excess != outputs + fee*H")]
    Imbalance,

    /// A Schnorr check failed, for a partial or an aggregated signature.
    #[error("Schnorr signature does not verify")]
    SignatureInvalid,

    /// A builder's `build()` was called before every required field was set.
    #[error("builder is missing required field: {0}")]
    IncompleteBuilder(&'static str),

    /// A wire-format buffer had the wrong length or an invalid point encoding.
    #[error("malformed wire encoding: {0}")]
    Codec(&'static str),
}
