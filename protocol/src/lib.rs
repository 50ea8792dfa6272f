//! Two-party confidential transaction protocol over Pedersen-committed TXOs
//! and a Pedersen Merkle Mountain Range.
//!
//! Wires together [`curve`]'s group arithmetic, [`txo`]'s commitments and
//! proof memoization, and [`mmr`]'s accumulator into the sender/receiver
//! handshake: a sender builds a [`tx::Request`], the receiver answers with a
//! [`tx::Response`], and the sender folds that into a verified
//! [`tx::Transaction`] whose balance equation and aggregated Schnorr
//! signature have both already been checked.

mod codec;
mod error;
mod oracle;
mod pedersen_hash;
mod tx;

pub use error::ProtocolError;
pub use oracle::{args, OracleConfig};
pub use pedersen_hash::pedersen_hash_bits;
pub use tx::{
    challenge, Body, Kernel, Request, Response, Signature, Transaction, TxReceive,
    TxReceiveBuilder, TxSend, TxSendBuilder,
};
pub use txo::{CircuitId, NullProver, OracleError, Proof, Prover};
