//! The two-party send/receive transaction protocol: request/response
//! builders, the domain-separated challenge, balance checking, and
//! aggregated Schnorr signing. Ported from
//! `original_source/py934/mimblewimble.py`'s `SendTxBuilder`/`TxSend` and
//! `ReceiveTxBuilder`/`TxReceive`, updated to the tag/MMR-based `Request`
//! shape (no `hh_inputs`/`hh_changes`).

use curve::{generators, Affine, BaseField, Group, ScalarField};
use num_bigint::BigUint;
use tracing::{debug, instrument};
use txo::{Output, Prover};

use crate::error::ProtocolError;
use crate::oracle::{args, Proof};
use crate::pedersen_hash::pedersen_hash_bits;

/// `(s, R)`: closed under componentwise addition, which is how sender and
/// receiver aggregate their partial signatures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub s: ScalarField,
    pub r: Affine,
}

impl std::ops::Add for Signature {
    type Output = Signature;
    fn add(self, rhs: Self) -> Signature {
        Signature {
            s: self.s + rhs.s,
            r: self.r + rhs.r,
        }
    }
}
impl std::ops::Add for &Signature {
    type Output = Signature;
    fn add(self, rhs: Self) -> Signature {
        Signature {
            s: &self.s + &rhs.s,
            r: &self.r + &rhs.r,
        }
    }
}

/// The public, non-secret part of a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Kernel {
    pub excess: Affine,
    pub signature: Signature,
    pub fee: ScalarField,
    pub metadata: ScalarField,
}

/// Two input tags and the output commitments. Missing inputs are padded
/// with the tag of a dummy `(r=0, v=0)` TXO.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Body {
    pub input_tags: [BaseField; 2],
    pub outputs: [Affine; 2],
}

/// A fully assembled, verified transaction.
#[derive(Clone, Debug)]
pub struct Transaction {
    pub kernel: Kernel,
    pub body: Body,
    pub range_proofs: Vec<Proof>,
    pub inclusion_proofs: Vec<Proof>,
    pub mw_proof: Option<Proof>,
}

impl Transaction {
    /// Assemble and verify a transaction: both the balance equation and the
    /// aggregated Schnorr signature are checked before construction
    /// succeeds, so a caller can never hold an invalid `Transaction`.
    #[instrument(skip(signature))]
    pub fn new(
        excess: Affine,
        signature: Signature,
        fee: ScalarField,
        metadata: ScalarField,
        input_commitments: [Affine; 2],
        output_commitments: [Affine; 2],
        input_tags: [BaseField; 2],
    ) -> Result<Self, ProtocolError> {
        let lhs = &(&input_commitments[0] + &input_commitments[1]) + &excess;
        let rhs = &(&output_commitments[0] + &output_commitments[1])
            + &generators::generator_h().scalar_mul(&fee);
        if lhs != rhs {
            return Err(ProtocolError::Imbalance);
        }

        let e = challenge(&excess, &signature.r, &fee, &metadata);
        let lhs_sig = generators::generator_g().scalar_mul(&signature.s);
        let rhs_sig = &signature.r + &excess.scalar_mul(&e);
        if lhs_sig != rhs_sig {
            return Err(ProtocolError::SignatureInvalid);
        }

        debug!("transaction balance and signature both verified");
        Ok(Transaction {
            kernel: Kernel {
                excess,
                signature,
                fee,
                metadata,
            },
            body: Body {
                input_tags,
                outputs: output_commitments,
            },
            range_proofs: Vec::new(),
            inclusion_proofs: Vec::new(),
            mw_proof: None,
        })
    }

    /// The Fiat-Shamir challenge this transaction's signature was produced
    /// (and verified) against.
    pub fn challenge(&self) -> ScalarField {
        challenge(
            &self.kernel.excess,
            &self.kernel.signature.r,
            &self.kernel.fee,
            &self.kernel.metadata,
        )
    }
}

/// Everything the receiver needs to compute its own excess contribution,
/// sign, and reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub value: ScalarField,
    pub fee: ScalarField,
    pub hh_sig_salt: Affine,
    pub hh_excess: Affine,
    pub metadata: ScalarField,
}

/// The receiver's reply: its output commitment, its excess contribution,
/// and its half of the aggregated signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub hh_output: Affine,
    pub hh_excess: Affine,
    pub signature: Signature,
    pub range_proof: Proof,
}

/// The domain-separated Fiat-Shamir challenge:
/// `pedersen_hash_bits("Ethereum934", reverse(metadata ++ fee ++ R.y ++ X.y)).y`.
pub fn challenge(excess: &Affine, nonce: &Affine, fee: &ScalarField, metadata: &ScalarField) -> ScalarField {
    let mut bits = Vec::with_capacity(1016);
    bits.extend(metadata.to_bits());
    bits.extend(fee.to_bits());
    bits.extend(nonce.y.to_bits());
    bits.extend(excess.y.to_bits());
    bits.reverse();
    assert_eq!(bits.len(), 1016, "challenge input must be exactly 1016 bits");

    let hashed = pedersen_hash_bits(b"Ethereum934", &bits);
    ScalarField::from_biguint(hashed.y.as_biguint().clone())
}

/// Accumulates the fields `TxSend::build()` needs; rejects an incomplete
/// configuration with a field-level error rather than silently defaulting.
#[derive(Default)]
pub struct TxSendBuilder {
    value: Option<ScalarField>,
    fee: Option<ScalarField>,
    input: Option<Output>,
    change: Option<Output>,
    metadata: Option<ScalarField>,
    sig_salt: Option<ScalarField>,
}

impl TxSendBuilder {
    pub fn new() -> Self {
        TxSendBuilder::default()
    }

    pub fn value(mut self, value: ScalarField) -> Self {
        self.value = Some(value);
        self
    }

    pub fn fee(mut self, fee: ScalarField) -> Self {
        self.fee = Some(fee);
        self
    }

    pub fn input(mut self, input: Output) -> Self {
        self.input = Some(input);
        self
    }

    pub fn change(mut self, change: Output) -> Self {
        self.change = Some(change);
        self
    }

    pub fn metadata(mut self, metadata: ScalarField) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn sig_salt(mut self, sig_salt: ScalarField) -> Self {
        self.sig_salt = Some(sig_salt);
        self
    }

    pub fn build(self) -> Result<TxSend, ProtocolError> {
        let value = self.value.ok_or(ProtocolError::IncompleteBuilder("value"))?;
        let fee = self.fee.ok_or(ProtocolError::IncompleteBuilder("fee"))?;
        let input = self.input.ok_or(ProtocolError::IncompleteBuilder("input"))?;
        let change = self.change.ok_or(ProtocolError::IncompleteBuilder("change"))?;
        let sig_salt = self
            .sig_salt
            .ok_or(ProtocolError::IncompleteBuilder("sig_salt"))?;
        let metadata = self.metadata.unwrap_or_else(ScalarField::zero);

        let input_value = input
            .v()
            .ok_or(ProtocolError::IncompleteBuilder("input.v"))?
            .clone();
        let change_value = change
            .v()
            .ok_or(ProtocolError::IncompleteBuilder("change.v"))?
            .clone();
        let total_out = value.clone() + fee.clone() + change_value;
        if input_value != total_out {
            return Err(ProtocolError::Imbalance);
        }

        Ok(TxSend {
            value,
            fee,
            input,
            change,
            metadata,
            sig_salt,
        })
    }
}

/// Sender state S-INIT/S-REQ: holds the spent input and change output,
/// ready to emit a [`Request`] and, once merged with the receiver's
/// [`Response`], a complete [`Transaction`] (S-MERGED).
pub struct TxSend {
    value: ScalarField,
    fee: ScalarField,
    input: Output,
    change: Output,
    metadata: ScalarField,
    sig_salt: ScalarField,
}

impl TxSend {
    pub fn builder() -> TxSendBuilder {
        TxSendBuilder::new()
    }

    /// `r_change - r_input`.
    pub fn excess(&self) -> Result<ScalarField, ProtocolError> {
        let r_input = self
            .input
            .r()
            .ok_or(ProtocolError::IncompleteBuilder("input.r"))?;
        let r_change = self
            .change
            .r()
            .ok_or(ProtocolError::IncompleteBuilder("change.r"))?;
        Ok(r_change - r_input)
    }

    pub fn hh_excess(&self) -> Result<Affine, ProtocolError> {
        Ok(generators::generator_g().scalar_mul(&self.excess()?))
    }

    pub fn hh_sig_salt(&self) -> Affine {
        generators::generator_g().scalar_mul(&self.sig_salt)
    }

    #[instrument(skip(self))]
    pub fn request(&self) -> Result<Request, ProtocolError> {
        Ok(Request {
            value: self.value.clone(),
            fee: self.fee.clone(),
            hh_sig_salt: self.hh_sig_salt(),
            hh_excess: self.hh_excess()?,
            metadata: self.metadata.clone(),
        })
    }

    /// Fold the receiver's [`Response`] into a complete, verified
    /// [`Transaction`], computing the balance-proof circuit's witness along
    /// the way (it is the only point at which both the input secrets and
    /// the final aggregated signature are simultaneously in scope).
    #[instrument(skip(self, response, prover))]
    pub fn merge(&self, response: Response, prover: &dyn Prover) -> Result<Transaction, ProtocolError> {
        let dummy = Output::dummy();

        let aggregated_excess = self.hh_excess()? + response.hh_excess.clone();
        let aggregated_nonce = self.hh_sig_salt() + response.signature.r.clone();
        let e = challenge(&aggregated_excess, &aggregated_nonce, &self.fee, &self.metadata);

        let my_signature = Signature {
            s: &self.sig_salt + &(&e * &self.excess()?),
            r: self.hh_sig_salt(),
        };
        let aggregated_signature = my_signature + response.signature.clone();

        let input_tags = [self.input.tag()?, dummy.tag()?];
        let tx = Transaction::new(
            aggregated_excess,
            aggregated_signature,
            self.fee.clone(),
            self.metadata.clone(),
            [self.input.commitment().clone(), dummy.commitment().clone()],
            [self.change.commitment().clone(), response.hh_output.clone()],
            input_tags,
        )?;

        debug!("computing mimblewimble balance-proof witness");
        let r_inputs = [
            self.input.r().ok_or(ProtocolError::IncompleteBuilder("input.r"))?,
            dummy.r().ok_or(ProtocolError::IncompleteBuilder("dummy.r"))?,
        ];
        let v_inputs = [
            self.input.v().ok_or(ProtocolError::IncompleteBuilder("input.v"))?,
            dummy.v().ok_or(ProtocolError::IncompleteBuilder("dummy.v"))?,
        ];
        let s_bytes = tx.kernel.signature.s.to_bytes_le();
        let s_lo = BigUint::from_bytes_le(&s_bytes[..16]);
        let s_hi = BigUint::from_bytes_le(&s_bytes[16..]);
        let mw_args = args::mimblewimble_args(
            &tx.kernel.fee,
            &tx.kernel.metadata,
            [&tx.body.input_tags[0], &tx.body.input_tags[1]],
            [&tx.body.outputs[0], &tx.body.outputs[1]],
            &tx.kernel.signature.r,
            &tx.kernel.excess,
            &s_lo,
            &s_hi,
            r_inputs,
            v_inputs,
        );
        let mw_proof = prover.prove(txo::CircuitId::Mimblewimble, &mw_args)?;

        let mut tx = tx;
        tx.mw_proof = Some(mw_proof);
        Ok(tx)
    }
}

/// Accumulates the fields `TxReceive::build()` needs.
#[derive(Default)]
pub struct TxReceiveBuilder {
    request: Option<Request>,
    output: Option<Output>,
    sig_salt: Option<ScalarField>,
}

impl TxReceiveBuilder {
    pub fn new() -> Self {
        TxReceiveBuilder::default()
    }

    pub fn request(mut self, request: Request) -> Self {
        self.request = Some(request);
        self
    }

    pub fn output(mut self, output: Output) -> Self {
        self.output = Some(output);
        self
    }

    pub fn sig_salt(mut self, sig_salt: ScalarField) -> Self {
        self.sig_salt = Some(sig_salt);
        self
    }

    pub fn build(self) -> Result<TxReceive, ProtocolError> {
        let request = self
            .request
            .ok_or(ProtocolError::IncompleteBuilder("request"))?;
        let output = self.output.ok_or(ProtocolError::IncompleteBuilder("output"))?;
        let sig_salt = self
            .sig_salt
            .ok_or(ProtocolError::IncompleteBuilder("sig_salt"))?;

        let output_value = output.v().ok_or(ProtocolError::IncompleteBuilder("output.v"))?;
        if request.value != *output_value {
            return Err(ProtocolError::IncompleteBuilder("output.v != request.value"));
        }

        Ok(TxReceive {
            request,
            output,
            sig_salt,
        })
    }
}

/// Receiver state R-INIT/R-DONE: holds the request and its own output,
/// ready to emit a [`Response`].
pub struct TxReceive {
    request: Request,
    output: Output,
    sig_salt: ScalarField,
}

impl TxReceive {
    pub fn builder() -> TxReceiveBuilder {
        TxReceiveBuilder::new()
    }

    pub fn challenge(&self) -> Result<ScalarField, ProtocolError> {
        let public_key = self.output.public_key()?;
        let aggregated_excess = self.request.hh_excess.clone() + public_key;
        let sig_salt_point = generators::generator_g().scalar_mul(&self.sig_salt);
        let aggregated_nonce = self.request.hh_sig_salt.clone() + sig_salt_point;
        Ok(challenge(
            &aggregated_excess,
            &aggregated_nonce,
            &self.request.fee,
            &self.request.metadata,
        ))
    }

    pub fn signature(&self) -> Result<Signature, ProtocolError> {
        let e = self.challenge()?;
        let r_out = self
            .output
            .r()
            .ok_or(ProtocolError::IncompleteBuilder("output.r"))?;
        Ok(Signature {
            s: &self.sig_salt + &(&e * r_out),
            r: generators::generator_g().scalar_mul(&self.sig_salt),
        })
    }

    #[instrument(skip(self, prover))]
    pub fn response(&self, prover: &dyn Prover) -> Result<Response, ProtocolError> {
        let signature = self.signature()?;
        let range_proof = self.output.range_proof(prover)?.clone();
        let hh_excess = self.output.public_key()?;
        Ok(Response {
            hh_output: self.output.commitment().clone(),
            hh_excess,
            signature,
            range_proof,
        })
    }
}
