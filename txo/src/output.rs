//! Pedersen-committed transaction outputs.
//!
//! A TXO is `(r, v, C)` with `C = r*G + v*H`: `r` and `v` are the blinding
//! factor and value, both private; `C` (or just its `y`-coordinate) is the
//! public commitment. `r` and `v` are each optional on the in-memory struct
//! because a TXO reconstructed from a counterparty's public key knows `C`
//! without knowing `r`.

use curve::{generators, Affine, Group, ScalarField};
use num_bigint::BigUint;
use once_cell::sync::OnceCell;
use rand::Rng;
use tracing::{debug, instrument};

use crate::error::TxoError;
use crate::oracle::{CircuitId, Proof, Prover};

/// A Pedersen-committed output. Lazily computed `deposit_proof`/`range_proof`
/// are memoized in [`OnceCell`]s: at most one oracle call per TXO per circuit.
#[derive(Clone, Debug)]
pub struct Output {
    r: Option<ScalarField>,
    v: Option<ScalarField>,
    public_key: Option<Affine>,
    commitment: Affine,
    deposit_proof: OnceCell<Proof>,
    range_proof: OnceCell<Proof>,
}

impl Output {
    /// A fresh output of value `v`, drawing its blinding factor uniformly
    /// from `[1, r)` (never zero: a zero blinding factor would make the
    /// commitment's hiding property vacuous).
    pub fn new<R: Rng>(v: ScalarField, rng: &mut R) -> Self {
        let r = ScalarField::random_range(rng, &BigUint::from(1u8), ScalarField::subgroup_order());
        Self::from_secrets(r, v)
    }

    /// Construct a TXO from known secrets, computing `C = r*G + v*H`.
    pub fn from_secrets(r: ScalarField, v: ScalarField) -> Self {
        let commitment = generators::generator_g().scalar_mul(&r) + generators::generator_h().scalar_mul(&v);
        Output {
            r: Some(r),
            v: Some(v),
            public_key: None,
            commitment,
            deposit_proof: OnceCell::new(),
            range_proof: OnceCell::new(),
        }
    }

    /// Construct a TXO from a counterparty's public key `R = r*G` and a
    /// known value, without ever learning `r`. Used by a receiver
    /// reconstructing the sender's side of a transaction.
    pub fn from_public_key_with_value(public_key: Affine, v: ScalarField) -> Self {
        let commitment = &public_key + &generators::generator_h().scalar_mul(&v);
        Output {
            r: None,
            v: Some(v),
            public_key: Some(public_key),
            commitment,
            deposit_proof: OnceCell::new(),
            range_proof: OnceCell::new(),
        }
    }

    /// Construct a TXO directly from a commitment whose secrets are
    /// entirely unknown to this party (e.g. another party's output, seen
    /// only as a point). Checked against `r`/`v` when both are supplied.
    pub fn from_commitment(
        r: Option<ScalarField>,
        v: Option<ScalarField>,
        commitment: Affine,
    ) -> Result<Self, TxoError> {
        if let (Some(r), Some(v)) = (&r, &v) {
            let expected =
                generators::generator_g().scalar_mul(r) + generators::generator_h().scalar_mul(v);
            if expected != commitment {
                return Err(TxoError::CommitmentMismatch);
            }
        }
        Ok(Output {
            r,
            v,
            public_key: None,
            commitment,
            deposit_proof: OnceCell::new(),
            range_proof: OnceCell::new(),
        })
    }

    /// The dummy `(r=0, v=0)` TXO used to pad a single-input send to two
    /// input slots.
    pub fn dummy() -> Self {
        Self::from_secrets(ScalarField::zero(), ScalarField::zero())
    }

    pub fn commitment(&self) -> &Affine {
        &self.commitment
    }

    pub fn r(&self) -> Option<&ScalarField> {
        self.r.as_ref()
    }

    pub fn v(&self) -> Option<&ScalarField> {
        self.v.as_ref()
    }

    /// `r*G`: known directly if this TXO was built from a public key, else
    /// derived from the known blinding factor.
    pub fn public_key(&self) -> Result<Affine, TxoError> {
        if let Some(public_key) = &self.public_key {
            return Ok(public_key.clone());
        }
        let r = self.r.as_ref().ok_or(TxoError::MissingBlindingFactor)?;
        Ok(generators::generator_g().scalar_mul(r))
    }

    /// The one-time spend tag `(r*C).y`. Requires the blinding factor.
    pub fn tag(&self) -> Result<curve::BaseField, TxoError> {
        let r = self.r.as_ref().ok_or(TxoError::MissingBlindingFactor)?;
        Ok(self.commitment.scalar_mul(r).y)
    }

    /// The memoized deposit proof, computing it on first access.
    #[instrument(skip(self, prover))]
    pub fn deposit_proof(&self, prover: &dyn Prover) -> Result<&Proof, TxoError> {
        let r = self.r.clone().ok_or(TxoError::MissingBlindingFactor)?;
        let v = self.v.clone().ok_or(TxoError::MissingValue)?;
        self.deposit_proof.get_or_try_init(|| {
            debug!("computing deposit proof");
            let args = deposit_args(&self.commitment, &v, &r);
            prover.prove(CircuitId::Deposit, &args).map_err(TxoError::from)
        })
    }

    /// The memoized range proof, computing it on first access.
    #[instrument(skip(self, prover))]
    pub fn range_proof(&self, prover: &dyn Prover) -> Result<&Proof, TxoError> {
        let r = self.r.clone().ok_or(TxoError::MissingBlindingFactor)?;
        let v = self.v.clone().ok_or(TxoError::MissingValue)?;
        self.range_proof.get_or_try_init(|| {
            debug!("computing range proof");
            let args = range_args(&self.commitment, &r, &v);
            prover.prove(CircuitId::Range, &args).map_err(TxoError::from)
        })
    }
}

impl PartialEq for Output {
    fn eq(&self, other: &Self) -> bool {
        self.r == other.r && self.v == other.v && self.commitment == other.commitment
    }
}
impl Eq for Output {}

/// Argument vector for the deposit circuit: `(C.y | v, r)`, public inputs
/// before the separator.
pub fn deposit_args(commitment: &Affine, v: &ScalarField, r: &ScalarField) -> Vec<BigUint> {
    vec![
        commitment.y.as_biguint().clone(),
        v.as_biguint().clone(),
        r.as_biguint().clone(),
    ]
}

/// Argument vector for the range circuit: `(C.y | r, v)`.
pub fn range_args(commitment: &Affine, r: &ScalarField, v: &ScalarField) -> Vec<BigUint> {
    vec![
        commitment.y.as_biguint().clone(),
        r.as_biguint().clone(),
        v.as_biguint().clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::NullProver;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_output_satisfies_commitment_invariant() {
        let mut rng = StdRng::seed_from_u64(1);
        let out = Output::new(ScalarField::from_u64(500), &mut rng);
        let expected = generators::generator_g().scalar_mul(out.r().unwrap())
            + generators::generator_h().scalar_mul(out.v().unwrap());
        assert_eq!(*out.commitment(), expected);
    }

    #[test]
    fn public_key_matches_r_times_g() {
        let mut rng = StdRng::seed_from_u64(2);
        let out = Output::new(ScalarField::from_u64(10), &mut rng);
        let expected = generators::generator_g().scalar_mul(out.r().unwrap());
        assert_eq!(out.public_key().unwrap(), expected);
    }

    #[test]
    fn from_public_key_with_value_has_no_blinding_factor() {
        let mut rng = StdRng::seed_from_u64(3);
        let secret = Output::new(ScalarField::from_u64(42), &mut rng);
        let public = Output::from_public_key_with_value(
            secret.public_key().unwrap(),
            secret.v().unwrap().clone(),
        );
        assert_eq!(*public.commitment(), *secret.commitment());
        assert!(public.tag().is_err());
    }

    #[test]
    fn tag_is_deterministic_given_secrets() {
        let out = Output::from_secrets(ScalarField::from_u64(7), ScalarField::from_u64(100));
        let tag_one = out.tag().unwrap();
        let tag_two = out.tag().unwrap();
        assert_eq!(tag_one, tag_two);
    }

    #[test]
    fn dummy_output_has_identity_commitment() {
        let dummy = Output::dummy();
        assert!(dummy.commitment().is_identity());
    }

    #[test]
    fn from_commitment_rejects_mismatched_secrets() {
        let commitment = generators::generator_g().scalar_mul(&ScalarField::from_u64(1));
        let result = Output::from_commitment(
            Some(ScalarField::from_u64(2)),
            Some(ScalarField::from_u64(0)),
            commitment,
        );
        assert!(result.is_err());
    }

    #[test]
    fn commitments_are_additively_homomorphic() {
        let a = Output::from_secrets(ScalarField::from_u64(11), ScalarField::from_u64(200));
        let b = Output::from_secrets(ScalarField::from_u64(22), ScalarField::from_u64(300));

        let summed_commitment = a.commitment().clone() + b.commitment().clone();
        let expected = generators::generator_g().scalar_mul(&(ScalarField::from_u64(11) + ScalarField::from_u64(22)))
            + generators::generator_h().scalar_mul(&(ScalarField::from_u64(200) + ScalarField::from_u64(300)));
        assert_eq!(summed_commitment, expected);
    }

    #[test]
    fn proofs_are_memoized() {
        let out = Output::from_secrets(ScalarField::from_u64(3), ScalarField::from_u64(50));
        let prover = NullProver;
        let first = out.deposit_proof(&prover).unwrap().clone();
        let second = out.deposit_proof(&prover).unwrap().clone();
        assert_eq!(first, second);
    }
}
