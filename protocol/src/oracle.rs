//! The proof oracle surface this crate's builders call through.
//!
//! The foundational types (`Prover`, `Proof`, `CircuitId`, `OracleError`) live
//! in the `txo` crate: `txo::Output`'s lazily-memoized proof fields need them,
//! and the workspace's dependency graph runs `curve -> txo -> protocol`, so
//! `txo` cannot depend back on `protocol` for them. This module re-exports
//! that vocabulary and adds what only the transaction layer needs: the
//! argument-ordering builders for the remaining circuits, and host
//! configuration.

use curve::{Affine, BaseField, ScalarField};
use num_bigint::BigUint;

pub use txo::{CircuitId, NullProver, OracleError, Proof, Prover};
pub use txo::{deposit_args, range_args};

/// Maps a circuit to whatever handle the host uses to reach its external
/// prover (a binary path, a URL, an in-process object reference — the core
/// doesn't care, hence `String`). Lets tests inject a [`NullProver`] instead.
#[derive(Debug, Clone, Default)]
pub struct OracleConfig {
    pub deposit: Option<String>,
    pub range: Option<String>,
    pub mimblewimble: Option<String>,
    pub mmr_inclusion: Option<String>,
    pub withdraw: Option<String>,
    pub roll_up: Option<String>,
}

/// Pure argument-vector builders, one per circuit, in the exact order the
/// external prover expects (public inputs before the separator).
pub mod args {
    use super::*;

    /// `mimblewimble(fee, metadata, T_0, T_1, C_{O_0}.x, C_{O_0}.y, C_{O_1}.x, C_{O_1}.y, R | X.x, X.y, s_lo, s_hi, r_{I_0}, r_{I_1}, v_{I_0}, v_{I_1})`
    #[allow(clippy::too_many_arguments)]
    pub fn mimblewimble_args(
        fee: &ScalarField,
        metadata: &ScalarField,
        input_tags: [&BaseField; 2],
        outputs: [&Affine; 2],
        nonce: &Affine,
        excess: &Affine,
        s_lo: &BigUint,
        s_hi: &BigUint,
        input_blindings: [&ScalarField; 2],
        input_values: [&ScalarField; 2],
    ) -> Vec<BigUint> {
        vec![
            fee.as_biguint().clone(),
            metadata.as_biguint().clone(),
            input_tags[0].as_biguint().clone(),
            input_tags[1].as_biguint().clone(),
            outputs[0].x.as_biguint().clone(),
            outputs[0].y.as_biguint().clone(),
            outputs[1].x.as_biguint().clone(),
            outputs[1].y.as_biguint().clone(),
            nonce.x.as_biguint().clone(),
            nonce.y.as_biguint().clone(),
            excess.x.as_biguint().clone(),
            excess.y.as_biguint().clone(),
            s_lo.clone(),
            s_hi.clone(),
            input_blindings[0].as_biguint().clone(),
            input_blindings[1].as_biguint().clone(),
            input_values[0].as_biguint().clone(),
            input_values[1].as_biguint().clone(),
        ]
    }

    /// `mmr-inclusion(root, tag | peaks.x[], peaks.y[], position, r, v, siblings.x[], siblings.y[])`
    #[allow(clippy::too_many_arguments)]
    pub fn mmr_inclusion_args(
        root: &BaseField,
        tag: &BaseField,
        peaks: &[Affine],
        position: u64,
        r: &ScalarField,
        v: &ScalarField,
        siblings: &[Affine],
    ) -> Vec<BigUint> {
        let mut out = vec![root.as_biguint().clone(), tag.as_biguint().clone()];
        out.extend(peaks.iter().map(|p| p.x.as_biguint().clone()));
        out.extend(peaks.iter().map(|p| p.y.as_biguint().clone()));
        out.push(BigUint::from(position));
        out.push(r.as_biguint().clone());
        out.push(v.as_biguint().clone());
        out.extend(siblings.iter().map(|p| p.x.as_biguint().clone()));
        out.extend(siblings.iter().map(|p| p.y.as_biguint().clone()));
        out
    }

    /// `withdraw(root, tag, v | r, peaks.x[], peaks.y[], position, siblings.x[], siblings.y[])`
    #[allow(clippy::too_many_arguments)]
    pub fn withdraw_args(
        root: &BaseField,
        tag: &BaseField,
        v: &ScalarField,
        r: &ScalarField,
        peaks: &[Affine],
        position: u64,
        siblings: &[Affine],
    ) -> Vec<BigUint> {
        let mut out = vec![
            root.as_biguint().clone(),
            tag.as_biguint().clone(),
            v.as_biguint().clone(),
            r.as_biguint().clone(),
        ];
        out.extend(peaks.iter().map(|p| p.x.as_biguint().clone()));
        out.extend(peaks.iter().map(|p| p.y.as_biguint().clone()));
        out.push(BigUint::from(position));
        out.extend(siblings.iter().map(|p| p.x.as_biguint().clone()));
        out.extend(siblings.iter().map(|p| p.y.as_biguint().clone()));
        out
    }

    /// `roll-up-N(old_root, width, items.x[2N], items.y[2N], new_root | peaks.x[], peaks.y[])`
    pub fn roll_up_args(
        old_root: &BaseField,
        width: u64,
        items: &[Affine],
        new_root: &BaseField,
        peaks: &[Affine],
    ) -> Vec<BigUint> {
        let mut out = vec![old_root.as_biguint().clone(), BigUint::from(width)];
        out.extend(items.iter().map(|p| p.x.as_biguint().clone()));
        out.extend(items.iter().map(|p| p.y.as_biguint().clone()));
        out.push(new_root.as_biguint().clone());
        out.extend(peaks.iter().map(|p| p.x.as_biguint().clone()));
        out.extend(peaks.iter().map(|p| p.y.as_biguint().clone()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::args::*;
    use super::*;
    use curve::generators;

    #[test]
    fn mmr_inclusion_args_orders_public_inputs_first() {
        let root = BaseField::from_u64(1);
        let tag = BaseField::from_u64(2);
        let peaks = vec![generators::generator_g()];
        let siblings = vec![generators::generator_h()];
        let args = mmr_inclusion_args(
            &root,
            &tag,
            &peaks,
            7,
            &ScalarField::from_u64(3),
            &ScalarField::from_u64(4),
            &siblings,
        );
        assert_eq!(args[0], root.as_biguint().clone());
        assert_eq!(args[1], tag.as_biguint().clone());
    }
}
