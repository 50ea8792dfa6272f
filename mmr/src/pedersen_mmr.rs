//! The Pedersen Merkle Mountain Range: an append-only accumulator over curve
//! points, where combining two nodes is itself a curve scalar multiplication
//! rather than a hash. Ported from the reference implementation's `PedersenMMR`.

use std::collections::HashMap;

use curve::{generators, Affine, BaseField};
use num_bigint::BigUint;
use tracing::{debug, instrument};

use crate::error::MmrError;
use crate::topology;

/// An append-only accumulator whose leaves and internal nodes are curve
/// points, combined by scalar-multiplying the right child by the left
/// child's `y`-coordinate.
#[derive(Clone, Debug)]
pub struct PedersenMmr {
    bits: usize,
    width: u64,
    peaks: Vec<Affine>,
    nodes: HashMap<u64, Affine>,
    items: HashMap<u64, Affine>,
}

/// A verifiable witness that `item` is the leaf at `position` in the tree
/// committing to `root`.
#[derive(Clone, Debug)]
pub struct MmrProof {
    pub root: BaseField,
    pub position: u64,
    pub item: Affine,
    pub peaks: Vec<Affine>,
    pub siblings: Vec<Affine>,
}

impl MmrProof {
    /// Build a proof, checking it verifies before returning it.
    pub fn new(
        root: BaseField,
        position: u64,
        item: Affine,
        peaks: Vec<Affine>,
        siblings: Vec<Affine>,
    ) -> Result<Self, MmrError> {
        inclusion_proof(&root, position, &item, &peaks, &siblings)?;
        Ok(MmrProof {
            root,
            position,
            item,
            peaks,
            siblings,
        })
    }
}

impl PedersenMmr {
    /// An empty tree with the given peak-array width (the maximum mountain height).
    pub fn new(bits: usize) -> Self {
        PedersenMmr {
            bits,
            width: 0,
            peaks: vec![Affine::identity(); bits],
            nodes: HashMap::new(),
            items: HashMap::new(),
        }
    }

    /// Reconstruct a tree from only its peaks, populating the sparse node
    /// index at the peak slots. Leaves and non-peak internal nodes are not
    /// recoverable from peaks alone.
    pub fn from_peaks(bits: usize, peaks: Vec<Affine>) -> Result<Self, MmrError> {
        if peaks.len() != bits {
            return Err(MmrError::MmrInvariant);
        }
        let width = width_from_peaks(&peaks);

        let mut nodes = HashMap::new();
        let mut index: u64 = 0;
        for (i, peak) in peaks.iter().enumerate() {
            let peak_height = (bits - i) as u32;
            if !peak.is_identity() {
                index += (1u64 << peak_height) - 1;
                nodes.insert(index, peak.clone());
            }
        }

        Ok(PedersenMmr {
            bits,
            width,
            peaks,
            nodes,
            items: HashMap::new(),
        })
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn width(&self) -> u64 {
        self.width
    }

    pub fn peaks(&self) -> &[Affine] {
        &self.peaks
    }

    /// The accumulator's root: the bagged peaks.
    pub fn root(&self) -> Result<BaseField, MmrError> {
        peak_bagging(&self.peaks)
    }

    /// Append a commitment point as the next leaf.
    ///
    /// Builds the new node set and peak array in local variables first, and
    /// only commits them to `self` once every step has succeeded, so a
    /// caller can never observe a partially-updated tree.
    #[instrument(skip(self, item), fields(width = self.width))]
    pub fn append(&mut self, item: Affine) {
        let new_width = self.width + 1;
        let leaf_node = item.scalar_mul_biguint(&BigUint::from(new_width));
        let leaf_idx = topology::leaf_index(new_width);

        let mut new_nodes: Vec<(u64, Affine)> = vec![(leaf_idx, leaf_node.clone())];

        let new_peaks = if new_width & 1 == 1 {
            let mut peaks = self.peaks.clone();
            let last = peaks.len() - 1;
            peaks[last] = leaf_node;
            peaks
        } else {
            let mut cursor = leaf_node;
            let mut cursor_index = leaf_idx;
            let peak_node_idx = topology::peak_node_index(new_width);
            let mut height: u32 = 1;

            while cursor_index != peak_node_idx {
                height += 1;
                cursor_index += 1;
                let left_node_index = cursor_index - (1u64 << (height - 1));
                let left_node = self
                    .nodes
                    .get(&left_node_index)
                    .cloned()
                    .expect("left sibling node must already exist when merging upward");
                cursor = cursor.scalar_mul_biguint(left_node.y.as_biguint());
                new_nodes.push((cursor_index, cursor.clone()));
            }

            let mut peaks = self.peaks.clone();
            let keep = peaks.len() - height as usize;
            for slot in peaks.iter_mut().skip(keep) {
                *slot = Affine::identity();
            }
            peaks[keep] = cursor;
            peaks
        };

        for (idx, node) in new_nodes {
            self.nodes.insert(idx, node);
        }
        self.items.insert(new_width, item);
        self.peaks = new_peaks;
        self.width = new_width;
        debug!(new_width, "appended leaf to MMR");
    }

    /// The sibling path from the leaf at `position` up to its enclosing peak,
    /// right-padded with the identity to a fixed length of `bits`.
    pub fn get_siblings(&self, position: u64) -> Result<Vec<Affine>, MmrError> {
        let map = topology::sibling_map(self.width, position)?;
        let mut siblings = Vec::with_capacity(map.len());
        let mut cursor_index = topology::leaf_index(position);

        for (i, is_right_sibling) in map.iter().enumerate() {
            if *is_right_sibling {
                cursor_index += 2u64 << i;
                let right_sibling_index = cursor_index - 1;
                siblings.push(
                    self.nodes
                        .get(&right_sibling_index)
                        .cloned()
                        .ok_or(MmrError::MmrInvariant)?,
                );
            } else {
                cursor_index += 1;
                let left_sibling_index = cursor_index - (2u64 << i);
                siblings.push(
                    self.nodes
                        .get(&left_sibling_index)
                        .cloned()
                        .ok_or(MmrError::MmrInvariant)?,
                );
            }
        }

        while siblings.len() < self.bits {
            siblings.push(Affine::identity());
        }
        Ok(siblings)
    }

    /// Build and verify an inclusion proof for the leaf at `position`.
    pub fn get_inclusion_proof(&self, position: u64) -> Result<MmrProof, MmrError> {
        let siblings = self.get_siblings(position)?;
        let item = self
            .items
            .get(&position)
            .cloned()
            .ok_or(MmrError::MmrInvariant)?;
        let root = self.root()?;
        MmrProof::new(root, position, item, self.peaks.clone(), siblings)
    }
}

/// The width implied by a peak array: the sum of `2^(height-1)` over every
/// non-identity slot. Inverse of the mountain decomposition of `width`.
pub fn width_from_peaks(peaks: &[Affine]) -> u64 {
    let bits = peaks.len();
    let mut width = 0u64;
    for (i, peak) in peaks.iter().enumerate() {
        let peak_height = (bits - i) as u32;
        if !peak.is_identity() {
            width += 1u64 << (peak_height - 1);
        }
    }
    width
}

/// Fold the peak array (tallest-to-shortest order, `peaks[0]` tallest) and
/// the width into a single root value. Pure function; does not require a
/// live [`PedersenMmr`] instance, so stateless inclusion verification can
/// call it directly.
pub fn peak_bagging(peaks: &[Affine]) -> Result<BaseField, MmrError> {
    let width = width_from_peaks(peaks);
    let mut root_point = generators::generator_g();

    for (i, peak) in peaks.iter().enumerate().rev() {
        let peak_height = (peaks.len() - i) as u32;
        let exists = topology::peak_existence(width, peak_height);
        if exists == peak.is_identity() {
            return Err(MmrError::MmrInvariant);
        }
        root_point = root_point.scalar_mul_biguint(peak.y.as_biguint());
    }

    root_point = root_point.scalar_mul_biguint(&BigUint::from(width));
    Ok(root_point.y)
}

/// Stateless verification that `item` at `position` rolls up into `root`
/// through `peaks` via `siblings`.
pub fn inclusion_proof(
    root: &BaseField,
    position: u64,
    item: &Affine,
    peaks: &[Affine],
    siblings: &[Affine],
) -> Result<(), MmrError> {
    let width = width_from_peaks(peaks);
    let recomputed = peak_bagging(peaks)?;
    if recomputed != *root {
        return Err(MmrError::InclusionMismatch);
    }

    let map = topology::sibling_map(width, position)?;
    let my_peak_height = map.len() + 1;
    if my_peak_height > peaks.len() {
        return Err(MmrError::MmrInvariant);
    }
    let my_peak = &peaks[peaks.len() - my_peak_height];

    let mut cursor = item.scalar_mul_biguint(&BigUint::from(position));
    for (i, is_right_sibling) in map.iter().enumerate() {
        let sibling = &siblings[i];
        cursor = if *is_right_sibling {
            sibling.scalar_mul_biguint(cursor.y.as_biguint())
        } else {
            cursor.scalar_mul_biguint(sibling.y.as_biguint())
        };
    }

    if cursor != *my_peak {
        return Err(MmrError::InclusionMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve::ScalarField;

    fn leaf(i: u64) -> Affine {
        let g = generators::generator_g();
        let h = generators::generator_h();
        g.scalar_mul(&ScalarField::from_u64(i)) + h.scalar_mul(&ScalarField::from_u64(10 + i))
    }

    #[test]
    fn append_six_leaves_matches_expected_width() {
        let mut mmr = PedersenMmr::new(16);
        for i in 1..=6u64 {
            mmr.append(leaf(i));
        }
        assert_eq!(mmr.width(), 6);
        assert!(mmr.root().is_ok());
    }

    #[test]
    fn inclusion_proof_verifies_for_every_position() {
        let mut mmr = PedersenMmr::new(16);
        for i in 1..=6u64 {
            mmr.append(leaf(i));
        }
        for p in 1..=6u64 {
            assert!(mmr.get_inclusion_proof(p).is_ok());
        }
    }

    #[test]
    fn width_from_peaks_round_trips_through_from_peaks() {
        let mut mmr = PedersenMmr::new(16);
        for i in 1..=6u64 {
            mmr.append(leaf(i));
        }
        let rebuilt = PedersenMmr::from_peaks(16, mmr.peaks().to_vec()).unwrap();
        assert_eq!(rebuilt.width(), mmr.width());
        assert_eq!(rebuilt.root().unwrap(), mmr.root().unwrap());
    }

    #[test]
    fn tampering_item_breaks_inclusion() {
        let mut mmr = PedersenMmr::new(16);
        for i in 1..=6u64 {
            mmr.append(leaf(i));
        }
        let proof = mmr.get_inclusion_proof(3).unwrap();
        let wrong_item = leaf(99);
        assert!(inclusion_proof(&proof.root, proof.position, &wrong_item, &proof.peaks, &proof.siblings).is_err());
    }

    #[test]
    fn tampering_position_breaks_inclusion() {
        let mut mmr = PedersenMmr::new(16);
        for i in 1..=6u64 {
            mmr.append(leaf(i));
        }
        let proof = mmr.get_inclusion_proof(3).unwrap();
        assert!(inclusion_proof(&proof.root, 4, &proof.item, &proof.peaks, &proof.siblings).is_err());
    }

    #[test]
    fn tampering_peak_breaks_inclusion() {
        let mut mmr = PedersenMmr::new(16);
        for i in 1..=6u64 {
            mmr.append(leaf(i));
        }
        let proof = mmr.get_inclusion_proof(3).unwrap();
        let mut wrong_peaks = proof.peaks.clone();
        let tamper_slot = wrong_peaks
            .iter()
            .position(|p| !p.is_identity())
            .expect("at least one peak must be non-identity");
        wrong_peaks[tamper_slot] = leaf(99);
        assert!(inclusion_proof(&proof.root, proof.position, &proof.item, &wrong_peaks, &proof.siblings).is_err());
    }

    #[test]
    fn tampering_sibling_breaks_inclusion() {
        let mut mmr = PedersenMmr::new(16);
        for i in 1..=6u64 {
            mmr.append(leaf(i));
        }
        let proof = mmr.get_inclusion_proof(3).unwrap();
        assert!(!proof.siblings.is_empty());
        let mut wrong_siblings = proof.siblings.clone();
        wrong_siblings[0] = leaf(99);
        assert!(inclusion_proof(&proof.root, proof.position, &proof.item, &proof.peaks, &wrong_siblings).is_err());
    }

    #[test]
    fn roll_up_from_six_to_twenty_two_leaves() {
        let mut mmr = PedersenMmr::new(16);
        for i in 1..=6u64 {
            mmr.append(leaf(i));
        }
        let old_root = mmr.root().unwrap();
        let old_peaks = mmr.peaks().to_vec();

        for i in 7..=22u64 {
            mmr.append(leaf(i));
        }
        let new_root = mmr.root().unwrap();

        assert_ne!(old_root, new_root);
        assert_eq!(mmr.width(), 22);
        assert_eq!(peak_bagging(&old_peaks).unwrap(), old_root);
    }
}
