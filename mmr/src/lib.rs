//! Pedersen Merkle Mountain Range: an append-only accumulator of commitment
//! points, combined by curve scalar multiplication rather than hashing.
//!
//! A leaf at 1-based position `p` with commitment `C` is stored as `C · p`.
//! Two siblings at the same height combine as `parent = R · L.y`, the right
//! child scalar-multiplied by the left child's `y`-coordinate. The root is
//! the "bagged" fold of every mountain peak plus the tree's width. Because
//! combination is a group operation rather than a hash, both append and
//! inclusion-proof verification reduce to the curve arithmetic in the
//! [`curve`] crate.

mod error;
mod pedersen_mmr;
mod topology;

pub use error::MmrError;
pub use pedersen_mmr::{inclusion_proof, peak_bagging, width_from_peaks, MmrProof, PedersenMmr};
pub use topology::{leaf_index, max_height, peak_existence, peak_node_index, sibling_map};
