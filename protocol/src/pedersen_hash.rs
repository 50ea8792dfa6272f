//! A windowed Pedersen hash over bits, producing a curve point.
//!
//! Splits the input into fixed-size windows, maps each window to a small
//! nonzero scalar, and accumulates `window_generator_i * scalar_i` across
//! independent per-window generators derived from the domain tag. This is a
//! stand-in for a production Pedersen hash with precomputed lookup-table
//! constants (see DESIGN.md); it keeps the same shape — one generator per
//! window, folded by addition — without requiring a constants table this
//! workspace cannot regenerate without running the curve arithmetic.

use curve::{Affine, Group, ScalarField};

const WINDOW_BITS: usize = 3;

/// Hash a bitstring into a curve point, with per-window generators derived
/// from `domain`.
pub fn pedersen_hash_bits(domain: &[u8], bits: &[bool]) -> Affine {
    let mut acc = Affine::identity();
    for (window_index, chunk) in bits.chunks(WINDOW_BITS).enumerate() {
        let mut value: u64 = 0;
        for (i, bit) in chunk.iter().enumerate() {
            if *bit {
                value |= 1 << i;
            }
        }
        let generator = window_generator(domain, window_index as u64);
        // +1 so that an all-zero window still contributes (a zero scalar
        // would make that window's generator unobservable in the output).
        acc = acc + generator.scalar_mul(&ScalarField::from_u64(value + 1));
    }
    acc
}

fn window_generator(domain: &[u8], window_index: u64) -> Affine {
    let mut tag = Vec::with_capacity(domain.len() + 8);
    tag.extend_from_slice(domain);
    tag.extend_from_slice(&window_index.to_le_bytes());
    Affine::hash_to_curve(&tag)
}
