//! Pure index arithmetic over the Merkle Mountain Range's implicit binary
//! forest. None of this touches curve points; it only maps between leaf
//! positions, flat node indices, and the peaks that cover them.

use crate::error::MmrError;

/// Flat node index of the leaf at 1-based position `position`.
///
/// Treats `position - 1` as a little-endian bitstring; each set bit `i`
/// contributes `(2 << i) - 1` to the index, then the whole thing is
/// offset by one (indices are also 1-based).
pub fn leaf_index(position: u64) -> u64 {
    let n = position - 1;
    let mut index: u64 = 0;
    for i in 0..63 {
        if n >> i == 0 {
            break;
        }
        if (n >> i) & 1 == 1 {
            index += (2u64 << i) - 1;
        }
    }
    index + 1
}

/// Flat node index of the peak that the leaf at `position` eventually rolls
/// up into, if that leaf is the last one added to its mountain.
pub fn peak_node_index(position: u64) -> u64 {
    leaf_index(position + 1) - 1
}

/// Whether a mountain of the given 1-based `peak_height` exists in a tree of
/// the given `width` (i.e. whether bit `peak_height - 1` of `width` is set).
pub fn peak_existence(width: u64, peak_height: u32) -> bool {
    width & (1u64 << (peak_height - 1)) != 0
}

/// The height of the tallest possible mountain for a tree of the given width:
/// `floor(log2(width)) + 1`. `width` must be nonzero.
pub fn max_height(width: u64) -> u32 {
    assert!(width > 0, "max_height is undefined for width 0");
    63 - width.leading_zeros() + 1
}

/// The path from the leaf at `position` up to its enclosing peak, as a
/// sequence of left(`false`)/right(`true`) steps ordered from the leaf
/// upward. Its length is `peak_height - 1`, where `peak_height` is the
/// height of the mountain the leaf belongs to.
pub fn sibling_map(width: u64, position: u64) -> Result<Vec<bool>, MmrError> {
    let mut covered_width: u64 = 0;
    let height = max_height(width);

    for i in 0..height {
        let peak_height = height - i;
        let current_peak_width = 1u64 << (peak_height - 1);
        if peak_existence(width, peak_height) {
            covered_width += current_peak_width;
        }

        if covered_width >= position {
            let value = covered_width - position;
            let path_len = (peak_height - 1) as usize;
            let mut bits = Vec::with_capacity(path_len);
            for b in 0..path_len {
                bits.push((value >> b) & 1 == 1);
            }
            return Ok(bits);
        }
    }

    Err(MmrError::MmrInvariant)
}
