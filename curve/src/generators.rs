//! The two independent generators used throughout the curve and its
//! dependents: `G` for key/commitment blinding, `H` for committed values.
//!
//! Both are derived by hashing a fixed domain tag to a curve point
//! ([`crate::affine::Affine::hash_to_curve`]) rather than hardcoded as literal
//! coordinates, so their validity (on-curve, prime-order subgroup, nonzero) is
//! guaranteed by construction instead of by a coordinate transcription that
//! would be impossible to check without running the arithmetic.

use once_cell::sync::Lazy;

use crate::affine::Affine;

static GENERATOR_G: Lazy<Affine> = Lazy::new(|| Affine::hash_to_curve(b"ethereum934-generator-G"));
static GENERATOR_H: Lazy<Affine> = Lazy::new(|| Affine::hash_to_curve(b"ethereum934-generator-H"));

/// The blinding-factor generator `G`.
pub fn generator_g() -> Affine {
    GENERATOR_G.clone()
}

/// The value generator `H`, independent of `G` (discrete log between them unknown).
pub fn generator_h() -> Affine {
    GENERATOR_H.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_are_distinct_and_valid() {
        let g = generator_g();
        let h = generator_h();
        assert_ne!(g, h);
        assert!(g.is_on_curve());
        assert!(h.is_on_curve());
        assert!(g.is_in_prime_order_subgroup());
        assert!(h.is_in_prime_order_subgroup());
    }

    #[test]
    fn generator_calls_are_deterministic() {
        assert_eq!(generator_g(), generator_g());
        assert_eq!(generator_h(), generator_h());
    }
}
