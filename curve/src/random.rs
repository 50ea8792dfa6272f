use num_bigint::BigUint;
use rand::Rng;

use crate::basefield::{self, BaseField};
use crate::scalarfield::{self, ScalarField};

/// Helper trait for sampling random field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl RandomField for BaseField {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        BaseField::from_biguint(random_below(rng, &basefield::MODULUS))
    }
}

impl RandomField for ScalarField {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        ScalarField::from_biguint(random_below(rng, &scalarfield::MODULUS))
    }
}

/// Uniform rejection sampling of a `BigUint` in `[0, modulus)`.
pub(crate) fn random_below<R: Rng + ?Sized>(rng: &mut R, modulus: &BigUint) -> BigUint {
    let bits = modulus.bits() as usize;
    let bytes_len = bits.div_ceil(8);
    let excess_bits = bytes_len * 8 - bits;
    loop {
        let mut bytes = vec![0u8; bytes_len];
        rng.fill(bytes.as_mut_slice());
        if excess_bits > 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xff >> excess_bits;
            }
        }
        let candidate = BigUint::from_bytes_le(&bytes);
        if candidate < *modulus {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_base_field_is_canonical() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = BaseField::random(&mut rng);
        assert!(*a.as_biguint() < *basefield::MODULUS);
    }

    #[test]
    fn random_scalar_field_is_canonical() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = ScalarField::random(&mut rng);
        assert!(*a.as_biguint() < *scalarfield::MODULUS);
    }
}
