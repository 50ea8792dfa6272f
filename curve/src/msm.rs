use crate::affine::Affine;
use crate::group::Group;
use crate::scalarfield::ScalarField;

/// Compute `a*G + b*P`, where `G` is the fixed generator. This is the
/// operation at the heart of Schnorr-style verification (`s*G == R + e*pk`).
///
/// There is no precomputed fixed-base table for `G` here (unlike a
/// production implementation might keep one): windowed scalar multiplication
/// is used for both terms, which is already a clear win over naive
/// double-and-add for the two-term sum this function exists for.
pub fn double_scalar_mul_basepoint_affine(a: &ScalarField, b: &ScalarField, point: &Affine) -> Affine {
    let g = Affine::generator();
    g.scalar_mul_windowed(a) + point.scalar_mul_windowed(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_separate_scalar_muls() {
        let a = ScalarField::from_u64(7);
        let b = ScalarField::from_u64(11);
        let point = Affine::generator().scalar_mul(&ScalarField::from_u64(3));

        let result = double_scalar_mul_basepoint_affine(&a, &b, &point);
        let expected = Affine::generator().scalar_mul(&a) + point.scalar_mul(&b);
        assert_eq!(result, expected);
    }
}
