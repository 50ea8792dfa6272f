use std::ops::{Add, Neg, Sub};

/// A scalar type that can expose a little-endian bit decomposition for
/// double-and-add style algorithms.
pub trait ScalarBits {
    /// Least-significant-bit-first decomposition. Length may vary by
    /// implementation; `scalar_mul` only relies on it being complete.
    fn to_bits_le(&self) -> Vec<bool>;
}

/// Basic additive group behavior for curve points.
///
/// This trait centralizes scalar multiplication and related utilities so
/// point types can share one correct implementation. Point types here are
/// `Clone` rather than `Copy`: coordinates are arbitrary-precision field
/// elements, not fixed-width machine words.
pub trait Group: Sized + Clone + Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self> {
    type Scalar: ScalarBits;

    /// Return the identity element.
    fn identity() -> Self;
    /// Return true if this element is the identity.
    fn is_identity(&self) -> bool;
    /// A fixed generator for the curve group.
    fn generator() -> Self;
    /// Return 2 * self.
    fn double(&self) -> Self;
    /// Return -self.
    fn negate(&self) -> Self;

    /// Double-and-add scalar multiplication.
    #[inline]
    fn scalar_mul(&self, scalar: &Self::Scalar) -> Self {
        let bits = scalar.to_bits_le();
        let mut result = Self::identity();
        let mut temp = self.clone();

        for bit in bits {
            if bit {
                result = result + temp.clone();
            }
            temp = temp.double();
        }

        result
    }

    /// Fixed-window (width = 4) scalar multiplication, built from a
    /// precomputed table of `self * {0, .., 15}`.
    fn scalar_mul_windowed(&self, scalar: &Self::Scalar) -> Self {
        if self.is_identity() {
            return Self::identity();
        }

        let mut table: Vec<Self> = Vec::with_capacity(16);
        table.push(Self::identity());
        table.push(self.clone());
        for i in 2..16 {
            table.push(if i % 2 == 0 {
                table[i / 2].double()
            } else {
                table[i - 1].clone() + table[1].clone()
            });
        }

        let mut bits = scalar.to_bits_le();
        // Pad to a multiple of 4 so the window loop below can chunk evenly.
        while bits.len() % 4 != 0 {
            bits.push(false);
        }

        let mut result = Self::identity();
        for chunk in bits.rchunks(4) {
            result = result.double().double().double().double();
            let mut window = 0usize;
            for (i, bit) in chunk.iter().enumerate() {
                if *bit {
                    window |= 1 << (chunk.len() - 1 - i);
                }
            }
            if window != 0 {
                result = result + table[window].clone();
            }
        }

        result
    }

    /// Multiply by a small `u64` scalar.
    fn mul_u64(&self, n: u64) -> Self {
        if n == 0 {
            return Self::identity();
        }
        if n == 1 {
            return self.clone();
        }

        let mut result = Self::identity();
        let mut temp = self.clone();
        let mut bits = n;

        while bits > 0 {
            if bits & 1 == 1 {
                result = result + temp.clone();
            }
            temp = temp.double();
            bits >>= 1;
        }

        result
    }

    /// Naive multi-scalar multiplication.
    fn multi_scalar_mul(points: &[Self], scalars: &[Self::Scalar]) -> Self {
        assert_eq!(
            points.len(),
            scalars.len(),
            "Points and scalars must have same length"
        );

        let mut result = Self::identity();
        for (point, scalar) in points.iter().zip(scalars.iter()) {
            result = result + point.scalar_mul(scalar);
        }
        result
    }
}
