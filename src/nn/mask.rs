//! Complementary Bernoulli population mask
//!
//! Built once at startup: a Bernoulli(0.5) mask over the feature width,
//! broadcast to every row of a batch, with the second row set the complement
//! of the first. Never resampled — the only stochastic element of the critic
//! forward pass is its internal dropout.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::Rng;

/// Fixed (2, batch_size, feature_size) mask; row 1 is the complement of row 0
pub struct ComplementaryMask {
    rows: [Array1<f32>; 2],
    batch_size: usize,
    feature_size: usize,
}

impl ComplementaryMask {
    /// Sample the base Bernoulli(0.5) feature mask and broadcast it
    pub fn new(rng: &mut StdRng, batch_size: usize, feature_size: usize) -> Self {
        let base: Vec<f32> =
            (0..feature_size).map(|_| if rng.random_bool(0.5) { 1.0 } else { 0.0 }).collect();

        let rows = [0usize, 1].map(|k| {
            let mut data = Vec::with_capacity(batch_size * feature_size);
            for _ in 0..batch_size {
                data.extend(base.iter().map(|&b| if k == 0 { b } else { 1.0 - b }));
            }
            Array1::from(data)
        });

        Self { rows, batch_size, feature_size }
    }

    /// Broadcast mask row for sub-population `k`, flattened to
    /// `batch_size * feature_size`
    pub fn row(&self, k: usize) -> &Array1<f32> {
        &self.rows[k]
    }

    /// Batch size the mask was broadcast to
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Feature width of the mask
    pub fn feature_size(&self) -> usize {
        self.feature_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_mask_shapes() {
        let mut rng = StdRng::seed_from_u64(42);
        let mask = ComplementaryMask::new(&mut rng, 10, 32);
        assert_eq!(mask.row(0).len(), 320);
        assert_eq!(mask.row(1).len(), 320);
    }

    #[test]
    fn test_rows_are_complements() {
        let mut rng = StdRng::seed_from_u64(42);
        let mask = ComplementaryMask::new(&mut rng, 8, 64);
        for (a, b) in mask.row(0).iter().zip(mask.row(1).iter()) {
            assert_eq!(a + b, 1.0);
        }
    }

    #[test]
    fn test_mask_is_binary() {
        let mut rng = StdRng::seed_from_u64(42);
        let mask = ComplementaryMask::new(&mut rng, 4, 128);
        assert!(mask.row(0).iter().all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn test_mask_broadcast_identical_rows() {
        let mut rng = StdRng::seed_from_u64(42);
        let mask = ComplementaryMask::new(&mut rng, 3, 16);
        let row = mask.row(0);
        let first = &row.as_slice().unwrap()[..16];
        for r in 1..3 {
            assert_eq!(&row.as_slice().unwrap()[r * 16..(r + 1) * 16], first);
        }
    }

    proptest! {
        #[test]
        fn test_complement_invariant(seed in 0u64..500, batch in 1usize..8, features in 1usize..64) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mask = ComplementaryMask::new(&mut rng, batch, features);
            for (a, b) in mask.row(0).iter().zip(mask.row(1).iter()) {
                prop_assert_eq!(a + b, 1.0);
            }
        }
    }
}
