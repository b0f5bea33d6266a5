//! Two-tier weight initialization
//!
//! Convolutional-style weights ~ N(0, 0.02²), linear weights ~ N(0, 0.06²),
//! normalization-layer weights ~ N(1.0, 0.02²) with zero bias.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;

/// Which initialization tier a parameter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightTier {
    /// Convolutional-style weights
    Conv,
    /// Fully-connected weights
    Linear,
    /// Normalization-layer scale weights
    Norm,
}

impl WeightTier {
    /// (mean, std) of the tier's normal distribution
    pub fn distribution(self) -> (f32, f32) {
        match self {
            WeightTier::Conv => (0.0, 0.02),
            WeightTier::Linear => (0.0, 0.06),
            WeightTier::Norm => (1.0, 0.02),
        }
    }
}

/// Sample `n` weights from the tier's distribution
pub fn init_weights(rng: &mut StdRng, n: usize, tier: WeightTier) -> Vec<f32> {
    let (mean, std) = tier.distribution();
    (0..n)
        .map(|_| {
            let z: f32 = rng.sample(StandardNormal);
            mean + z * std
        })
        .collect()
}

/// Biases start at zero for every tier
pub fn init_bias(n: usize) -> Vec<f32> {
    vec![0.0; n]
}
