//! Generator network
//!
//! Maps (noise, conditioning-mean) pairs to synthetic samples in data space.
//! No weight clamping and no internal dropout.

use super::linear::Linear;
use crate::autograd::{concat_cols, relu, Tensor};
use rand::rngs::StdRng;

/// Conditional generator MLP
pub struct Generator {
    input: Linear,
    hidden: Linear,
    output: Linear,
    input_size: usize,
    latent_dim: usize,
}

impl Generator {
    /// Build the generator with tiered weight init
    pub fn new(rng: &mut StdRng, input_size: usize, latent_dim: usize, feature_size: usize) -> Self {
        Self {
            input: Linear::new(rng, latent_dim + input_size, feature_size),
            hidden: Linear::new(rng, feature_size, feature_size),
            output: Linear::new(rng, feature_size, input_size),
            input_size,
            latent_dim,
        }
    }

    /// Generate a (batch × input_size) synthetic batch.
    ///
    /// `noise` is (batch × latent_dim); `conditioning` is the sub-population
    /// batch mean broadcast to (batch × input_size).
    pub fn forward(&self, noise: &Tensor, conditioning: &Tensor, batch: usize) -> Tensor {
        debug_assert_eq!(noise.len(), batch * self.latent_dim);
        debug_assert_eq!(conditioning.len(), batch * self.input_size);

        let z = concat_cols(noise, conditioning, batch, self.latent_dim, self.input_size);
        let h = relu(&self.input.forward(&z, batch));
        let h = relu(&self.hidden.forward(&h, batch));
        self.output.forward(&h, batch)
    }

    /// Shared handles to every generator parameter
    pub fn params(&self) -> Vec<Tensor> {
        let mut params = self.input.params();
        params.extend(self.hidden.params());
        params.extend(self.output.params());
        params
    }

    /// Number of parameters
    #[must_use]
    pub fn num_parameters(&self) -> usize {
        self.input.num_parameters() + self.hidden.num_parameters() + self.output.num_parameters()
    }

    /// Latent dimensionality
    pub fn latent_dim(&self) -> usize {
        self.latent_dim
    }

    /// Per-layer (weight, bias) snapshots, input to output
    pub fn state(&self) -> Vec<(Vec<f32>, Vec<f32>)> {
        vec![self.input.state(), self.hidden.state(), self.output.state()]
    }

    /// Restore per-layer snapshots produced by [`Generator::state`]
    pub fn load_state(&mut self, layers: &[(Vec<f32>, Vec<f32>)]) {
        debug_assert_eq!(layers.len(), 3);
        self.input.load_state(&layers[0].0, &layers[0].1);
        self.hidden.load_state(&layers[1].0, &layers[1].1);
        self.output.load_state(&layers[2].0, &layers[2].1);
    }
}
