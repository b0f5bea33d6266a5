//! Critic network
//!
//! Scores a (data, mask) pair with a scalar. The population mask gates the
//! first hidden layer; internal dropout resamples on every forward call,
//! which is what the marginalisation loop averages over.

use super::linear::Linear;
use crate::autograd::{dropout, mean, mul_mask, relu, Tensor};
use ndarray::Array1;
use rand::rngs::StdRng;

/// Weight-clamped Wasserstein-style critic MLP
pub struct Critic {
    input: Linear,
    hidden: Linear,
    output: Linear,
    input_size: usize,
    feature_size: usize,
    dropout_p: f32,
}

impl Critic {
    /// Build the critic with tiered weight init
    pub fn new(rng: &mut StdRng, input_size: usize, feature_size: usize) -> Self {
        Self {
            input: Linear::new(rng, input_size, feature_size),
            hidden: Linear::new(rng, feature_size, feature_size),
            output: Linear::new(rng, feature_size, 1),
            input_size,
            feature_size,
            dropout_p: 0.5,
        }
    }

    /// Score a (batch × input_size) batch under the given population mask.
    ///
    /// Returns the scalar mean score. `mask` must be the flat
    /// (batch × feature_size) broadcast row of the complementary mask.
    /// Dropout is sampled fresh from `rng` on every call.
    pub fn forward(&self, x: &Tensor, batch: usize, mask: &Array1<f32>, rng: &mut StdRng) -> Tensor {
        debug_assert_eq!(x.len(), batch * self.input_size);
        debug_assert_eq!(mask.len(), batch * self.feature_size);

        let h = relu(&self.input.forward(x, batch));
        let h = mul_mask(&h, mask);
        let h = dropout(&h, self.dropout_p, rng);
        let h = relu(&self.hidden.forward(&h, batch));
        let scores = self.output.forward(&h, batch);
        mean(&scores)
    }

    /// Shared handles to every critic parameter
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

    /// Feature width of the hidden layers
    pub fn feature_size(&self) -> usize {
        self.feature_size
    }

    /// Per-layer (weight, bias) snapshots, input to output
    pub fn state(&self) -> Vec<(Vec<f32>, Vec<f32>)> {
        vec![self.input.state(), self.hidden.state(), self.output.state()]
    }

    /// Restore per-layer snapshots produced by [`Critic::state`]
    pub fn load_state(&mut self, layers: &[(Vec<f32>, Vec<f32>)]) {
        debug_assert_eq!(layers.len(), 3);
        self.input.load_state(&layers[0].0, &layers[0].1);
        self.hidden.load_state(&layers[1].0, &layers[1].1);
        self.output.load_state(&layers[2].0, &layers[2].1);
    }
}
