//! Fully-connected layer over the autograd tape

use super::init::{init_bias, init_weights, WeightTier};
use crate::autograd::{add_bias, matmul, Tensor};
use rand::rngs::StdRng;

/// A dense layer: `y = x @ W + b` with `W` stored as a flat (in × out) matrix
pub struct Linear {
    weight: Tensor,
    bias: Tensor,
    in_dim: usize,
    out_dim: usize,
}

impl Linear {
    /// Create a layer with tiered weight init and zero bias
    pub fn new(rng: &mut StdRng, in_dim: usize, out_dim: usize) -> Self {
        let weight =
            Tensor::from_vec(init_weights(rng, in_dim * out_dim, WeightTier::Linear), true);
        let bias = Tensor::from_vec(init_bias(out_dim), true);
        Self { weight, bias, in_dim, out_dim }
    }

    /// Forward pass for a (rows × in_dim) batch
    pub fn forward(&self, x: &Tensor, rows: usize) -> Tensor {
        let h = matmul(x, &self.weight, rows, self.in_dim, self.out_dim);
        add_bias(&h, &self.bias, rows, self.out_dim)
    }

    /// Input dimensionality
    pub fn in_dim(&self) -> usize {
        self.in_dim
    }

    /// Output dimensionality
    pub fn out_dim(&self) -> usize {
        self.out_dim
    }

    /// Shared handles to the layer's parameters
    pub fn params(&self) -> Vec<Tensor> {
        vec![self.weight.clone(), self.bias.clone()]
    }

    /// Number of parameters
    #[must_use]
    pub fn num_parameters(&self) -> usize {
        self.weight.len() + self.bias.len()
    }

    /// Flat weight and bias copies (checkpointing)
    pub fn state(&self) -> (Vec<f32>, Vec<f32>) {
        (self.weight.to_vec(), self.bias.to_vec())
    }

    /// Overwrite weight and bias from a checkpoint snapshot
    pub fn load_state(&mut self, weight: &[f32], bias: &[f32]) {
        debug_assert_eq!(weight.len(), self.weight.len());
        debug_assert_eq!(bias.len(), self.bias.len());
        self.weight.data_mut().assign(&ndarray::Array1::from(weight.to_vec()));
        self.bias.data_mut().assign(&ndarray::Array1::from(bias.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::backward;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;

    #[test]
    fn test_linear_shapes() {
        let mut rng = StdRng::seed_from_u64(42);
        let layer = Linear::new(&mut rng, 3, 4);
        let x = Tensor::from_vec(vec![1.0; 6], false);
        let y = layer.forward(&x, 2);
        assert_eq!(y.len(), 8);
        assert_eq!(layer.num_parameters(), 3 * 4 + 4);
    }

    #[test]
    fn test_linear_forward_computes_affine() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut layer = Linear::new(&mut rng, 2, 1);
        layer.load_state(&[2.0, 3.0], &[1.0]);

        let x = Tensor::from_vec(vec![1.0, 1.0, 0.5, 2.0], false);
        let y = layer.forward(&x, 2);
        // row 0: 2*1 + 3*1 + 1 = 6; row 1: 2*0.5 + 3*2 + 1 = 8
        assert_abs_diff_eq!(y.to_vec()[0], 6.0, epsilon = 1e-6);
        assert_abs_diff_eq!(y.to_vec()[1], 8.0, epsilon = 1e-6);
    }

    #[test]
    fn test_linear_gradients_flow_to_params() {
        let mut rng = StdRng::seed_from_u64(42);
        let layer = Linear::new(&mut rng, 2, 2);
        let x = Tensor::from_vec(vec![1.0, -1.0], false);

        let y = layer.forward(&x, 1);
        let mut loss = crate::autograd::mean(&y);
        backward(&mut loss, None);

        for p in layer.params() {
            assert!(p.grad().is_some());
        }
    }

    #[test]
    fn test_state_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let layer_a = Linear::new(&mut rng, 4, 3);
        let mut layer_b = Linear::new(&mut rng, 4, 3);

        let (w, b) = layer_a.state();
        layer_b.load_state(&w, &b);
        assert_eq!(layer_a.state(), layer_b.state());
    }
}
