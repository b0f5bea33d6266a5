//! RMSprop optimizer

use super::Optimizer;
use crate::Tensor;
use ndarray::Array1;

/// RMSprop optimizer
///
/// Keeps a running average of squared gradients per parameter and divides
/// the update by its square root:
///
/// v_t = α * v_{t-1} + (1 - α) * g_t²
/// θ_t = θ_{t-1} - lr * g_t / (√v_t + ε)
pub struct RmsProp {
    lr: f32,
    alpha: f32,
    epsilon: f32,
    square_avg: Vec<Option<Array1<f32>>>,
}

impl RmsProp {
    /// Create a new RMSprop optimizer
    pub fn new(lr: f32, alpha: f32, epsilon: f32) -> Self {
        Self { lr, alpha, epsilon, square_avg: Vec::new() }
    }

    /// RMSprop with the conventional α = 0.99, ε = 1e-8
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.99, 1e-8)
    }

    /// Initialize state if needed
    fn ensure_state(&mut self, params: &[Tensor]) {
        if self.square_avg.is_empty() {
            self.square_avg = params.iter().map(|_| None).collect();
        }
    }
}

impl Optimizer for RmsProp {
    fn step(&mut self, params: &mut [Tensor]) {
        self.ensure_state(params);

        for (i, param) in params.iter_mut().enumerate() {
            if let Some(grad) = param.grad() {
                let square_avg = self.square_avg[i]
                    .get_or_insert_with(|| Array1::zeros(grad.len()));

                // v = alpha * v + (1 - alpha) * g^2
                *square_avg *= self.alpha;
                *square_avg += &(&grad * &grad * (1.0 - self.alpha));

                let mut data = param.data_mut();
                for ((d, g), v) in data.iter_mut().zip(grad.iter()).zip(square_avg.iter()) {
                    *d -= self.lr * g / (v.sqrt() + self.epsilon);
                }
            }
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    #[test]
    fn test_first_step_scales_to_lr_over_sqrt_one_minus_alpha() {
        let mut opt = RmsProp::new(0.01, 0.99, 1e-8);
        let param = Tensor::from_vec(vec![1.0], true);
        param.set_grad(arr1(&[2.0]));

        opt.step(&mut [param.clone()]);

        // v = 0.01 * 4 = 0.04; step = 0.01 * 2 / (0.2 + 1e-8) ≈ 0.1
        assert_abs_diff_eq!(param.to_vec()[0], 1.0 - 0.1, epsilon = 1e-4);
    }

    #[test]
    fn test_step_magnitude_bounded_by_lr_over_sqrt_one_minus_alpha() {
        // v >= (1 - alpha) * g^2 caps any single update at
        // lr / sqrt(1 - alpha), independent of the gradient scale. At
        // alpha = 0.99 that is 10 * lr, which is what the fresh-state step
        // actually reaches.
        let lr = 0.00001;
        let bound = lr / (1.0f32 - 0.99).sqrt();
        for g in [0.001f32, 1.0, 1000.0] {
            let mut opt = RmsProp::new(lr, 0.99, 1e-8);
            let param = Tensor::from_vec(vec![0.0], true);
            param.set_grad(arr1(&[g]));
            opt.step(&mut [param.clone()]);
            let moved = param.to_vec()[0].abs();
            assert!(moved <= bound * 1.001, "step {moved} exceeds {bound}");
            assert_abs_diff_eq!(moved, bound, epsilon = bound * 0.01);
        }
    }

    #[test]
    fn test_no_grad_no_update() {
        let mut opt = RmsProp::default_params(0.01);
        let param = Tensor::from_vec(vec![1.0, 2.0], true);
        opt.step(&mut [param.clone()]);
        assert_eq!(param.to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_converges_on_quadratic() {
        // minimize f(x) = (x - 3)^2 with g = 2 (x - 3)
        let mut opt = RmsProp::default_params(0.05);
        let param = Tensor::from_vec(vec![0.0], true);

        for _ in 0..500 {
            let x = param.to_vec()[0];
            param.set_grad(arr1(&[2.0 * (x - 3.0)]));
            opt.step(&mut [param.clone()]);
        }

        assert_abs_diff_eq!(param.to_vec()[0], 3.0, epsilon = 0.05);
    }

    #[test]
    fn test_state_tracks_multiple_params() {
        let mut opt = RmsProp::default_params(0.01);
        let p0 = Tensor::from_vec(vec![1.0], true);
        let p1 = Tensor::from_vec(vec![1.0, 1.0], true);
        p0.set_grad(arr1(&[1.0]));
        p1.set_grad(arr1(&[1.0, -1.0]));

        opt.step(&mut [p0.clone(), p1.clone()]);

        assert!(p0.to_vec()[0] < 1.0);
        assert!(p1.to_vec()[0] < 1.0);
        assert!(p1.to_vec()[1] > 1.0);
    }

    #[test]
    fn test_set_lr() {
        let mut opt = RmsProp::default_params(0.01);
        opt.set_lr(0.1);
        assert_eq!(opt.lr(), 0.1);
    }
}
