//! Parameter clamping

use crate::Tensor;

/// Box-clamp every element of every parameter into [lo, hi] inclusive.
///
/// Applied to the critic before each of its gradient steps; the hard bound on
/// the weights enforces the Wasserstein-GAN Lipschitz-style constraint.
pub fn clamp_params(params: &mut [Tensor], lo: f32, hi: f32) {
    debug_assert!(lo <= hi, "clamp interval must be non-empty");
    for param in params.iter_mut() {
        param.data_mut().mapv_inplace(|x| x.clamp(lo, hi));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_bounds_every_element() {
        let mut params = vec![
            Tensor::from_vec(vec![-1.0, 0.005, 1.0], true),
            Tensor::from_vec(vec![0.02, -0.02], true),
        ];

        clamp_params(&mut params, -0.01, 0.01);

        for p in &params {
            assert!(p.to_vec().iter().all(|&v| (-0.01..=0.01).contains(&v)));
        }
    }

    #[test]
    fn test_clamp_preserves_in_range_values() {
        let mut params = vec![Tensor::from_vec(vec![0.003, -0.007], true)];
        clamp_params(&mut params, -0.01, 0.01);
        assert_eq!(params[0].to_vec(), vec![0.003, -0.007]);
    }

    #[test]
    fn test_clamp_boundary_is_inclusive() {
        let mut params = vec![Tensor::from_vec(vec![0.01, -0.01], true)];
        clamp_params(&mut params, -0.01, 0.01);
        assert_eq!(params[0].to_vec(), vec![0.01, -0.01]);
    }

    #[test]
    fn test_clamp_leaves_grads_untouched() {
        let param = Tensor::from_vec(vec![5.0], true);
        param.set_grad(ndarray::arr1(&[2.0]));
        clamp_params(&mut [param.clone()], -1.0, 1.0);
        assert_eq!(param.grad().unwrap()[0], 2.0);
    }

    proptest! {
        #[test]
        fn test_clamp_invariant(values in prop::collection::vec(-10.0f32..10.0, 1..64)) {
            let mut params = vec![Tensor::from_vec(values, true)];
            clamp_params(&mut params, -0.01, 0.01);
            for v in params[0].to_vec() {
                prop_assert!((-0.01..=0.01).contains(&v));
            }
        }
    }
}
