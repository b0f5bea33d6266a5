//! Tape-based autograd engine
//!
//! Reverse-mode automatic differentiation over flat f32 tensors. Ops build a
//! computational graph of [`BackwardOp`] nodes; [`backward`] seeds the output
//! gradient and walks the tape.

mod backward;
mod ops;
mod tensor;

pub use backward::BackwardOp;
pub use ops::*;
pub use tensor::Tensor;

/// Perform backward pass on a tensor
pub fn backward(tensor: &mut Tensor, grad_output: Option<ndarray::Array1<f32>>) {
    if let Some(grad) = grad_output {
        tensor.set_grad(grad);
    } else {
        // Initialize with ones for scalar loss
        let ones = ndarray::Array1::ones(tensor.len());
        tensor.set_grad(ones);
    }

    if let Some(op) = tensor.backward_op() {
        op.backward();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_backward_seeds_ones() {
        let mut t = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
        backward(&mut t, None);
        let g = t.grad().unwrap();
        assert_eq!(g.len(), 3);
        assert!(g.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_backward_through_chain() {
        // loss = mean(relu(x)) with x = [-1, 2, 4]
        // d loss / dx = [0, 1/3, 1/3]
        let x = Tensor::from_vec(vec![-1.0, 2.0, 4.0], true);
        let h = relu(&x);
        let mut loss = mean(&h);
        assert_abs_diff_eq!(loss.item(), 2.0, epsilon = 1e-6);

        backward(&mut loss, None);
        let g = x.grad().unwrap();
        assert_abs_diff_eq!(g[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(g[1], 1.0 / 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(g[2], 1.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_backward_signed_difference() {
        // loss = mean(a) - mean(b): grad a = 1/n, grad b = -1/n
        let a = Tensor::from_vec(vec![1.0, 3.0], true);
        let b = Tensor::from_vec(vec![2.0, 2.0], true);
        let mut loss = sub(&mean(&a), &mean(&b));
        assert_abs_diff_eq!(loss.item(), 0.0, epsilon = 1e-6);

        backward(&mut loss, None);
        assert_abs_diff_eq!(a.grad().unwrap()[0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(b.grad().unwrap()[0], -0.5, epsilon = 1e-6);
    }
}
