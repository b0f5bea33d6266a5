//! Stochastic dropout and constant-mask products
//!
//! `dropout` samples a fresh keep-mask on every forward call; repeated calls
//! with fixed inputs are the stochastic source the Monte-Carlo marginalisation
//! loop averages over. `mul_mask` multiplies by a fixed, non-learned mask and
//! never resamples.

use crate::autograd::{BackwardOp, Tensor};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;

/// Inverted dropout: zero each element with probability `p`, scale survivors
/// by 1/(1-p) so the expected activation is unchanged.
pub fn dropout(a: &Tensor, p: f32, rng: &mut StdRng) -> Tensor {
    assert!((0.0..1.0).contains(&p), "dropout probability must be in [0, 1)");

    let keep_scale = 1.0 / (1.0 - p);
    let mask: Array1<f32> = Array1::from(
        (0..a.len())
            .map(|_| if rng.random::<f32>() < p { 0.0 } else { keep_scale })
            .collect::<Vec<f32>>(),
    );

    let data = &*a.data() * &mask;
    let requires_grad = a.requires_grad();

    let mut result = Tensor::new(data, requires_grad);

    if requires_grad {
        let backward_op = Rc::new(DropoutBackward {
            a: a.clone(),
            mask,
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct DropoutBackward {
    a: Tensor,
    mask: Array1<f32>,
    result_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for DropoutBackward {
    fn backward(&self) {
        if let Some(grad) = self.result_grad.borrow().as_ref() {
            if self.a.requires_grad() {
                // same mask that gated the forward pass
                let grad_a = grad * &self.mask;
                self.a.accumulate_grad(grad_a);
            }

            if let Some(op) = self.a.backward_op() {
                op.backward();
            }
        }
    }
}

/// Elementwise product with a fixed, non-learned mask
pub fn mul_mask(a: &Tensor, mask: &Array1<f32>) -> Tensor {
    assert_eq!(a.len(), mask.len(), "Mask size mismatch");

    let data = &*a.data() * mask;
    let requires_grad = a.requires_grad();

    let mut result = Tensor::new(data, requires_grad);

    if requires_grad {
        let backward_op = Rc::new(MulMaskBackward {
            a: a.clone(),
            mask: mask.clone(),
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct MulMaskBackward {
    a: Tensor,
    mask: Array1<f32>,
    result_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for MulMaskBackward {
    fn backward(&self) {
        if let Some(grad) = self.result_grad.borrow().as_ref() {
            if self.a.requires_grad() {
                let grad_a = grad * &self.mask;
                self.a.accumulate_grad(grad_a);
            }

            if let Some(op) = self.a.backward_op() {
                op.backward();
            }
        }
    }
}
