//! Activation function autograd operations: relu

use crate::autograd::{BackwardOp, Tensor};
use ndarray::Array1;
use std::cell::RefCell;
use std::rc::Rc;

/// ReLU activation
pub fn relu(a: &Tensor) -> Tensor {
    let data = a.data().mapv(|x| x.max(0.0));
    let requires_grad = a.requires_grad();

    let mut result = Tensor::new(data, requires_grad);

    if requires_grad {
        let a_clone = a.clone();
        let backward_op = Rc::new(ReluBackward {
            a: a_clone,
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct ReluBackward {
    a: Tensor,
    result_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for ReluBackward {
    fn backward(&self) {
        if let Some(grad) = self.result_grad.borrow().as_ref() {
            if self.a.requires_grad() {
                // ∂L/∂a = ∂L/∂out * (a > 0)
                let grad_a = grad * &self.a.data().mapv(|x| if x > 0.0 { 1.0 } else { 0.0 });
                self.a.accumulate_grad(grad_a);
            }

            if let Some(op) = self.a.backward_op() {
                op.backward();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_relu_forward() {
        let a = Tensor::from_vec(vec![-1.0, 0.0, 2.0], false);
        let r = relu(&a);
        assert_eq!(r.to_vec(), vec![0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_relu_backward_gates_negative() {
        let a = Tensor::from_vec(vec![-1.0, 0.5, 2.0], true);
        let r = relu(&a);

        r.set_grad(arr1(&[1.0, 1.0, 1.0]));
        if let Some(op) = r.backward_op() {
            op.backward();
        }

        assert_eq!(a.grad().unwrap().to_vec(), vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_relu_zero_is_not_passed() {
        let a = Tensor::from_vec(vec![0.0], true);
        let r = relu(&a);
        r.set_grad(arr1(&[1.0]));
        if let Some(op) = r.backward_op() {
            op.backward();
        }
        assert_eq!(a.grad().unwrap()[0], 0.0);
    }
}
