//! Backward op trait for the gradient tape

/// A node in the gradient tape.
///
/// Each op captures its input tensors and the gradient cell of its output;
/// `backward` propagates the output gradient to the inputs and recurses.
pub trait BackwardOp {
    /// Propagate gradients to the inputs of this op
    fn backward(&self);
}
