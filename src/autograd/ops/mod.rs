//! Autograd operations with backward passes
//!
//! This module provides differentiable operations for automatic differentiation.

mod activations;
mod basic;
mod dropout;
mod matmul;

// Re-export all public operations
pub use activations::relu;
pub use basic::{mean, sub};
pub use dropout::{dropout, mul_mask};
pub use matmul::{add_bias, concat_cols, matmul, matmul_compute, transpose};
