//! Networks: critic, generator, linear layers, weight init, population masks

mod critic;
mod generator;
mod init;
mod linear;
mod mask;

pub use critic::Critic;
pub use generator::Generator;
pub use init::{init_bias, init_weights, WeightTier};
pub use linear::Linear;
pub use mask::ComplementaryMask;
