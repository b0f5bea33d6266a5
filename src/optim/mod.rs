//! Optimizers for training the networks

mod clamp;
mod optimizer;
mod rmsprop;

pub use clamp::clamp_params;
pub use optimizer::Optimizer;
pub use rmsprop::RmsProp;
