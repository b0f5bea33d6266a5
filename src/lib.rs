//! Marginar: conditional weight-clamped WGAN with Monte-Carlo dropout
//! marginalisation.
//!
//! Trains a small conditional Wasserstein-style GAN on a synthetic 2D
//! bimodal-normal distribution. The critic is Lipschitz-constrained by
//! box-clamping its weights and its gradient steps are averaged over
//! resampled dropout masks. Everything runs on flat `f32` tensors with a
//! tape-based reverse-mode autograd.
//!
//! # Example
//!
//! ```no_run
//! use marginar::config::TrainConfig;
//! use marginar::train::{GanTrainer, NullPlot};
//!
//! let config = TrainConfig { niter: 1, ..TrainConfig::default() };
//! let mut trainer = GanTrainer::new(config);
//! let summary = trainer.run(&mut NullPlot).unwrap();
//! println!("{} generator iterations", summary.gen_iterations);
//! ```

pub mod autograd;
pub mod config;
pub mod data;
pub mod error;
pub mod io;
pub mod nn;
pub mod optim;
pub mod train;

pub use autograd::Tensor;
pub use error::{ConfigError, Result, TrainError};
