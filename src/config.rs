//! CLI surface and validated training configuration

use crate::error::ConfigError;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

/// Marginar: conditional weight-clamped WGAN experiment driver
#[derive(Parser, Debug, Clone)]
#[command(name = "marginar")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Train a conditional WGAN on a 2D bimodal-normal distribution")]
pub struct Cli {
    /// Dataset name
    #[arg(long, default_value = "bimodal")]
    pub dataset: String,

    /// Path to dataset (unused by the synthetic source, kept for parity)
    #[arg(long)]
    pub dataroot: Option<PathBuf>,

    /// Input batch size
    #[arg(long, default_value_t = 100)]
    pub batch_size: usize,

    /// Dimensionality of each input sample
    #[arg(long, default_value_t = 2)]
    pub input_size: usize,

    /// Size of the latent z vector
    #[arg(long, default_value_t = 100)]
    pub nz: usize,

    /// Hidden feature width of both networks
    #[arg(long, default_value_t = 512)]
    pub feature_size: usize,

    /// Number of epochs to train for
    #[arg(long, default_value_t = 500)]
    pub niter: usize,

    /// Learning rate for both optimizers
    #[arg(long, default_value_t = 0.00001)]
    pub lr: f64,

    /// Lower weight-clamp bound for the critic
    #[arg(long, default_value_t = -0.01)]
    pub clamp_lower: f32,

    /// Upper weight-clamp bound for the critic
    #[arg(long, default_value_t = 0.01)]
    pub clamp_upper: f32,

    /// Number of critic iterations per generator iteration
    #[arg(long, default_value_t = 5)]
    pub diters: usize,

    /// Nominal batches per epoch
    #[arg(long, default_value_t = 100)]
    pub epoch_len: usize,

    /// Random seed (omit for a random seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to store samples and checkpoints
    #[arg(long, default_value = "samples")]
    pub experiment: PathBuf,

    /// Save network checkpoints every N epochs (0 disables)
    #[arg(long, default_value_t = 0)]
    pub checkpoint_every: usize,

    /// Suppress the live terminal plot
    #[arg(short, long)]
    pub quiet: bool,
}

/// Validated training configuration
#[derive(Debug, Clone, Serialize)]
pub struct TrainConfig {
    pub dataset: String,
    pub batch_size: usize,
    pub input_size: usize,
    pub nz: usize,
    pub feature_size: usize,
    pub niter: usize,
    pub lr: f32,
    pub clamp_lower: f32,
    pub clamp_upper: f32,
    pub diters: usize,
    /// Monte-Carlo dropout repetitions per critic sub-step
    pub marginalise: usize,
    pub epoch_len: usize,
    pub seed: u64,
    pub experiment: PathBuf,
    pub checkpoint_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset: "bimodal".to_string(),
            batch_size: 100,
            input_size: 2,
            nz: 100,
            feature_size: 512,
            niter: 500,
            lr: 0.00001,
            clamp_lower: -0.01,
            clamp_upper: 0.01,
            diters: 5,
            marginalise: 10,
            epoch_len: 100,
            seed: 0,
            experiment: PathBuf::from("samples"),
            checkpoint_every: 0,
        }
    }
}

impl TrainConfig {
    /// Build a validated config from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let seed = cli.seed.unwrap_or_else(|| rand::random::<u64>() % 10_000 + 1);

        let config = Self {
            dataset: cli.dataset.clone(),
            batch_size: cli.batch_size,
            input_size: cli.input_size,
            nz: cli.nz,
            feature_size: cli.feature_size,
            niter: cli.niter,
            lr: cli.lr as f32,
            clamp_lower: cli.clamp_lower,
            clamp_upper: cli.clamp_upper,
            diters: cli.diters,
            marginalise: 10,
            epoch_len: cli.epoch_len,
            seed,
            experiment: cli.experiment.clone(),
            checkpoint_every: cli.checkpoint_every,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the training loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dataset != "bimodal" {
            return Err(ConfigError::UnknownDataset(self.dataset.clone()));
        }

        for (field, value) in [
            ("batch_size", self.batch_size),
            ("input_size", self.input_size),
            ("nz", self.nz),
            ("feature_size", self.feature_size),
            ("niter", self.niter),
            ("diters", self.diters),
            ("marginalise", self.marginalise),
            ("epoch_len", self.epoch_len),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive { field, value: 0 });
            }
        }

        if !(self.lr > 0.0 && self.lr.is_finite()) {
            return Err(ConfigError::InvalidLearningRate(f64::from(self.lr)));
        }

        if self.clamp_lower >= self.clamp_upper {
            return Err(ConfigError::EmptyClampInterval {
                lo: self.clamp_lower,
                hi: self.clamp_upper,
            });
        }

        Ok(())
    }
}
