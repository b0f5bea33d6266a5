//! Error types

use thiserror::Error;

/// Configuration validation errors, caught at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("'{field}' must be positive, got {value}")]
    NonPositive { field: &'static str, value: i64 },

    #[error("learning rate must be positive and finite, got {0}")]
    InvalidLearningRate(f64),

    #[error("clamp interval [{lo}, {hi}] is empty")]
    EmptyClampInterval { lo: f32, hi: f32 },

    #[error("unknown dataset '{0}' (expected 'bimodal')")]
    UnknownDataset(String),
}

/// Training-time errors
#[derive(Debug, Error)]
pub enum TrainError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("non-finite {quantity} at iteration {iteration}")]
    NonFinite { quantity: &'static str, iteration: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("checkpoint serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for training operations
pub type Result<T> = std::result::Result<T, TrainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let e = ConfigError::NonPositive { field: "batch_size", value: 0 };
        assert_eq!(e.to_string(), "'batch_size' must be positive, got 0");
    }

    #[test]
    fn test_clamp_interval_display() {
        let e = ConfigError::EmptyClampInterval { lo: 0.01, hi: -0.01 };
        assert!(e.to_string().contains("empty"));
    }

    #[test]
    fn test_train_error_wraps_config() {
        let e: TrainError = ConfigError::UnknownDataset("circle".into()).into();
        assert!(e.to_string().contains("circle"));
    }

    #[test]
    fn test_non_finite_display() {
        let e = TrainError::NonFinite { quantity: "critic loss", iteration: 7 };
        assert_eq!(e.to_string(), "non-finite critic loss at iteration 7");
    }
}
