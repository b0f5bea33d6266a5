//! Network checkpointing.
//!
//! Snapshots are plain JSON: a network name plus the per-layer weight and
//! bias vectors, written as `{experiment}/{name}_epoch_{e}.json`. Disabled
//! by default; the trainer writes them only when a checkpoint interval is
//! configured.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::nn::{Critic, Generator};

/// One layer's parameters in flat row-major form.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LayerState {
    pub weight: Vec<f32>,
    pub bias: Vec<f32>,
}

/// Serializable snapshot of one network.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NetworkState {
    pub name: String,
    pub layers: Vec<LayerState>,
}

impl NetworkState {
    pub fn new(name: impl Into<String>, layers: Vec<(Vec<f32>, Vec<f32>)>) -> Self {
        Self {
            name: name.into(),
            layers: layers
                .into_iter()
                .map(|(weight, bias)| LayerState { weight, bias })
                .collect(),
        }
    }

    /// Per-layer `(weight, bias)` pairs in network order.
    pub fn into_layers(self) -> Vec<(Vec<f32>, Vec<f32>)> {
        self.layers
            .into_iter()
            .map(|layer| (layer.weight, layer.bias))
            .collect()
    }
}

/// Write a snapshot as pretty JSON.
pub fn save_checkpoint(state: &NetworkState, path: impl AsRef<Path>) -> Result<()> {
    let data = serde_json::to_string_pretty(state)?;
    fs::write(path.as_ref(), data)?;
    Ok(())
}

/// Read a snapshot back.
pub fn load_checkpoint(path: impl AsRef<Path>) -> Result<NetworkState> {
    let data = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&data)?)
}

/// Checkpoint path for a named network at an epoch.
pub fn checkpoint_path(dir: &Path, name: &str, epoch: usize) -> PathBuf {
    dir.join(format!("{name}_epoch_{epoch}.json"))
}

/// Snapshot both networks into `dir` for the given epoch.
///
/// The directory is created if missing; re-creation is a no-op.
pub fn save_networks(
    dir: &Path,
    epoch: usize,
    generator: &Generator,
    critic: &Critic,
) -> Result<()> {
    fs::create_dir_all(dir)?;
    let gen_state = NetworkState::new("generator", generator.state());
    save_checkpoint(&gen_state, checkpoint_path(dir, "generator", epoch))?;
    let critic_state = NetworkState::new("critic", critic.state());
    save_checkpoint(&critic_state, checkpoint_path(dir, "critic", epoch))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_checkpoint_round_trip() {
        let state = NetworkState::new(
            "critic",
            vec![(vec![1.0, 2.0], vec![0.5]), (vec![-1.0], vec![0.0])],
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("critic.json");
        save_checkpoint(&state, &path).unwrap();
        let loaded = load_checkpoint(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_checkpoint_path_format() {
        let path = checkpoint_path(Path::new("samples"), "generator", 42);
        assert_eq!(path, Path::new("samples/generator_epoch_42.json"));
    }

    #[test]
    fn test_save_networks_writes_both_files() {
        let mut rng = StdRng::seed_from_u64(1);
        let generator = Generator::new(&mut rng, 2, 4, 8);
        let critic = Critic::new(&mut rng, 2, 8);
        let dir = tempfile::tempdir().unwrap();
        save_networks(dir.path(), 0, &generator, &critic).unwrap();
        assert!(checkpoint_path(dir.path(), "generator", 0).exists());
        assert!(checkpoint_path(dir.path(), "critic", 0).exists());
    }

    #[test]
    fn test_load_state_restores_network() {
        let mut rng = StdRng::seed_from_u64(2);
        let critic = Critic::new(&mut rng, 2, 8);
        let dir = tempfile::tempdir().unwrap();
        let path = checkpoint_path(dir.path(), "critic", 3);
        save_checkpoint(&NetworkState::new("critic", critic.state()), &path).unwrap();

        let mut restored = Critic::new(&mut rng, 2, 8);
        restored.load_state(&load_checkpoint(&path).unwrap().into_layers());
        assert_eq!(restored.state(), critic.state());
    }

    #[test]
    fn test_save_networks_creates_missing_dir() {
        let mut rng = StdRng::seed_from_u64(3);
        let generator = Generator::new(&mut rng, 2, 4, 8);
        let critic = Critic::new(&mut rng, 2, 8);
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        save_networks(&nested, 1, &generator, &critic).unwrap();
        save_networks(&nested, 1, &generator, &critic).unwrap();
        assert!(checkpoint_path(&nested, "critic", 1).exists());
    }
}
