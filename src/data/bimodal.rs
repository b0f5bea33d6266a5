//! Bimodal-normal sample source
//!
//! Streams paired batches of two Gaussian sub-populations. `len()` is the
//! nominal number of batches per epoch; drawing never exhausts — the training
//! orchestrator bounds its own position counter against `len()` and keeps
//! drawing for conditioning, plotting and the generator phase.

use crate::autograd::Tensor;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Configuration for the bimodal source
#[derive(Debug, Clone)]
pub struct BimodalConfig {
    /// Samples per sub-population batch
    pub batch_size: usize,
    /// Dimensionality of each sample
    pub input_dim: usize,
    /// Nominal batches per epoch
    pub batches_per_epoch: usize,
    /// Mode center for each sub-population (applied to every dimension)
    pub centers: [f32; 2],
    /// Standard deviation of both modes
    pub std_dev: f32,
    /// Base seed for the draw stream
    pub seed: u64,
}

impl Default for BimodalConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            input_dim: 2,
            batches_per_epoch: 100,
            centers: [-2.0, 2.0],
            std_dev: 0.5,
            seed: 0,
        }
    }
}

/// A freshly drawn pair of sub-population batches, immutable once drawn.
///
/// Each sub-population is a flat row-major `(batch_size, input_dim)` matrix.
#[derive(Debug, Clone)]
pub struct SamplePair {
    pops: [Array1<f32>; 2],
    batch_size: usize,
    input_dim: usize,
}

impl SamplePair {
    /// Batch size of each sub-population
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Sample dimensionality
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Raw flat data for sub-population `k`
    pub fn pop(&self, k: usize) -> &Array1<f32> {
        &self.pops[k]
    }

    /// Sub-population `k` as a non-grad tensor
    pub fn tensor(&self, k: usize) -> Tensor {
        Tensor::new(self.pops[k].clone(), false)
    }

    /// Exact per-column sample mean of sub-population `k`
    pub fn mean(&self, k: usize) -> Vec<f32> {
        let mut means = vec![0.0f32; self.input_dim];
        let data = &self.pops[k];
        for r in 0..self.batch_size {
            for c in 0..self.input_dim {
                means[c] += data[r * self.input_dim + c];
            }
        }
        for m in &mut means {
            *m /= self.batch_size as f32;
        }
        means
    }

    /// Conditioning vector for sub-population `k`: the batch mean broadcast
    /// over every row, as a non-grad `(batch_size, input_dim)` tensor.
    pub fn conditioning(&self, k: usize) -> Tensor {
        let means = self.mean(k);
        let mut data = Vec::with_capacity(self.batch_size * self.input_dim);
        for _ in 0..self.batch_size {
            data.extend_from_slice(&means);
        }
        Tensor::from_vec(data, false)
    }

    /// (x, y) scatter points of sub-population `k` (first two dimensions)
    pub fn points(&self, k: usize) -> Vec<(f32, f32)> {
        let data = &self.pops[k];
        (0..self.batch_size)
            .map(|r| {
                let x = data[r * self.input_dim];
                let y = if self.input_dim > 1 { data[r * self.input_dim + 1] } else { 0.0 };
                (x, y)
            })
            .collect()
    }
}

/// Seeded source of bimodal-normal sample pairs
pub struct BiModalNormal {
    config: BimodalConfig,
    draws: u64,
}

impl BiModalNormal {
    /// Create a new source
    pub fn new(config: BimodalConfig) -> Self {
        Self { config, draws: 0 }
    }

    /// Nominal batches per epoch
    pub fn len(&self) -> usize {
        self.config.batches_per_epoch
    }

    /// True if the nominal epoch length is zero
    pub fn is_empty(&self) -> bool {
        self.config.batches_per_epoch == 0
    }

    /// Source configuration
    pub fn config(&self) -> &BimodalConfig {
        &self.config
    }

    /// Number of draws made so far
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Rewind the draw stream to the beginning
    pub fn reset(&mut self) {
        self.draws = 0;
    }

    /// The pair at stream position `draw`, as a pure function of (seed, draw)
    pub fn pair_at(&self, draw: u64) -> SamplePair {
        // per-position RNG keeps every draw reproducible independently of
        // how many times the stream has been consumed
        let mut rng = StdRng::seed_from_u64(
            self.config.seed.wrapping_add(draw.wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        );

        let n = self.config.batch_size * self.config.input_dim;
        let pops = [0usize, 1].map(|k| {
            let center = self.config.centers[k];
            let std_dev = self.config.std_dev;
            Array1::from(
                (0..n)
                    .map(|_| {
                        let z: f32 = rng.sample(StandardNormal);
                        center + z * std_dev
                    })
                    .collect::<Vec<f32>>(),
            )
        });

        SamplePair {
            pops,
            batch_size: self.config.batch_size,
            input_dim: self.config.input_dim,
        }
    }

    /// Draw the next pair, advancing the stream
    pub fn next_pair(&mut self) -> SamplePair {
        let pair = self.pair_at(self.draws);
        self.draws += 1;
        pair
    }
}
