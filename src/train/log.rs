//! Append-only loss history.

/// Per-population loss traces accumulated over a run.
///
/// Indices 0 and 1 hold the critic's Wasserstein estimate for populations
/// 0 and 1; indices 2 and 3 hold the corresponding generator losses.
/// Critic entries are appended once per critic sub-step, generator entries
/// once per generator iteration, so the critic traces are typically much
/// longer than the generator traces.
#[derive(Clone, Debug, Default)]
pub struct ErrorLog {
    traces: [Vec<f32>; 4],
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a critic loss for population `k` (0 or 1).
    pub fn push_critic(&mut self, k: usize, loss: f32) {
        debug_assert!(k < 2, "population index out of range: {k}");
        self.traces[k].push(loss);
    }

    /// Record a generator loss for population `k` (0 or 1).
    pub fn push_generator(&mut self, k: usize, loss: f32) {
        debug_assert!(k < 2, "population index out of range: {k}");
        self.traces[k + 2].push(loss);
    }

    /// Critic trace for population `k`.
    pub fn critic(&self, k: usize) -> &[f32] {
        &self.traces[k]
    }

    /// Generator trace for population `k`.
    pub fn generator(&self, k: usize) -> &[f32] {
        &self.traces[k + 2]
    }

    /// All four traces, critic first.
    pub fn traces(&self) -> &[Vec<f32>; 4] {
        &self.traces
    }

    /// Most recent critic loss for population `k`, if any.
    pub fn last_critic(&self, k: usize) -> Option<f32> {
        self.traces[k].last().copied()
    }

    /// Most recent generator loss for population `k`, if any.
    pub fn last_generator(&self, k: usize) -> Option<f32> {
        self.traces[k + 2].last().copied()
    }
}
