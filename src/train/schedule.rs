//! Critic iteration schedule.
//!
//! Early in training the critic takes many more steps per generator step
//! so its scores are informative before the generator starts chasing them.
//! The schedule also periodically re-burns the critic to keep it near
//! optimality as the generator distribution drifts.

/// Number of critic sub-steps to run before each generator step.
///
/// Keyed off the *generator* iteration count, not the global step count,
/// so restarts of the critic inner loop do not advance the schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DitersSchedule {
    /// Generator iterations considered "warmup".
    warmup_steps: usize,
    /// Critic sub-steps during warmup and catch-up bursts.
    warmup_diters: usize,
    /// Re-burn the critic every this many generator iterations (0 disables).
    catchup_every: usize,
    /// Critic sub-steps in steady state.
    default_diters: usize,
}

impl DitersSchedule {
    /// Standard schedule: 100 critic steps for the first 25 generator
    /// iterations and every 500th thereafter, `default_diters` otherwise.
    pub fn new(default_diters: usize) -> Self {
        Self {
            warmup_steps: 25,
            warmup_diters: 100,
            catchup_every: 500,
            default_diters,
        }
    }

    /// A flat schedule that always returns `diters`. Useful for tests and
    /// for runs where the warmup burst is unwanted.
    pub fn constant(diters: usize) -> Self {
        Self {
            warmup_steps: 0,
            warmup_diters: diters,
            catchup_every: 0,
            default_diters: diters,
        }
    }

    /// Critic sub-steps before generator iteration `gen_iterations`.
    pub fn diters_at(&self, gen_iterations: usize) -> usize {
        if gen_iterations < self.warmup_steps {
            return self.warmup_diters;
        }
        if self.catchup_every > 0 && gen_iterations % self.catchup_every == 0 {
            return self.warmup_diters;
        }
        self.default_diters
    }
}

impl Default for DitersSchedule {
    fn default() -> Self {
        Self::new(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warmup_uses_burst() {
        let s = DitersSchedule::new(5);
        for g in 0..25 {
            assert_eq!(s.diters_at(g), 100, "gen iteration {g}");
        }
    }

    #[test]
    fn test_steady_state_uses_default() {
        let s = DitersSchedule::new(5);
        assert_eq!(s.diters_at(25), 5);
        assert_eq!(s.diters_at(26), 5);
        assert_eq!(s.diters_at(499), 5);
        assert_eq!(s.diters_at(501), 5);
    }

    #[test]
    fn test_catchup_burst_every_500() {
        let s = DitersSchedule::new(5);
        assert_eq!(s.diters_at(500), 100);
        assert_eq!(s.diters_at(1000), 100);
        assert_eq!(s.diters_at(1500), 100);
    }

    #[test]
    fn test_custom_default_diters() {
        let s = DitersSchedule::new(7);
        assert_eq!(s.diters_at(30), 7);
        assert_eq!(s.diters_at(10), 100);
    }

    #[test]
    fn test_constant_ignores_warmup_and_catchup() {
        let s = DitersSchedule::constant(3);
        assert_eq!(s.diters_at(0), 3);
        assert_eq!(s.diters_at(24), 3);
        assert_eq!(s.diters_at(500), 3);
        assert_eq!(s.diters_at(1000), 3);
    }

    #[test]
    fn test_default_matches_new_5() {
        assert_eq!(DitersSchedule::default(), DitersSchedule::new(5));
    }
}
