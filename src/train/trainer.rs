//! Conditional WGAN training orchestrator.
//!
//! Alternates a weight-clamped critic phase against a generator phase.
//! Each critic sub-step fixes its inputs (real batch, conditioning, noise,
//! fake batch) and repeats the gradient step `marginalise` times under
//! independently resampled dropout, which averages the critic update over
//! the dropout distribution.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use crate::autograd::{backward, sub, Tensor};
use crate::config::TrainConfig;
use crate::data::{BiModalNormal, BimodalConfig, SamplePair};
use crate::error::{Result, TrainError};
use crate::io::save_networks;
use crate::nn::{ComplementaryMask, Critic, Generator};
use crate::optim::{clamp_params, Optimizer, RmsProp};
use crate::train::log::ErrorLog;
use crate::train::schedule::DitersSchedule;
use crate::train::sink::{PlotFrame, PlotSink};

/// Final counters from a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Epochs completed.
    pub epochs: usize,
    /// Generator iterations completed.
    pub gen_iterations: usize,
    /// Critic sub-steps completed (batches consumed by the critic phase).
    pub critic_steps: usize,
}

/// Owns both networks, their optimizers and the sample source for one run.
pub struct GanTrainer {
    config: TrainConfig,
    generator: Generator,
    critic: Critic,
    gen_params: Vec<Tensor>,
    critic_params: Vec<Tensor>,
    opt_g: RmsProp,
    opt_d: RmsProp,
    mask: ComplementaryMask,
    source: BiModalNormal,
    schedule: DitersSchedule,
    log: ErrorLog,
    gen_iterations: usize,
    rng: StdRng,
    quiet: bool,
}

impl GanTrainer {
    pub fn new(config: TrainConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let generator = Generator::new(&mut rng, config.input_size, config.nz, config.feature_size);
        let critic = Critic::new(&mut rng, config.input_size, config.feature_size);
        let gen_params = generator.params();
        let critic_params = critic.params();
        let opt_g = RmsProp::default_params(config.lr);
        let opt_d = RmsProp::default_params(config.lr);
        let mask = ComplementaryMask::new(&mut rng, config.batch_size, config.feature_size);
        let source = BiModalNormal::new(BimodalConfig {
            batch_size: config.batch_size,
            input_dim: config.input_size,
            batches_per_epoch: config.epoch_len,
            seed: config.seed,
            ..BimodalConfig::default()
        });
        let schedule = DitersSchedule::new(config.diters);

        Self {
            config,
            generator,
            critic,
            gen_params,
            critic_params,
            opt_g,
            opt_d,
            mask,
            source,
            schedule,
            log: ErrorLog::new(),
            gen_iterations: 0,
            rng,
            quiet: false,
        }
    }

    /// Replace the critic iteration schedule. The scenario tests run with a
    /// flat schedule so epoch step counts are predictable.
    pub fn with_schedule(mut self, schedule: DitersSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Suppress the per-iteration console line.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn log(&self) -> &ErrorLog {
        &self.log
    }

    pub fn gen_iterations(&self) -> usize {
        self.gen_iterations
    }

    pub fn critic(&self) -> &Critic {
        &self.critic
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn mask(&self) -> &ComplementaryMask {
        &self.mask
    }

    fn sample_noise(&mut self) -> Tensor {
        let n = self.config.batch_size * self.config.nz;
        let data: Vec<f32> = (0..n)
            .map(|_| StandardNormal.sample(&mut self.rng))
            .collect();
        Tensor::from_vec(data, false)
    }

    /// Check a recorded loss and fail the run on NaN/Inf.
    fn ensure_finite(&self, quantity: &'static str, value: f32) -> Result<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(TrainError::NonFinite {
                quantity,
                iteration: self.gen_iterations,
            })
        }
    }

    /// One critic sub-step over both sub-populations.
    ///
    /// Each sub-population gets its own fresh draw; that draw's inputs are
    /// then held fixed, and only the dropout masks inside the critic vary
    /// across the `marginalise` repetitions.
    fn critic_step(&mut self) -> Result<()> {
        let batch = self.config.batch_size;
        let (lo, hi) = (self.config.clamp_lower, self.config.clamp_upper);

        for k in 0..2 {
            let pair = self.source.next_pair();
            let real = pair.tensor(k);
            let conditioning = pair.conditioning(k);
            let noise = self.sample_noise();
            let fake = self
                .generator
                .forward(&noise, &conditioning, batch)
                .detach();

            for _ in 0..self.config.marginalise {
                clamp_params(&mut self.critic_params, lo, hi);
                self.opt_d.zero_grad(&mut self.critic_params);

                let score_real = self.critic.forward(&real, batch, self.mask.row(k), &mut self.rng);
                let score_fake = self.critic.forward(&fake, batch, self.mask.row(k), &mut self.rng);
                let mut loss_d = sub(&score_real, &score_fake);

                let value = loss_d.item();
                self.ensure_finite("critic loss", value)?;
                backward(&mut loss_d, None);
                self.opt_d.step(&mut self.critic_params);
                self.log.push_critic(k, value);
            }
        }
        Ok(())
    }

    /// One generator iteration over both sub-populations.
    ///
    /// The critic optimizer never sees the generator's tape, so critic
    /// gradients produced here are inert until the next critic phase zeroes
    /// them.
    fn generator_step(&mut self, pair: &SamplePair) -> Result<[Vec<(f32, f32)>; 2]> {
        let batch = self.config.batch_size;
        let mut scatters: [Vec<(f32, f32)>; 2] = [Vec::new(), Vec::new()];

        for k in 0..2 {
            self.opt_g.zero_grad(&mut self.gen_params);

            let conditioning = pair.conditioning(k);
            let noise = self.sample_noise();
            let fake = self.generator.forward(&noise, &conditioning, batch);
            let mut loss_g = self.critic.forward(&fake, batch, self.mask.row(k), &mut self.rng);

            let value = loss_g.item();
            self.ensure_finite("generator loss", value)?;
            backward(&mut loss_g, None);
            self.opt_g.step(&mut self.gen_params);
            self.log.push_generator(k, value);

            scatters[k] = fake_points(&fake, batch, self.config.input_size);
        }
        self.gen_iterations += 1;
        Ok(scatters)
    }

    /// Run the full training loop, pushing a frame to `sink` after every
    /// generator iteration.
    pub fn run(&mut self, sink: &mut dyn PlotSink) -> Result<RunSummary> {
        let len = self.source.len();
        let mut critic_steps = 0usize;

        for epoch in 0..self.config.niter {
            self.source.reset();
            let mut i = 0usize;

            while i < len {
                let diters = self.schedule.diters_at(self.gen_iterations);
                let mut j = 0usize;
                while j < diters && i < len {
                    i += 1;
                    j += 1;
                    critic_steps += 1;
                    self.critic_step()?;
                }

                let pair = self.source.next_pair();
                let fake = self.generator_step(&pair)?;

                if !self.quiet {
                    println!(
                        "[{}/{}][{}/{}][{}] Loss_D: {:.6} Loss_D: {:.6} Loss_G: {:.6} Loss_G: {:.6}",
                        epoch,
                        self.config.niter,
                        i,
                        len,
                        self.gen_iterations,
                        self.log.last_critic(0).unwrap_or(0.0),
                        self.log.last_critic(1).unwrap_or(0.0),
                        self.log.last_generator(0).unwrap_or(0.0),
                        self.log.last_generator(1).unwrap_or(0.0),
                    );
                }

                let real0 = pair.points(0);
                let real1 = pair.points(1);
                let frame = PlotFrame {
                    epoch,
                    max_epochs: self.config.niter,
                    gen_iterations: self.gen_iterations,
                    real: [&real0, &real1],
                    fake: [&fake[0], &fake[1]],
                    log: &self.log,
                };
                sink.clear();
                sink.refresh(&frame);
            }

            if self.config.checkpoint_every > 0
                && (epoch + 1) % self.config.checkpoint_every == 0
            {
                save_networks(
                    &self.config.experiment,
                    epoch,
                    &self.generator,
                    &self.critic,
                )?;
            }
        }

        Ok(RunSummary {
            epochs: self.config.niter,
            gen_iterations: self.gen_iterations,
            critic_steps,
        })
    }
}

/// Scatter points of a generated batch (first two columns).
fn fake_points(fake: &Tensor, batch: usize, input_dim: usize) -> Vec<(f32, f32)> {
    let data: std::cell::Ref<'_, Array1<f32>> = fake.data();
    (0..batch)
        .map(|r| {
            let x = data[r * input_dim];
            let y = if input_dim > 1 { data[r * input_dim + 1] } else { 0.0 };
            (x, y)
        })
        .collect()
}
