//! Marginar CLI
//!
//! Trains the conditional weight-clamped WGAN on the built-in 2D
//! bimodal-normal source and renders progress as an ASCII scatter with
//! loss sparklines.
//!
//! # Usage
//!
//! ```bash
//! # Train with defaults (500 epochs, batch 100)
//! marginar
//!
//! # Short deterministic run without the live plot
//! marginar --niter 10 --seed 42 --quiet
//!
//! # Keep per-epoch network snapshots
//! marginar --experiment runs/bimodal --checkpoint-every 50
//! ```

use clap::Parser;
use marginar::config::{Cli, TrainConfig};
use marginar::error::Result;
use marginar::train::{GanTrainer, NullPlot, PlotSink, TerminalPlot};
use std::fs;
use std::process::ExitCode;

fn run(cli: Cli) -> Result<()> {
    let config = TrainConfig::from_cli(&cli)?;
    fs::create_dir_all(&config.experiment)?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    let mut trainer = GanTrainer::new(config).with_quiet(cli.quiet);
    let mut sink: Box<dyn PlotSink> = if cli.quiet {
        Box::new(NullPlot)
    } else {
        Box::new(TerminalPlot::default())
    };

    let summary = trainer.run(sink.as_mut())?;
    println!(
        "done: {} epochs, {} generator iterations, {} critic steps",
        summary.epochs, summary.gen_iterations, summary.critic_steps
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
