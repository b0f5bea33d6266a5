//! Training loop, schedule, loss log and visualization sinks.

pub mod log;
pub mod schedule;
pub mod sink;
pub mod trainer;

pub use log::ErrorLog;
pub use schedule::DitersSchedule;
pub use sink::{sparkline, NullPlot, PlotFrame, PlotSink, TerminalPlot};
pub use trainer::{GanTrainer, RunSummary};
