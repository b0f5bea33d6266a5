//! Visualization sinks.
//!
//! The trainer pushes a [`PlotFrame`] to a [`PlotSink`] after each generator
//! iteration. The default sink renders an ASCII scatter of the real and
//! generated samples plus sparklines of the loss traces; [`NullPlot`]
//! discards frames for quiet or headless runs.

use crate::train::log::ErrorLog;

/// Unicode sparkline characters for inline metric visualization.
pub const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Generate a sparkline string from a slice of values.
///
/// Uses Unicode block elements to create a compact inline chart. Values are
/// subsampled if there are more of them than `width`.
pub fn sparkline(values: &[f32], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let values: Vec<f32> = if values.len() > width {
        let step = values.len() as f32 / width as f32;
        (0..width)
            .map(|i| {
                let idx = (i as f32 * step) as usize;
                values[idx.min(values.len() - 1)]
            })
            .collect()
    } else {
        values.to_vec()
    };

    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = max - min;

    if range < f32::EPSILON {
        return SPARK_CHARS[4].to_string().repeat(values.len());
    }

    values
        .iter()
        .map(|v| {
            let normalized = (v - min) / range;
            let idx = (normalized * 7.0).round() as usize;
            SPARK_CHARS[idx.min(7)]
        })
        .collect()
}

/// Snapshot handed to the sink after a generator iteration.
#[derive(Clone, Debug)]
pub struct PlotFrame<'a> {
    /// Current epoch (0-indexed).
    pub epoch: usize,
    /// Total epochs planned.
    pub max_epochs: usize,
    /// Generator iterations completed so far.
    pub gen_iterations: usize,
    /// Real sample points for each population, `(x, y)` pairs.
    pub real: [&'a [(f32, f32)]; 2],
    /// Generated sample points for each population.
    pub fake: [&'a [(f32, f32)]; 2],
    /// Loss traces accumulated so far.
    pub log: &'a ErrorLog,
}

/// Receives training snapshots for display.
///
/// Both methods have no-op contracts a sink is free to ignore; the trainer
/// never depends on what a sink does with a frame.
pub trait PlotSink {
    /// Render the latest snapshot.
    fn refresh(&mut self, frame: &PlotFrame<'_>);

    /// Clear any persistent display state.
    fn clear(&mut self) {}
}

/// Sink that discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPlot;

impl PlotSink for NullPlot {
    fn refresh(&mut self, _frame: &PlotFrame<'_>) {}
}

/// Terminal sink: ASCII scatter plot plus loss sparklines.
#[derive(Clone, Debug)]
pub struct TerminalPlot {
    /// Scatter grid width in characters.
    width: usize,
    /// Scatter grid height in characters.
    height: usize,
    /// Plot extent, symmetric about the origin.
    extent: f32,
}

impl TerminalPlot {
    pub fn new(width: usize, height: usize, extent: f32) -> Self {
        Self {
            width: width.max(8),
            height: height.max(4),
            extent: extent.max(f32::EPSILON),
        }
    }

    /// Map a point into grid coordinates, or `None` if it falls outside
    /// the plot extent.
    fn to_cell(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let nx = (x + self.extent) / (2.0 * self.extent);
        let ny = (y + self.extent) / (2.0 * self.extent);
        if !(0.0..=1.0).contains(&nx) || !(0.0..=1.0).contains(&ny) {
            return None;
        }
        let col = ((nx * (self.width - 1) as f32).round() as usize).min(self.width - 1);
        // Terminal rows grow downward; flip y so positive is up.
        let row = (((1.0 - ny) * (self.height - 1) as f32).round() as usize).min(self.height - 1);
        Some((row, col))
    }

    /// Render the scatter grid as lines of text. Real points draw as `o`,
    /// generated points as `x`; a cell holding both draws as `#`.
    fn render_scatter(&self, frame: &PlotFrame<'_>) -> Vec<String> {
        let mut grid = vec![vec![' '; self.width]; self.height];
        for points in frame.real {
            for &(x, y) in points {
                if let Some((r, c)) = self.to_cell(x, y) {
                    grid[r][c] = 'o';
                }
            }
        }
        for points in frame.fake {
            for &(x, y) in points {
                if let Some((r, c)) = self.to_cell(x, y) {
                    grid[r][c] = if grid[r][c] == 'o' { '#' } else { 'x' };
                }
            }
        }
        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}

impl Default for TerminalPlot {
    fn default() -> Self {
        Self::new(64, 24, 4.0)
    }
}

impl PlotSink for TerminalPlot {
    fn refresh(&mut self, frame: &PlotFrame<'_>) {
        println!(
            "--- epoch {}/{} gen_iter {} (o real, x generated) ---",
            frame.epoch + 1,
            frame.max_epochs,
            frame.gen_iterations
        );
        for line in self.render_scatter(frame) {
            println!("|{line}|");
        }
        for k in 0..2 {
            println!(
                "  D[{k}] {}  G[{k}] {}",
                sparkline(frame.log.critic(k), 40),
                sparkline(frame.log.generator(k), 40),
            );
        }
    }

    fn clear(&mut self) {
        // ANSI clear screen and home cursor.
        print!("\x1b[2J\x1b[H");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparkline_empty() {
        assert_eq!(sparkline(&[], 10), "");
        assert_eq!(sparkline(&[1.0], 0), "");
    }

    #[test]
    fn test_sparkline_constant_values() {
        let result = sparkline(&[5.0, 5.0, 5.0], 10);
        assert_eq!(result, "▅▅▅");
    }

    #[test]
    fn test_sparkline_min_max_mapped_to_extremes() {
        let result = sparkline(&[0.0, 1.0], 10);
        let chars: Vec<char> = result.chars().collect();
        assert_eq!(chars[0], SPARK_CHARS[0]);
        assert_eq!(chars[1], SPARK_CHARS[7]);
    }

    #[test]
    fn test_sparkline_subsamples_to_width() {
        let values: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let result = sparkline(&values, 10);
        assert_eq!(result.chars().count(), 10);
    }

    #[test]
    fn test_to_cell_maps_origin_to_center() {
        let plot = TerminalPlot::new(65, 25, 4.0);
        let (r, c) = plot.to_cell(0.0, 0.0).unwrap();
        assert_eq!(c, 32);
        assert_eq!(r, 12);
    }

    #[test]
    fn test_to_cell_rejects_out_of_extent() {
        let plot = TerminalPlot::new(64, 24, 4.0);
        assert!(plot.to_cell(5.0, 0.0).is_none());
        assert!(plot.to_cell(0.0, -4.1).is_none());
        assert!(plot.to_cell(f32::NAN, 0.0).is_none());
    }

    #[test]
    fn test_scatter_marks_real_and_fake() {
        let plot = TerminalPlot::new(16, 8, 4.0);
        let log = ErrorLog::new();
        let real0 = [(-2.0f32, 0.0f32)];
        let fake0 = [(2.0f32, 0.0f32)];
        let frame = PlotFrame {
            epoch: 0,
            max_epochs: 1,
            gen_iterations: 0,
            real: [&real0, &[]],
            fake: [&fake0, &[]],
            log: &log,
        };
        let lines = plot.render_scatter(&frame);
        let joined = lines.join("\n");
        assert!(joined.contains('o'));
        assert!(joined.contains('x'));
    }

    #[test]
    fn test_scatter_overlap_marker() {
        let plot = TerminalPlot::new(16, 8, 4.0);
        let log = ErrorLog::new();
        let pts = [(0.0f32, 0.0f32)];
        let frame = PlotFrame {
            epoch: 0,
            max_epochs: 1,
            gen_iterations: 0,
            real: [&pts, &[]],
            fake: [&pts, &[]],
            log: &log,
        };
        let lines = plot.render_scatter(&frame);
        assert!(lines.join("").contains('#'));
    }

    #[test]
    fn test_null_plot_accepts_frames() {
        let mut sink = NullPlot;
        let log = ErrorLog::new();
        let frame = PlotFrame {
            epoch: 0,
            max_epochs: 1,
            gen_iterations: 0,
            real: [&[], &[]],
            fake: [&[], &[]],
            log: &log,
        };
        sink.refresh(&frame);
        sink.clear();
    }
}
