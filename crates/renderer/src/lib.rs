//! Text dashboard for the real-time-factor monitor.
//!
//! Three blocks, top to bottom:
//! - one summary line with count, mean, standard deviation and extrema
//! - the histogram, with adjacent bins merged down to `histogram_rows` rows
//! - a sparkline of the trend window scaled to `[trend_min, trend_max]`

use rtf_config::DisplayConfig;
use rtf_core::{DisplaySnapshot, HistogramState, StatsSnapshot};
use std::fmt::Write as _;

const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Renders [`DisplaySnapshot`]s as plain text.
#[derive(Debug, Clone)]
pub struct Dashboard {
    rows:      usize,
    bar_width: usize,
    trend_min: f64,
    trend_max: f64,
}

impl Dashboard {
    /// Build a [`Dashboard`] from the config file's `[display]` section.
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            rows:      config.histogram_rows.max(1),
            bar_width: config.bar_width.max(1),
            trend_min: config.trend_min,
            trend_max: config.trend_max,
        }
    }

    pub fn render(&self, snapshot: &DisplaySnapshot) -> String {
        let mut out = summary_line(&snapshot.stats);
        out.push('\n');
        for line in self.histogram_lines(&snapshot.histogram) {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str("trend ");
        out.push_str(&self.sparkline(&snapshot.window));
        out.push('\n');
        out
    }

    /// One line per merged row: `[lower, upper) count |####`.
    pub fn histogram_lines(&self, histogram: &HistogramState) -> Vec<String> {
        let bins = histogram.counts.len();
        if bins == 0 {
            return Vec::new();
        }
        let per_row = bins.div_ceil(self.rows);
        let width = histogram.layout.bin_width();

        let rows: Vec<(f64, f64, u64)> = histogram
            .counts
            .chunks(per_row)
            .enumerate()
            .map(|(i, chunk)| {
                let first = i * per_row;
                let lower = histogram.layout.min + first as f64 * width;
                let upper = histogram.layout.min + (first + chunk.len()) as f64 * width;
                (lower, upper, chunk.iter().sum())
            })
            .collect();

        let peak = rows.iter().map(|r| r.2).max().unwrap_or(0);

        rows.into_iter()
            .map(|(lower, upper, count)| {
                let len = if peak == 0 {
                    0
                } else {
                    ((count as f64 / peak as f64) * self.bar_width as f64).round() as usize
                };
                let mut line = String::new();
                let _ = write!(line, "[{lower:>6.3}, {upper:>6.3}) {count:>8} |");
                line.push_str(&"#".repeat(len));
                line
            })
            .collect()
    }

    /// One block character per sample, clamped to the configured scale.
    pub fn sparkline(&self, values: &[f64]) -> String {
        let span = self.trend_max - self.trend_min;
        values
            .iter()
            .map(|&v| {
                let t = if span > 0.0 {
                    ((v - self.trend_min) / span).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                SPARK[(t * (SPARK.len() - 1) as f64).round() as usize]
            })
            .collect()
    }
}

/// `n=… mean=… sd=… min=… max=…`, or a placeholder when empty.
pub fn summary_line(stats: &StatsSnapshot) -> String {
    if stats.is_empty() {
        return "RTF  n=0  (no samples yet)".to_string();
    }
    format!(
        "RTF  n={}  mean={:.4}  sd={:.4}  min={:.4}  max={:.4}",
        stats.count,
        stats.mean,
        stats.stddev(),
        stats.min,
        stats.max
    )
}
