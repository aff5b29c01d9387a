use serde::{Deserialize, Serialize};

use crate::error::{Result, RtfError};

/// Aggregate statistics over every sample seen since the last reset.
///
/// When `count == 0` the remaining fields carry no information and are all
/// zero; check [`StatsSnapshot::is_empty`] before reading them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsSnapshot {
    pub count: u64,
    pub mean: f64,
    /// Population variance (sum of squared deviations divided by `count`).
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl StatsSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Population standard deviation.
    #[must_use]
    pub fn stddev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Bin count and numeric range of a histogram.
///
/// Doubles as the `[histogram]` section of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramLayout {
    /// Number of equal-width bins.
    pub bins: usize,
    /// Inclusive lower edge of the first bin.
    pub min: f64,
    /// Upper edge of the last bin (inclusive for that bin only).
    pub max: f64,
}

impl Default for HistogramLayout {
    fn default() -> Self {
        Self {
            bins: 200,
            min: 0.0,
            max: 2.0,
        }
    }
}

impl HistogramLayout {
    pub fn new(bins: usize, min: f64, max: f64) -> Result<Self> {
        let layout = Self { bins, min, max };
        layout.validate()?;
        Ok(layout)
    }

    /// Reject zero bins, non-finite edges, empty or inverted ranges, and
    /// ranges too wide (or too narrow) for a usable bin width.
    pub fn validate(&self) -> Result<()> {
        let width = self.bin_width();
        if self.bins == 0
            || !self.min.is_finite()
            || !self.max.is_finite()
            || self.min >= self.max
            || !width.is_finite()
            || width <= 0.0
        {
            return Err(RtfError::InvalidRange {
                bins: self.bins,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.bins as f64
    }
}

/// Layout plus per-bin counts; `counts.len() == layout.bins`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramState {
    pub layout: HistogramLayout,
    pub counts: Vec<u64>,
}

impl HistogramState {
    /// An all-zero histogram for `layout`.
    pub fn empty(layout: HistogramLayout) -> Self {
        Self {
            layout,
            counts: vec![0; layout.bins],
        }
    }

    /// Sum of all bin counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// The unit written to and read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedRecord {
    /// Simulation time of the last clock tick, in seconds.
    pub sim_time: f64,
    /// Wall-clock time of the last clock tick, in seconds.
    pub real_time: f64,
    pub stats: StatsSnapshot,
    pub histogram: HistogramState,
}

/// Everything the dashboard needs, captured under one lock so the three
/// parts describe the same population.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySnapshot {
    pub stats: StatsSnapshot,
    pub histogram: HistogramState,
    /// Recent samples, oldest first.
    pub window: Vec<f64>,
}
