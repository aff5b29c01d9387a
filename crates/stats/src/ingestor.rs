use rtf_core::{
    DisplaySnapshot, HistogramLayout, HistogramState, PersistedRecord, Result, RtfError,
    StatsSnapshot,
};

use crate::{BoundedWindow, Histogram, StatsAccumulator};

/// Owns the statistics, histogram and trend window and fans each sample out
/// to all three.
#[derive(Debug, Clone)]
pub struct SampleIngestor {
    stats:     StatsAccumulator,
    histogram: Histogram,
    window:    BoundedWindow,
}

impl SampleIngestor {
    pub fn new(layout: HistogramLayout, window_capacity: usize) -> Result<Self> {
        Ok(Self {
            stats:     StatsAccumulator::new(),
            histogram: Histogram::new(layout)?,
            window:    BoundedWindow::new(window_capacity)?,
        })
    }

    /// Record one sample everywhere, or nowhere if it is not finite.
    ///
    /// A sample outside the histogram range is still counted by the
    /// statistics and kept in the window.
    pub fn on_sample(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(RtfError::InvalidSample(value));
        }
        self.stats.insert(value)?;
        self.histogram.insert(value)?;
        self.window.push(value);
        Ok(())
    }

    /// Clear the statistics and histogram counts.  The window is untouched so
    /// the trend view stays continuous.
    pub fn reset(&mut self) {
        self.stats.reset();
        self.histogram.reset();
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn counts(&self) -> &[u64] {
        self.histogram.counts()
    }

    pub fn values(&self) -> Vec<f64> {
        self.window.values()
    }

    pub fn histogram_state(&self) -> HistogramState {
        self.histogram.state()
    }

    pub fn display_snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            stats:     self.snapshot(),
            histogram: self.histogram_state(),
            window:    self.values(),
        }
    }

    /// Bundle the current state with the given clock times for persistence.
    pub fn record(&self, sim_time: f64, real_time: f64) -> PersistedRecord {
        PersistedRecord {
            sim_time,
            real_time,
            stats: self.snapshot(),
            histogram: self.histogram_state(),
        }
    }

    /// Replace statistics and histogram with a loaded record.  Fails without
    /// changes if the record's layout differs from this histogram's.
    pub fn restore(&mut self, record: &PersistedRecord) -> Result<()> {
        self.histogram.restore(&record.histogram)?;
        self.stats.restore(&record.stats);
        Ok(())
    }
}
