//! Running count, mean, variance and extrema using Welford's online update.

use rtf_core::{Result, RtfError, StatsSnapshot};

/// Single-pass statistics over every sample since the last reset.
///
/// Variance is the *population* variance (`M2 / count`).  The unbiased
/// estimator (`M2 / (count - 1)`) is available as
/// [`StatsAccumulator::sample_variance`] but is never persisted.
#[derive(Debug, Clone, Default)]
pub struct StatsAccumulator {
    count: u64,
    mean: f64,
    /// Sum of squared differences from the mean.
    m2: f64,
    min: f64,
    max: f64,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample in.  O(1), no allocation.
    pub fn insert(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(RtfError::InvalidSample(value));
        }

        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
        } else {
            if value < self.min {
                self.min = value;
            }
            if value > self.max {
                self.max = value;
            }
        }

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;

        Ok(())
    }

    /// Forget everything; the next sample starts a fresh population.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current state.  All-zero apart from `count` when nothing was inserted.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            count: self.count,
            mean: self.mean,
            variance: self.variance(),
            min: self.min,
            max: self.max,
        }
    }

    /// Rebuild the accumulator from a persisted snapshot.
    pub fn restore(&mut self, snapshot: &StatsSnapshot) {
        if snapshot.count == 0 {
            self.reset();
            return;
        }
        self.count = snapshot.count;
        self.mean = snapshot.mean;
        self.m2 = snapshot.variance * snapshot.count as f64;
        self.min = snapshot.min;
        self.max = snapshot.max;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    /// Population variance; zero for fewer than two samples.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Bessel-corrected variance; zero for fewer than two samples.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }
}
