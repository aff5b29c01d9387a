//! Fixed-bin histogram over a configured numeric range.

use rtf_core::{HistogramLayout, HistogramState, Result, RtfError};

/// Equal-width bins over `[min, max]`.
///
/// Bin `i` covers `[min + i·w, min + (i+1)·w)`, except the last bin which
/// also takes values exactly equal to `max`.  Anything below `min` or above
/// `max` is dropped and tallied in [`underflow`](Self::underflow) or
/// [`overflow`](Self::overflow).
#[derive(Debug, Clone)]
pub struct Histogram {
    layout: HistogramLayout,
    width: f64,
    counts: Vec<u64>,
    underflow: u64,
    overflow: u64,
}

impl Histogram {
    pub fn new(layout: HistogramLayout) -> Result<Self> {
        layout.validate()?;
        Ok(Self {
            layout,
            width: layout.bin_width(),
            counts: vec![0; layout.bins],
            underflow: 0,
            overflow: 0,
        })
    }

    /// Change bin count and range.  Clears all counts on success; on error
    /// the histogram is left exactly as it was.
    pub fn configure(&mut self, bins: usize, min: f64, max: f64) -> Result<()> {
        *self = Self::new(HistogramLayout::new(bins, min, max)?)?;
        Ok(())
    }

    /// Count one sample.  Out-of-range samples are dropped, not errors.
    pub fn insert(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(RtfError::InvalidSample(value));
        }

        match self.bin_index(value) {
            Some(idx) => self.counts[idx] += 1,
            None if value < self.layout.min => self.underflow += 1,
            None => self.overflow += 1,
        }
        Ok(())
    }

    /// Bin for `value`, or `None` when it falls outside `[min, max]`.
    fn bin_index(&self, value: f64) -> Option<usize> {
        let HistogramLayout { bins, min, max } = self.layout;
        if value < min || value > max {
            return None;
        }
        if value == max {
            return Some(bins - 1);
        }
        // Rounding can push values just under `max` onto index `bins`.
        let idx = ((value - min) / self.width).floor() as usize;
        Some(idx.min(bins - 1))
    }

    /// Zero every count; layout is kept.
    pub fn reset(&mut self) {
        self.counts.fill(0);
        self.underflow = 0;
        self.overflow = 0;
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn layout(&self) -> HistogramLayout {
        self.layout
    }

    pub fn num_bins(&self) -> usize {
        self.layout.bins
    }

    pub fn bin_width(&self) -> f64 {
        self.width
    }

    pub fn bin_lower_edge(&self, idx: usize) -> f64 {
        self.layout.min + idx as f64 * self.width
    }

    /// Samples dropped for being below `min` since the last reset.
    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    /// Samples dropped for being above `max` since the last reset.
    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// Sum of all bin counts (excludes dropped samples).
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn state(&self) -> HistogramState {
        HistogramState {
            layout: self.layout,
            counts: self.counts.clone(),
        }
    }

    /// Load counts from a persisted state with the same layout.
    pub fn restore(&mut self, state: &HistogramState) -> Result<()> {
        if state.layout != self.layout || state.counts.len() != self.layout.bins {
            return Err(RtfError::LayoutMismatch {
                expected: self.layout,
                found: HistogramLayout {
                    bins: state.counts.len(),
                    ..state.layout
                },
            });
        }
        self.counts.copy_from_slice(&state.counts);
        self.underflow = 0;
        self.overflow = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(bins: usize, min: f64, max: f64) -> Histogram {
        Histogram::new(HistogramLayout::new(bins, min, max).unwrap()).unwrap()
    }

    #[test]
    fn two_bins_with_inclusive_top_edge() {
        let mut h = hist(2, 0.0, 2.0);
        for v in [0.5, 1.5, 1.9, 2.0] {
            h.insert(v).unwrap();
        }
        assert_eq!(h.counts(), &[1, 3]);
        assert_eq!(h.overflow(), 0);
        assert_eq!(h.underflow(), 0);
    }

    #[test]
    fn exactly_max_lands_in_last_bin_once() {
        let mut h = hist(200, 0.0, 2.0);
        h.insert(2.0).unwrap();
        assert_eq!(h.counts()[199], 1);
        assert_eq!(h.total(), 1);
    }

    #[test]
    fn just_above_max_is_dropped() {
        let mut h = hist(4, 0.0, 2.0);
        let above = f64::from_bits(2.0f64.to_bits() + 1);
        h.insert(above).unwrap();
        h.insert(2.5).unwrap();
        assert_eq!(h.total(), 0);
        assert_eq!(h.overflow(), 2);
    }

    #[test]
    fn below_min_is_dropped() {
        let mut h = hist(4, 1.0, 3.0);
        h.insert(0.999).unwrap();
        h.insert(-10.0).unwrap();
        assert_eq!(h.total(), 0);
        assert_eq!(h.underflow(), 2);
        h.insert(1.0).unwrap();
        assert_eq!(h.counts()[0], 1);
    }

    #[test]
    fn interior_edges_belong_to_upper_bin() {
        let mut h = hist(4, 0.0, 2.0);
        h.insert(0.5).unwrap();
        h.insert(1.0).unwrap();
        h.insert(1.5).unwrap();
        assert_eq!(h.counts(), &[0, 1, 1, 1]);
    }

    #[test]
    fn value_just_below_max_stays_in_range() {
        let mut h = hist(3, 0.0, 0.3);
        let below = f64::from_bits(0.3f64.to_bits() - 1);
        h.insert(below).unwrap();
        assert_eq!(h.counts(), &[0, 0, 1]);
    }

    #[test]
    fn non_finite_is_an_error() {
        let mut h = hist(2, 0.0, 1.0);
        assert!(matches!(h.insert(f64::NAN), Err(RtfError::InvalidSample(_))));
        assert!(h.insert(f64::INFINITY).is_err());
        assert_eq!(h.total(), 0);
        assert_eq!(h.overflow(), 0);
    }

    #[test]
    fn configure_clears_and_rejects_bad_layouts() {
        let mut h = hist(2, 0.0, 2.0);
        h.insert(0.1).unwrap();

        assert!(h.configure(0, 0.0, 1.0).is_err());
        assert!(h.configure(3, 1.0, 1.0).is_err());
        assert_eq!(h.counts(), &[1, 0], "failed configure must not touch state");

        h.configure(5, -1.0, 1.0).unwrap();
        assert_eq!(h.counts(), &[0; 5]);
        assert_eq!(h.bin_lower_edge(1), -0.6);
    }

    #[test]
    fn reset_keeps_layout() {
        let mut h = hist(3, 0.0, 3.0);
        h.insert(1.2).unwrap();
        h.insert(9.0).unwrap();
        h.reset();
        h.reset();
        assert_eq!(h.counts(), &[0, 0, 0]);
        assert_eq!(h.overflow(), 0);
        assert_eq!(h.num_bins(), 3);
    }

    #[test]
    fn restore_requires_matching_layout() {
        let mut h = hist(2, 0.0, 2.0);
        let good = HistogramState {
            layout: h.layout(),
            counts: vec![4, 7],
        };
        h.restore(&good).unwrap();
        assert_eq!(h.state(), good);

        let other = HistogramState::empty(HistogramLayout::new(3, 0.0, 2.0).unwrap());
        match h.restore(&other) {
            Err(RtfError::LayoutMismatch { expected, found }) => {
                assert_eq!(expected, h.layout());
                assert_eq!(found, other.layout);
            }
            res => panic!("expected layout mismatch, got {res:?}"),
        }
        assert_eq!(h.counts(), &[4, 7]);
    }

    #[test]
    fn restore_reports_short_counts_as_mismatch() {
        let mut h = hist(2, 0.0, 2.0);
        let short = HistogramState {
            layout: h.layout(),
            counts: vec![1],
        };
        assert!(matches!(
            h.restore(&short),
            Err(RtfError::LayoutMismatch { found: HistogramLayout { bins: 1, .. }, .. })
        ));
    }

    #[test]
    fn widest_accepted_range_still_spreads_samples() {
        let mut h = hist(4, -1e307, 1e307);
        h.insert(9e306).unwrap();
        h.insert(-9e306).unwrap();
        assert_eq!(h.counts(), &[1, 0, 0, 1]);
    }
}
