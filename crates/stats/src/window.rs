use std::collections::VecDeque;

use rtf_core::{Result, RtfError};

/// Rolling window of the most recent samples, drawn as the trend sparkline.
#[derive(Debug, Clone)]
pub struct BoundedWindow {
    samples:  VecDeque<f64>,
    capacity: usize,
}

impl BoundedWindow {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(RtfError::InvalidCapacity(capacity));
        }
        Ok(Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Resize the window.  Clears the buffer on success only.
    pub fn configure(&mut self, capacity: usize) -> Result<()> {
        *self = Self::new(capacity)?;
        Ok(())
    }

    /// Push a new sample, evicting the oldest if at capacity.
    pub fn push(&mut self, value: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Oldest-to-newest copy of the buffer.
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Average of all samples in the window.
    pub fn average(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(BoundedWindow::new(0), Err(RtfError::InvalidCapacity(0))));
    }

    #[test]
    fn keeps_last_capacity_values_in_order() {
        let mut win = BoundedWindow::new(4).unwrap();
        let data: Vec<f64> = (0..11).map(f64::from).collect();
        for &v in &data {
            win.push(v);
        }
        assert_eq!(win.values(), data[data.len() - 4..].to_vec());
        assert_eq!(win.len(), 4);
        assert_eq!(win.latest(), Some(10.0));
    }

    #[test]
    fn partial_fill_keeps_everything() {
        let mut win = BoundedWindow::new(5).unwrap();
        win.push(1.0);
        win.push(2.0);
        assert_eq!(win.values(), vec![1.0, 2.0]);
        assert_eq!(win.average(), Some(1.5));
    }

    #[test]
    fn capacity_one_holds_newest() {
        let mut win = BoundedWindow::new(1).unwrap();
        win.push(1.0);
        win.push(2.0);
        assert_eq!(win.values(), vec![2.0]);
    }

    #[test]
    fn configure_clears_on_success_only() {
        let mut win = BoundedWindow::new(3).unwrap();
        win.push(7.0);
        assert!(win.configure(0).is_err());
        assert_eq!(win.values(), vec![7.0]);

        win.configure(2).unwrap();
        assert!(win.is_empty());
        assert_eq!(win.capacity(), 2);
        assert_eq!(win.average(), None);
    }
}
