use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rtf_core::{DisplaySnapshot, PersistedRecord, Result, StatsSnapshot};
use tracing::debug;

use crate::SampleIngestor;

/// Clonable handle to one [`SampleIngestor`] behind a single mutex.
///
/// The producer and the consumer each hold a clone.  Every method takes the
/// lock for its whole duration, so statistics, histogram and window are
/// always observed together.
#[derive(Debug, Clone)]
pub struct SharedIngestor {
    inner: Arc<Mutex<SampleIngestor>>,
}

impl SharedIngestor {
    pub fn new(ingestor: SampleIngestor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ingestor)),
        }
    }

    // Every critical section leaves the ingestor consistent, so a panic in
    // another holder does not invalidate the data.
    fn lock(&self) -> MutexGuard<'_, SampleIngestor> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn on_sample(&self, value: f64) -> Result<()> {
        self.lock().on_sample(value)
    }

    pub fn reset(&self) {
        self.lock().reset();
        debug!("ingestor reset");
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.lock().snapshot()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.lock().counts().to_vec()
    }

    pub fn values(&self) -> Vec<f64> {
        self.lock().values()
    }

    pub fn display_snapshot(&self) -> DisplaySnapshot {
        self.lock().display_snapshot()
    }

    pub fn record(&self, sim_time: f64, real_time: f64) -> PersistedRecord {
        self.lock().record(sim_time, real_time)
    }

    pub fn restore(&self, record: &PersistedRecord) -> Result<()> {
        self.lock().restore(record)
    }
}
