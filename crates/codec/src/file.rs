use std::path::Path;

use rtf_core::{HistogramLayout, PersistedRecord, Result};
use tracing::info;

use crate::csv::{decode, encode};

/// Write `record` to `path`, truncating any existing file.
pub fn save(path: impl AsRef<Path>, record: &PersistedRecord) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, encode(record))?;
    info!(
        "Saved {} samples ({} bins) to '{}'",
        record.stats.count,
        record.histogram.counts.len(),
        path.display()
    );
    Ok(())
}

/// Read and decode a record previously written by [`save`].
pub fn load(path: impl AsRef<Path>, layout: HistogramLayout) -> Result<PersistedRecord> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let record = decode(&raw, layout)?;
    info!(
        "Loaded {} samples from '{}'",
        record.stats.count,
        path.display()
    );
    Ok(record)
}
