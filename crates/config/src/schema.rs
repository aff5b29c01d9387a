use rtf_core::{HistogramLayout, Result, RtfError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure parsed from `rtf.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RtfConfig {
    /// Histogram bin count and range.
    pub histogram: HistogramLayout,
    /// Trend window settings.
    pub window: WindowConfig,
    /// Where clock ticks come from.
    pub clock: ClockConfig,
    /// Dashboard rendering.
    pub display: DisplayConfig,
}

impl RtfConfig {
    /// Check engine parameters up front so a bad file fails before any
    /// component is built.
    pub fn validate(&self) -> Result<()> {
        self.histogram.validate()?;
        if self.window.capacity == 0 {
            return Err(RtfError::InvalidCapacity(0));
        }
        Ok(())
    }
}

/// Rolling trend window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Number of most recent samples kept for the sparkline.
    pub capacity: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { capacity: 250 }
    }
}

/// Clock tick source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Unix socket streaming `sim,real` lines.  `None` = read standard input.
    pub socket: Option<PathBuf>,
    /// Delay before reconnecting a dropped socket (milliseconds).
    pub reconnect_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            socket: None,
            reconnect_ms: 2_000,
        }
    }
}

/// Text dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Redraw interval (milliseconds).
    pub refresh_ms: u64,
    /// Lower bound of the sparkline's vertical scale.
    pub trend_min: f64,
    /// Upper bound of the sparkline's vertical scale.
    pub trend_max: f64,
    /// Histogram bins are merged down to at most this many rows.
    pub histogram_rows: usize,
    /// Width of the longest histogram bar (characters).
    pub bar_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_ms:     1_000,
            trend_min:      0.0,
            trend_max:      2.0,
            histogram_rows: 20,
            bar_width:      40,
        }
    }
}
