use thiserror::Error;

use crate::state::HistogramLayout;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum RtfError {
    /// A sample was NaN or infinite; nothing was recorded.
    #[error("invalid sample: {0} is not finite")]
    InvalidSample(f64),

    #[error("invalid histogram range: {bins} bins over [{min}, {max}]")]
    InvalidRange { bins: usize, min: f64, max: f64 },

    /// Restored histogram data was built for a different layout.
    #[error(
        "histogram layout mismatch: expected {} bins over [{}, {}], got {} bins over [{}, {}]",
        expected.bins, expected.min, expected.max, found.bins, found.min, found.max
    )]
    LayoutMismatch {
        expected: HistogramLayout,
        found: HistogramLayout,
    },

    #[error("invalid window capacity: {0}")]
    InvalidCapacity(usize),

    /// Persisted text does not match the record layout.  `line` is 1-based.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("clock error: {0}")]
    Clock(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl RtfError {
    /// Shorthand for [`RtfError::MalformedRecord`].
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = RtfError> = std::result::Result<T, E>;
