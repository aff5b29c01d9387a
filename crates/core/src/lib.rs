pub mod error;
pub mod event;
pub mod state;

pub use error::{Result, RtfError};
pub use event::Message;
pub use state::{DisplaySnapshot, HistogramLayout, HistogramState, PersistedRecord, StatsSnapshot};
