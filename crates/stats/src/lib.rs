//! Streaming statistics engine for real-time-factor samples.
//!
//! [`SampleIngestor`] is the entry point: it validates each sample once and
//! forwards it to a [`StatsAccumulator`], a [`Histogram`] and a
//! [`BoundedWindow`].  [`SharedIngestor`] wraps it in the single lock shared
//! by the clock producer and the render loop.

pub mod accumulator;
pub mod histogram;
pub mod ingestor;
pub mod shared;
pub mod window;

pub use accumulator::StatsAccumulator;
pub use histogram::Histogram;
pub use ingestor::SampleIngestor;
pub use shared::SharedIngestor;
pub use window::BoundedWindow;
