//! Clock tick source: the producer side that feeds real-time-factor samples
//! into the engine.

pub mod client;
pub mod events;
pub mod rate;

pub use client::{ClockListener, ClockSource};
pub use events::{parse_tick, ClockEvent, ClockTick};
pub use rate::RateDeriver;
