//! Real-time factor derived from consecutive clock ticks.

use crate::events::ClockTick;

/// Turns a stream of clock ticks into real-time-factor samples.
///
/// The first tick only sets the baseline.  Every later tick yields
/// `Δsim / Δreal` against the previous tick and becomes the new baseline.
/// Ratios that are not finite (zero or vanishing `Δreal`) are swallowed here
/// so the engine only ever sees finite samples.
#[derive(Debug, Clone, Default)]
pub struct RateDeriver {
    last: Option<ClockTick>,
    rejected: u64,
}

impl RateDeriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a tick; returns the ratio when one can be derived.
    pub fn push(&mut self, tick: ClockTick) -> Option<f64> {
        let previous = self.last.replace(tick)?;

        let sim_dt = tick.sim - previous.sim;
        let real_dt = tick.real - previous.real;
        let rtf = sim_dt / real_dt;

        if rtf.is_finite() {
            Some(rtf)
        } else {
            self.rejected += 1;
            tracing::debug!(sim_dt, real_dt, "dropping non-finite real-time factor");
            None
        }
    }

    /// The most recent tick, used as the persisted sim/real timestamps.
    pub fn last_tick(&self) -> Option<ClockTick> {
        self.last
    }

    /// Number of ticks whose ratio was not finite.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}
