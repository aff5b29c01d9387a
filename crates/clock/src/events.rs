/// One clock message: simulation and wall-clock time, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockTick {
    pub sim:  f64,
    pub real: f64,
}

/// Result of parsing one line from the clock stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockEvent {
    Tick(ClockTick),
    /// Empty or whitespace-only line.
    Blank,
    /// A line we couldn't parse. Carries the raw text for logging.
    Unknown(String),
}

/// Parse a raw clock line into a [`ClockEvent`].
///
/// Lines have the format `sim_seconds,real_seconds`; surrounding whitespace
/// and a trailing comma are tolerated.
pub fn parse_tick(line: &str) -> ClockEvent {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ClockEvent::Blank;
    }

    let body = trimmed.strip_suffix(',').unwrap_or(trimmed);
    let Some((sim, real)) = body.split_once(',') else {
        return ClockEvent::Unknown(line.to_string());
    };

    match (sim.trim().parse::<f64>(), real.trim().parse::<f64>()) {
        (Ok(sim), Ok(real)) if sim.is_finite() && real.is_finite() => {
            ClockEvent::Tick(ClockTick { sim, real })
        }
        _ => ClockEvent::Unknown(line.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_tick() {
        assert_eq!(
            parse_tick("12.5,10.0"),
            ClockEvent::Tick(ClockTick { sim: 12.5, real: 10.0 })
        );
    }

    #[test]
    fn parse_tolerates_spacing_and_trailing_comma() {
        assert_eq!(
            parse_tick("  3, 4.25,\n"),
            ClockEvent::Tick(ClockTick { sim: 3.0, real: 4.25 })
        );
    }

    #[test]
    fn parse_blank_line() {
        assert_eq!(parse_tick("   "), ClockEvent::Blank);
    }

    #[test]
    fn parse_unknown_lines() {
        assert!(matches!(parse_tick("hello"), ClockEvent::Unknown(_)));
        assert!(matches!(parse_tick("1,2,3"), ClockEvent::Unknown(_)));
        assert!(matches!(parse_tick("NaN,1"), ClockEvent::Unknown(_)));
    }
}
