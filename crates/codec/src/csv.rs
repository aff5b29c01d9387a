//! Line-oriented text form of a [`PersistedRecord`].
//!
//! ```text
//! <simTime>,<realTime>,
//! <count>,<mean>,<variance>,<min>,<max>,
//! <bin 0 count>,
//! ...
//! <bin N-1 count>,
//! ```
//!
//! Every field is terminated by `,` and every line by `\n` (the final newline
//! may be omitted).  The histogram range and bin count are not stored; the
//! reader supplies the expected [`HistogramLayout`].  Floats use Rust's
//! shortest round-trip formatting, so `decode(encode(r)) == r` bit for bit.

use std::fmt;
use std::str::FromStr;

use rtf_core::{HistogramLayout, HistogramState, PersistedRecord, Result, RtfError, StatsSnapshot};

/// Render `record` in the persisted text layout.
pub fn encode(record: &PersistedRecord) -> String {
    Csv(record).to_string()
}

struct Csv<'a>(&'a PersistedRecord);

impl fmt::Display for Csv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let PersistedRecord {
            sim_time,
            real_time,
            stats,
            histogram,
        } = self.0;

        writeln!(f, "{sim_time},{real_time},")?;
        writeln!(
            f,
            "{},{},{},{},{},",
            stats.count, stats.mean, stats.variance, stats.min, stats.max
        )?;
        for count in &histogram.counts {
            writeln!(f, "{count},")?;
        }
        Ok(())
    }
}

/// Parse the persisted text layout.  All-or-nothing: any deviation yields
/// [`RtfError::MalformedRecord`] and no partial record.
pub fn decode(text: &str, layout: HistogramLayout) -> Result<PersistedRecord> {
    layout.validate()?;

    let body = text.strip_suffix('\n').unwrap_or(text);
    let mut lines = Lines {
        inner: body.split('\n'),
        number: 0,
    };

    let [sim, real] = lines.fields("clock times")?;
    let sim_time = parse_float(lines.number, "simTime", sim)?;
    let real_time = parse_float(lines.number, "realTime", real)?;

    let [count, mean, variance, min, max] = lines.fields("statistics")?;
    let line = lines.number;
    let stats = StatsSnapshot {
        count: parse(line, "count", count)?,
        mean: parse_float(line, "mean", mean)?,
        variance: parse_float(line, "variance", variance)?,
        min: parse_float(line, "min", min)?,
        max: parse_float(line, "max", max)?,
    };

    let mut counts = Vec::with_capacity(layout.bins);
    for bin in 0..layout.bins {
        let [value] = lines.fields("histogram bin")?;
        counts.push(parse::<u64>(lines.number, &format!("bin {bin}"), value)?);
    }

    if let Some(extra) = lines.inner.next() {
        return Err(RtfError::malformed(
            lines.number + 1,
            format!("unexpected trailing content {extra:?} after {} bins", layout.bins),
        ));
    }

    Ok(PersistedRecord {
        sim_time,
        real_time,
        stats,
        histogram: HistogramState { layout, counts },
    })
}

struct Lines<'a> {
    inner: std::str::Split<'a, char>,
    /// 1-based number of the line most recently returned.
    number: usize,
}

impl<'a> Lines<'a> {
    /// Next line split into exactly `N` comma-terminated fields.
    fn fields<const N: usize>(&mut self, what: &str) -> Result<[&'a str; N]> {
        let line = self.inner.next().ok_or_else(|| {
            RtfError::malformed(self.number + 1, format!("end of input, expected {what}"))
        })?;
        self.number += 1;

        let body = line.strip_suffix(',').ok_or_else(|| {
            RtfError::malformed(self.number, format!("{what}: line must end with ','"))
        })?;

        let mut parts = body.split(',');
        let mut out = [""; N];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = parts.next().ok_or_else(|| {
                RtfError::malformed(self.number, format!("{what}: expected {N} fields, found {i}"))
            })?;
        }
        if parts.next().is_some() {
            return Err(RtfError::malformed(
                self.number,
                format!("{what}: more than {N} fields"),
            ));
        }
        Ok(out)
    }
}

fn parse<T: FromStr>(line: usize, name: &str, raw: &str) -> Result<T>
where
    T::Err: fmt::Display,
{
    raw.parse()
        .map_err(|e| RtfError::malformed(line, format!("{name}: cannot parse {raw:?}: {e}")))
}

fn parse_float(line: usize, name: &str, raw: &str) -> Result<f64> {
    let value: f64 = parse(line, name, raw)?;
    if !value.is_finite() {
        return Err(RtfError::malformed(line, format!("{name}: {raw:?} is not finite")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout2() -> HistogramLayout {
        HistogramLayout::new(2, 0.0, 2.0).unwrap()
    }

    fn sample_record() -> PersistedRecord {
        PersistedRecord {
            sim_time: 120.5,
            real_time: 118.25,
            stats: StatsSnapshot {
                count: 5,
                mean: 1.25,
                variance: 0.1,
                min: 0.5,
                max: 2.0,
            },
            histogram: HistogramState {
                layout: layout2(),
                counts: vec![2, 3],
            },
        }
    }

    fn malformed_line(text: &str) -> usize {
        match decode(text, layout2()) {
            Err(RtfError::MalformedRecord { line, .. }) => line,
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn encodes_pinned_layout() {
        assert_eq!(
            encode(&sample_record()),
            "120.5,118.25,\n5,1.25,0.1,0.5,2,\n2,\n3,\n"
        );
    }

    #[test]
    fn round_trips_scenario_record() {
        let record = sample_record();
        assert_eq!(decode(&encode(&record), layout2()).unwrap(), record);
    }

    #[test]
    fn round_trips_awkward_floats() {
        let layout = HistogramLayout::new(3, -1.0, 1.0).unwrap();
        let record = PersistedRecord {
            sim_time: 1e-7,
            real_time: 123456789.123456789,
            stats: StatsSnapshot {
                count: u64::MAX,
                mean: 0.1 + 0.2,
                variance: 2.0 / 3.0,
                min: -0.0,
                max: f64::MAX,
            },
            histogram: HistogramState {
                layout,
                counts: vec![0, u64::MAX, 17],
            },
        };
        let decoded = decode(&encode(&record), layout).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.stats.mean.to_bits(), record.stats.mean.to_bits());
        assert_eq!(decoded.stats.min.to_bits(), (-0.0f64).to_bits());
    }

    #[test]
    fn empty_stats_round_trip() {
        let record = PersistedRecord {
            sim_time: 0.0,
            real_time: 0.0,
            stats: StatsSnapshot::default(),
            histogram: HistogramState::empty(layout2()),
        };
        let text = encode(&record);
        assert_eq!(text, "0,0,\n0,0,0,0,0,\n0,\n0,\n");
        assert_eq!(decode(&text, layout2()).unwrap(), record);
    }

    #[test]
    fn final_newline_is_optional() {
        let text = "1,2,\n3,1,0,1,1,\n1,\n2,";
        assert_eq!(decode(text, layout2()).unwrap().histogram.counts, vec![1, 2]);
    }

    #[test]
    fn rejects_short_histogram() {
        assert_eq!(malformed_line("1,2,\n3,1,0,1,1,\n1,\n"), 4);
    }

    #[test]
    fn rejects_long_histogram() {
        assert_eq!(malformed_line("1,2,\n3,1,0,1,1,\n1,\n2,\n0,\n"), 5);
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert_eq!(malformed_line("1,2,\n3,1,0,1,1,\n1,\n2,\njunk"), 5);
        assert_eq!(malformed_line("1,2,\n3,1,0,1,1,\n1,\n2,\n\n"), 5);
        assert_eq!(malformed_line("1,2,\n3,1,0,1,1,\n1,\n2,x"), 4);
    }

    #[test]
    fn rejects_whitespace_before_separator() {
        assert_eq!(malformed_line("1 ,2,\n3,1,0,1,1,\n1,\n2,\n"), 1);
        assert_eq!(malformed_line("1,2,\n3,1,0,1,1,\n 1,\n2,\n"), 3);
    }

    #[test]
    fn rejects_non_numeric_and_wrong_types() {
        assert_eq!(malformed_line("1,two,\n3,1,0,1,1,\n1,\n2,\n"), 1);
        assert_eq!(malformed_line("1,2,\n3.5,1,0,1,1,\n1,\n2,\n"), 2);
        assert_eq!(malformed_line("1,2,\n3,1,0,1,1,\n-1,\n2,\n"), 3);
        assert_eq!(malformed_line("1,2,\n3,NaN,0,1,1,\n1,\n2,\n"), 2);
        assert_eq!(malformed_line("inf,2,\n3,1,0,1,1,\n1,\n2,\n"), 1);
    }

    #[test]
    fn rejects_wrong_field_counts() {
        assert_eq!(malformed_line("1,2,3,\n3,1,0,1,1,\n1,\n2,\n"), 1);
        assert_eq!(malformed_line("1,2,\n3,1,0,1,\n1,\n2,\n"), 2);
        assert_eq!(malformed_line("1,2\n3,1,0,1,1,\n1,\n2,\n"), 1);
    }

    #[test]
    fn rejects_truncated_input() {
        assert_eq!(malformed_line(""), 1);
        assert_eq!(malformed_line("1,2,\n"), 2);
        assert_eq!(malformed_line("1,2,\n3,1,0,1,1,"), 3);
    }

    #[test]
    fn rejects_crlf_line_endings() {
        assert_eq!(malformed_line("1,2,\r\n3,1,0,1,1,\r\n1,\r\n2,\r\n"), 1);
    }

    #[test]
    fn invalid_layout_is_a_range_error() {
        let bad = HistogramLayout { bins: 0, min: 0.0, max: 1.0 };
        assert!(matches!(
            decode("1,2,\n3,1,0,1,1,\n", bad),
            Err(RtfError::InvalidRange { .. })
        ));
    }
}
