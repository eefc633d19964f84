//! Conversions between millisecond offsets and `MM:SS` / `HH:MM:SS` strings.
//!
//! Display strings carry whole seconds only; `encode` truncates.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("Malformed timestamp {value:?}: {reason}")]
    MalformedTimestamp { value: String, reason: String },
}

/// Format milliseconds as `MM:SS`, or `HH:MM:SS` once the hour field is non-zero.
pub fn encode(ms: u64) -> String {
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Parse `MM:SS` or `HH:MM:SS` into milliseconds.
pub fn decode(value: &str) -> Result<u64, TimestampError> {
    let malformed = |reason: &str| TimestampError::MalformedTimestamp {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let parts = value
        .split(':')
        .map(|part| part.parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| malformed("expected base-10 integer fields"))?;

    let (hours, mins, secs) = match parts.as_slice() {
        [m, s] => (0, *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(malformed("expected 2 or 3 fields")),
    };

    hours
        .checked_mul(3600)
        .and_then(|h| mins.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(secs))
        .and_then(|total| total.checked_mul(1000))
        .ok_or_else(|| malformed("value out of range"))
}

/// Milliseconds to fractional seconds, the unit the transcoder takes.
pub fn ms_to_secs(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

/// Fractional seconds to milliseconds; negative input clamps to zero.
pub fn secs_to_ms(secs: f64) -> u64 {
    (secs.max(0.0) * 1000.0).round() as u64
}

/// Format an elapsed wall-clock duration for CLI step timings.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}
