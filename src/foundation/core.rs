use std::time::Duration;

use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Point, Rect, Size};

/// Build a [`Duration`] from fractional seconds.
///
/// Negative and non-finite inputs collapse to zero, so a misconfigured tween degrades to an
/// instant one instead of panicking.
pub fn secs(s: f64) -> Duration {
    Duration::try_from_secs_f64(s).unwrap_or(Duration::ZERO)
}

/// Validate a configured duration in seconds.
pub(crate) fn checked_secs(what: &str, s: f64) -> ReelResult<Duration> {
    if !s.is_finite() || s < 0.0 {
        return Err(ReelError::config(format!(
            "{what} must be a finite, non-negative number of seconds (got {s})"
        )));
    }
    Ok(secs(s))
}

/// Normalized progress of `elapsed` through `total`, clamped to `[0, 1]`.
///
/// A zero-length span is complete as soon as it starts.
pub(crate) fn progress(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
