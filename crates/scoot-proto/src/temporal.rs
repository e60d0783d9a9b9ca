//! # Time Conversions — Durations, Timestamps, Milliseconds
//!
//! Converts between the protobuf well-known `Duration` and `Timestamp`
//! messages, integer milliseconds, and `chrono::DateTime<Utc>`.
//!
//! ## Precision
//!
//! - Duration ⇄ milliseconds is **lossy** toward milliseconds: any remainder
//!   below one millisecond is truncated. Milliseconds → duration → milliseconds
//!   is exact.
//! - Timestamp ⇄ `DateTime<Utc>` is **lossless** in both directions.
//!
//! ## Negative Values
//!
//! Division floors toward negative infinity. `duration_from_millis(-1)` is
//! `{ seconds: -1, nanos: 999_000_000 }`, so `nanos` always lands in
//! `[0, 1_000_000_000)` and the millisecond round-trip holds for every `i64`,
//! `i64::MIN` included. Totals outside the `i64` range saturate.

use chrono::{DateTime, Utc};
use prost_types::{Duration, Timestamp};

const MILLIS_PER_SECOND: i64 = 1_000;
const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Total milliseconds in a duration, truncating sub-millisecond precision.
///
/// `nanos` need not be normalized; `{ seconds: 1, nanos: 1_500_000_000 }`
/// yields `2500`. Totals beyond the `i64` range saturate.
pub fn millis_from_duration(d: &Duration) -> i64 {
    // Sum before clamping: seconds * 1000 alone may leave i64 while the
    // total, with its non-negative nanos term, does not.
    let total = i128::from(d.seconds) * i128::from(MILLIS_PER_SECOND)
        + i128::from(d.nanos).div_euclid(i128::from(NANOS_PER_MILLI));
    i64::try_from(total).unwrap_or(if total < 0 { i64::MIN } else { i64::MAX })
}

/// A normalized duration spanning `ms` milliseconds.
pub fn duration_from_millis(ms: i64) -> Duration {
    Duration {
        seconds: ms.div_euclid(MILLIS_PER_SECOND),
        // rem_euclid keeps this in [0, 999_000_000]
        nanos: (ms.rem_euclid(MILLIS_PER_SECOND) * NANOS_PER_MILLI) as i32,
    }
}

/// Capture an instant as a timestamp without losing precision.
pub fn timestamp_from_datetime(t: &DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: t.timestamp(),
        // chrono reports leap seconds as nanos in [1e9, 2e9), which fits i32
        nanos: t.timestamp_subsec_nanos() as i32,
    }
}

/// Reconstruct the instant a timestamp names.
///
/// Inverse of [`timestamp_from_datetime()`]. Unnormalized `nanos` are folded
/// into `seconds`; timestamps outside chrono's representable range clamp to
/// [`DateTime::<Utc>::MIN_UTC`] or [`DateTime::<Utc>::MAX_UTC`].
pub fn datetime_from_timestamp(ts: &Timestamp) -> DateTime<Utc> {
    // Covers every output of timestamp_from_datetime, leap seconds included.
    if let Some(dt) = u32::try_from(ts.nanos)
        .ok()
        .and_then(|nanos| DateTime::from_timestamp(ts.seconds, nanos))
    {
        return dt;
    }
    let nanos = i64::from(ts.nanos);
    let seconds = ts.seconds.saturating_add(nanos.div_euclid(NANOS_PER_SECOND));
    let nanos = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
    DateTime::from_timestamp(seconds, nanos).unwrap_or(if seconds < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// The current host time as a timestamp.
pub fn timestamp_now() -> Timestamp {
    timestamp_from_datetime(&Utc::now())
}

/// Convert a `std::time::Duration` without losing precision.
///
/// Spans longer than `i64::MAX` seconds saturate.
pub fn duration_from_std(d: std::time::Duration) -> Duration {
    Duration {
        seconds: i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        nanos: d.subsec_nanos() as i32,
    }
}

/// Convert to a `std::time::Duration`, or `None` for a negative span.
pub fn std_from_duration(d: &Duration) -> Option<std::time::Duration> {
    let nanos = i64::from(d.nanos);
    let seconds = d.seconds.checked_add(nanos.div_euclid(NANOS_PER_SECOND))?;
    let nanos = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
    let seconds = u64::try_from(seconds).ok()?;
    Some(std::time::Duration::new(seconds, nanos))
}
