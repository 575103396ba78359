//! Resend interval policy
//!
//! Maps a target's resend class to how long to wait before notifying it again.
//! Class 1 ("never resend") is not an interval and is handled by the
//! eligibility check before this table is consulted.

use chrono::Duration;

/// Resend class meaning "notify once, never resend"
pub const NEVER_RESEND: i32 = 1;

/// Interval used for any class outside the table
pub const DEFAULT_INTERVAL_MINUTES: i64 = 240;

/// Resolve a resend class to its interval.
///
/// Unknown classes (including 0 and negative values) fall back to
/// [`DEFAULT_INTERVAL_MINUTES`] and log a warning.
pub fn resolve(resend_class: i32) -> Duration {
    match known_interval_minutes(resend_class) {
        Some(minutes) => Duration::minutes(minutes),
        None => {
            tracing::warn!(
                "Unknown resend class {}, using default {}m",
                resend_class,
                DEFAULT_INTERVAL_MINUTES
            );
            Duration::minutes(DEFAULT_INTERVAL_MINUTES)
        }
    }
}

fn known_interval_minutes(resend_class: i32) -> Option<i64> {
    match resend_class {
        2 => Some(10),
        3 => Some(20),
        4 => Some(30),
        5 => Some(60),
        6 => Some(120),
        7 => Some(240),
        _ => None,
    }
}
