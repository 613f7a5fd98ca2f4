//! Injectable time source.
//!
//! Engine functions take `today` as a plain `NaiveDate`; the service layer
//! derives it from a [`Clock`] and the user's fixed UTC offset, so every
//! computation is reproducible under a [`FixedClock`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Convert a UTC instant into the user's local wall time.
pub fn local_time(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDateTime {
    at.with_timezone(&offset).naive_local()
}

/// Calendar day of a UTC instant in the user's local day boundary.
pub fn local_day(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    local_time(at, offset).date()
}

/// Build a fixed offset from minutes east of UTC, falling back to UTC when
/// the value is outside the +/-24h range chrono accepts.
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| {
            tracing::warn!("UTC offset of {} minutes is out of range, using UTC", minutes);
            Utc.fix()
        })
}
