// Utility functions: Keepa time base, price formatting
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Minutes between the Unix epoch and Keepa minute 0 (2011-01-01T00:00:00Z).
pub const KEEPA_EPOCH_OFFSET_MINUTES: i64 = 21_564_000;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Source of "now". Injected so time-dependent lookups are reproducible.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Converts a wall-clock instant into Keepa minutes.
pub fn to_keepa_minutes(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis().div_euclid(MILLIS_PER_MINUTE) - KEEPA_EPOCH_OFFSET_MINUTES
}

/// Converts Keepa minutes back into a wall-clock instant.
pub fn from_keepa_minutes(minutes: i64) -> Option<DateTime<Utc>> {
    let millis = (minutes + KEEPA_EPOCH_OFFSET_MINUTES).checked_mul(MILLIS_PER_MINUTE)?;
    Utc.timestamp_millis_opt(millis).single()
}

/// Looks back a fixed number of days from "now" in the Keepa time base.
pub struct TimeReference {
    lookback: Duration,
}

impl TimeReference {
    pub fn new(lookback_days: u32) -> Self {
        Self {
            lookback: Duration::days(i64::from(lookback_days)),
        }
    }

    pub fn epoch_at(&self, now: DateTime<Utc>) -> i64 {
        to_keepa_minutes(now - self.lookback)
    }

    pub fn month_ago_epoch(&self, clock: &dyn Clock) -> i64 {
        self.epoch_at(clock.now())
    }
}

/// Formats an amount in cents as dollars with two decimals.
pub fn cents_to_dollars(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn keepa_epoch_starts_in_2011() {
        assert_eq!(to_keepa_minutes(utc(2011, 1, 1, 0, 0, 0)), 0);
        assert_eq!(to_keepa_minutes(utc(2011, 1, 1, 1, 0, 0)), 60);
        assert_eq!(from_keepa_minutes(0), Some(utc(2011, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn conversion_floors_partial_minutes() {
        assert_eq!(to_keepa_minutes(utc(2011, 1, 1, 0, 0, 59)), 0);
        assert_eq!(to_keepa_minutes(utc(2010, 12, 31, 23, 59, 30)), -1);
    }

    #[test]
    fn month_ago_epoch_is_reproducible() {
        let clock = FixedClock(utc(2024, 3, 31, 12, 30, 45));
        let reference = TimeReference::new(30);
        let first = reference.month_ago_epoch(&clock);
        assert_eq!(first, reference.month_ago_epoch(&clock));
        assert_eq!(first, to_keepa_minutes(utc(2024, 3, 1, 12, 30, 0)));
        assert_eq!(from_keepa_minutes(first), Some(utc(2024, 3, 1, 12, 30, 0)));
    }

    #[test]
    fn formats_cents() {
        assert_eq!(cents_to_dollars(1999), "19.99");
        assert_eq!(cents_to_dollars(5), "0.05");
        assert_eq!(cents_to_dollars(100), "1.00");
        assert_eq!(cents_to_dollars(0), "0.00");
        assert_eq!(cents_to_dollars(-1), "-0.01");
    }
}
