//! Time source

use chrono::{DateTime, NaiveDate, Utc};

/// Injectable clock
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date in UTC.
    ///
    /// Collection months and deadlines are resolved against this date, so a
    /// deadline day ends at midnight UTC regardless of the submitter's zone.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_today() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 10, 25, 23, 59, 0).unwrap());
        assert_eq!(
            clock.today(),
            NaiveDate::from_ymd_opt(2025, 10, 25).unwrap()
        );
    }
}
