//! Time filter.
//!
//! All instants are naive and taken to be UTC. Convert local times before
//! building a filter.

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta, Utc};

use crate::config::DEFAULT_DAYS_GAP;
use crate::error_handling::FilterError;

/// Filters events by origin time and by time of last update.
///
/// Invariant: `start <= end`. `updated` is independent of both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFilter {
    start: NaiveDateTime,
    end: NaiveDateTime,
    updated: NaiveDateTime,
}

impl TimeFilter {
    /// Creates a time filter, filling omitted instants.
    ///
    /// Defaults are resolved in a fixed order because each depends on the one
    /// before it:
    /// 1. `end` defaults to the current UTC time
    /// 2. `start` defaults to `end` minus 30 days (or `end` itself if that
    ///    would fall before the earliest representable instant)
    /// 3. `updated` defaults to `start`
    ///
    /// # Errors
    ///
    /// [`FilterError::OutOfRange`] if an explicit `start` is later than `end`.
    pub fn new(
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        updated: Option<NaiveDateTime>,
    ) -> Result<Self, FilterError> {
        let end = end.unwrap_or_else(current_time);
        let start = match start {
            Some(start) => {
                check_order(start, end, "start")?;
                start
            }
            None => default_start(end),
        };
        let updated = updated.unwrap_or(start);
        Ok(Self {
            start,
            end,
            updated,
        })
    }

    /// Events between `start` and `end`, with `updated` defaulting to `start`.
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, FilterError> {
        Self::new(Some(start), Some(end), None)
    }

    /// The 30 days leading up to `end`.
    pub fn ending_at(end: NaiveDateTime) -> Self {
        let start = default_start(end);
        Self {
            start,
            end,
            updated: start,
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn updated(&self) -> NaiveDateTime {
        self.updated
    }

    /// Sets the start time; it must not be later than the current end time.
    pub fn set_start(&mut self, start: NaiveDateTime) -> Result<(), FilterError> {
        check_order(start, self.end, "start")?;
        self.start = start;
        Ok(())
    }

    /// Sets the end time; it must not be earlier than the current start time.
    pub fn set_end(&mut self, end: NaiveDateTime) -> Result<(), FilterError> {
        check_order(self.start, end, "end")?;
        self.end = end;
        Ok(())
    }

    /// Sets the earliest update time. Unconstrained by `start` and `end`.
    pub fn set_updated(&mut self, updated: NaiveDateTime) {
        self.updated = updated;
    }
}

impl Default for TimeFilter {
    /// The last 30 days.
    fn default() -> Self {
        Self::ending_at(current_time())
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Start: {}\nEnd: {}\nUpdated: {}",
            self.start, self.end, self.updated
        )
    }
}

fn current_time() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn default_start(end: NaiveDateTime) -> NaiveDateTime {
    end.checked_sub_signed(TimeDelta::days(DEFAULT_DAYS_GAP))
        .unwrap_or(end)
}

fn check_order(
    start: NaiveDateTime,
    end: NaiveDateTime,
    field: &'static str,
) -> Result<(), FilterError> {
    if start <= end {
        return Ok(());
    }
    let message = if field == "start" {
        "Start time must not be later than end time."
    } else {
        "End time must not be earlier than start time."
    };
    Err(FilterError::out_of_range(field, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::Rng;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    /// Days capped at 28 so every month is valid.
    fn random_time(rng: &mut impl Rng) -> NaiveDateTime {
        at(
            rng.random_range(1..=9999),
            rng.random_range(1..=12),
            rng.random_range(1..=28),
            rng.random_range(0..24),
            rng.random_range(0..60),
            rng.random_range(0..60),
        )
    }

    #[test]
    fn test_all_explicit_round_trip() {
        let mut rng = rand::rng();
        for _ in 0..2000 {
            let start = random_time(&mut rng);
            let end = random_time(&mut rng);
            let updated = random_time(&mut rng);
            let result = TimeFilter::new(Some(start), Some(end), Some(updated));
            if start > end {
                assert_eq!(result.unwrap_err().field(), Some("start"));
                continue;
            }
            let filter = result.unwrap();
            assert_eq!(filter.start(), start);
            assert_eq!(filter.end(), end);
            assert_eq!(filter.updated(), updated);
        }
    }

    #[test]
    fn test_equal_start_and_end() {
        let now = Utc::now().naive_utc();
        let filter = TimeFilter::new(Some(now), Some(now), Some(now)).unwrap();
        assert_eq!(filter.start(), filter.end());
    }

    #[test]
    fn test_start_and_updated_default_from_end() {
        let mut rng = rand::rng();
        for _ in 0..1000 {
            let end = random_time(&mut rng);
            let filter = TimeFilter::new(None, Some(end), None).unwrap();
            assert_eq!(filter.start(), end - TimeDelta::days(30));
            assert_eq!(filter.updated(), filter.start());
        }
    }

    #[test]
    fn test_start_falls_back_to_end_on_underflow() {
        let end = NaiveDateTime::MIN + TimeDelta::days(3);
        let filter = TimeFilter::new(None, Some(end), None).unwrap();
        assert_eq!(filter.start(), end);
        assert_eq!(filter.updated(), end);
    }

    #[test]
    fn test_end_defaults_to_now() {
        let before = Utc::now().naive_utc();
        let start = at(2000, 1, 1, 0, 0, 0);
        let filter = TimeFilter::new(Some(start), None, None).unwrap();
        let after = Utc::now().naive_utc();
        assert!(filter.end() >= before && filter.end() <= after);
        assert_eq!(filter.start(), start);
        assert_eq!(filter.updated(), start);
    }

    #[test]
    fn test_future_start_without_end_rejected() {
        let start = Utc::now().naive_utc() + TimeDelta::days(365);
        assert!(TimeFilter::new(Some(start), None, None).is_err());
    }

    #[test]
    fn test_all_default() {
        let before = Utc::now().naive_utc();
        let filter = TimeFilter::default();
        assert!(filter.end() >= before);
        assert!(filter.end() < before + TimeDelta::seconds(1));
        assert_eq!(filter.start(), filter.end() - TimeDelta::days(30));
        assert_eq!(filter.updated(), filter.start());
    }

    #[test]
    fn test_updated_is_unconstrained() {
        let start = at(2015, 6, 1, 0, 0, 0);
        let end = at(2015, 6, 30, 23, 59, 59);
        let mut filter = TimeFilter::between(start, end).unwrap();
        filter.set_updated(at(2020, 1, 1, 0, 0, 0));
        assert_eq!(filter.updated(), at(2020, 1, 1, 0, 0, 0));
        filter.set_updated(at(1900, 1, 1, 0, 0, 0));
        assert_eq!(filter.updated(), at(1900, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_setters_recheck_order() {
        let start = at(1960, 1, 1, 0, 0, 0);
        let end = at(1961, 1, 1, 0, 0, 0);
        let mut filter = TimeFilter::between(start, end).unwrap();

        let err = filter.set_start(at(1962, 1, 1, 0, 0, 0)).unwrap_err();
        assert_eq!(err.to_string(), "Start time must not be later than end time.");
        let err = filter.set_end(at(1959, 1, 1, 0, 0, 0)).unwrap_err();
        assert_eq!(err.field(), Some("end"));
        assert_eq!((filter.start(), filter.end()), (start, end));

        filter.set_end(at(1970, 1, 1, 0, 0, 0)).unwrap();
        filter.set_start(at(1965, 1, 1, 0, 0, 0)).unwrap();
        assert_eq!(filter.start(), at(1965, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_display() {
        let filter = TimeFilter::between(at(2015, 6, 1, 0, 0, 0), at(2015, 6, 2, 12, 30, 0)).unwrap();
        assert_eq!(
            filter.to_string(),
            "Start: 2015-06-01 00:00:00\nEnd: 2015-06-02 12:30:00\nUpdated: 2015-06-01 00:00:00"
        );
    }
}
