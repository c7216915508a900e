//! Date range for filtering events.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

use crate::constants::DEFAULT_RANGE_DAYS;
use crate::error::{EventDirError, EventDirResult};

/// Date range for filtering events.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone)]
pub struct DateRange {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl Default for DateRange {
    /// Default range: today until DEFAULT_RANGE_DAYS ahead
    fn default() -> Self {
        let today = Local::now().date_naive();
        DateRange {
            from: today.and_hms_opt(0, 0, 0),
            to: (today + Duration::days(DEFAULT_RANGE_DAYS)).and_hms_opt(23, 59, 59),
        }
    }
}

impl DateRange {
    /// Fully unbounded range.
    pub fn all() -> Self {
        DateRange {
            from: None,
            to: None,
        }
    }

    /// Parse date strings into a DateRange.
    /// - `from`: "start" for unbounded past, or YYYY-MM-DD
    /// - `to`: YYYY-MM-DD, defaults to +DEFAULT_RANGE_DAYS if not specified
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> EventDirResult<Self> {
        let today = Local::now().date_naive();

        let from_dt = match from {
            Some("start") => None, // Unbounded past
            Some(s) => Some(parse_date_start(s)?),
            None => today.and_hms_opt(0, 0, 0),
        };

        let to_dt = match to {
            Some(s) => Some(parse_date_end(s)?),
            None => (today + Duration::days(DEFAULT_RANGE_DAYS)).and_hms_opt(23, 59, 59),
        };

        Ok(DateRange {
            from: from_dt,
            to: to_dt,
        })
    }

    /// Whether an event overlapping `[start, end]` falls inside this range:
    /// it must start at or after `from` and end at or before `to`.
    pub fn contains(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        if let Some(from) = self.from
            && start < from
        {
            return false;
        }
        if let Some(to) = self.to
            && end > to
        {
            return false;
        }
        true
    }
}

/// Parse YYYY-MM-DD as start of day
pub fn parse_date_start(s: &str) -> EventDirResult<NaiveDateTime> {
    parse_date(s).map(|d| d.and_hms_opt(0, 0, 0).unwrap())
}

/// Parse YYYY-MM-DD as end of day
pub fn parse_date_end(s: &str) -> EventDirResult<NaiveDateTime> {
    parse_date(s).map(|d| d.and_hms_opt(23, 59, 59).unwrap())
}

fn parse_date(s: &str) -> EventDirResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| EventDirError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_args_parses_day_bounds() {
        let range = DateRange::from_args(Some("2026-01-10"), Some("2026-01-20")).unwrap();

        let inside = NaiveDate::from_ymd_opt(2026, 1, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert!(range.contains(inside, inside));

        let before = NaiveDate::from_ymd_opt(2026, 1, 9)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        assert!(!range.contains(before, before));
    }

    #[test]
    fn start_keyword_unbounds_the_past() {
        let range = DateRange::from_args(Some("start"), Some("2026-01-20")).unwrap();

        let ancient = NaiveDate::from_ymd_opt(1999, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(range.contains(ancient, ancient));
    }

    #[test]
    fn default_range_is_one_year_ahead() {
        let range = DateRange::default();

        let from = range.from.expect("Default has a lower bound");
        let to = range.to.expect("Default has an upper bound");
        assert_eq!((to.date() - from.date()).num_days(), DEFAULT_RANGE_DAYS);
    }

    #[test]
    fn invalid_dates_are_rejected() {
        assert!(DateRange::from_args(Some("10/01/2026"), None).is_err());
        assert!(DateRange::from_args(None, Some("2026-13-01")).is_err());
    }
}
