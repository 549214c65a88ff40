//! Visible-month arithmetic for agenda loading.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::error::{EventlyError, EventlyResult};

/// A calendar month as the agenda view sees it. Month filtering and
/// day-keys both read the UTC calendar, so a month's day-keys always
/// fall inside that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibleMonth {
    year: i32,
    month: u32,
}

impl VisibleMonth {
    pub fn new(year: i32, month: u32) -> EventlyResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EventlyError::InvalidMonth(month));
        }
        Ok(VisibleMonth { year, month })
    }

    /// The month a given instant falls in (UTC).
    pub fn of(instant: &DateTime<Utc>) -> Self {
        VisibleMonth {
            year: instant.year(),
            month: instant.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether an instant's UTC calendar month is this month.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        instant.year() == self.year && instant.month() == self.month
    }

    /// Whether a day-key belongs to this month.
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        day.year() == self.year && day.month() == self.month
    }
}

impl fmt::Display for VisibleMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rejects_out_of_range_months() {
        assert!(VisibleMonth::new(2024, 0).is_err());
        assert!(VisibleMonth::new(2024, 13).is_err());
        assert!(VisibleMonth::new(2024, 12).is_ok());
    }

    #[test]
    fn contains_compares_utc_year_and_month() {
        let month = VisibleMonth::new(2024, 3).unwrap();

        let inside = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
        let next_month = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let same_month_other_year = Utc.with_ymd_and_hms(2023, 3, 15, 12, 0, 0).unwrap();

        assert!(month.contains(&inside));
        assert!(!month.contains(&next_month));
        assert!(!month.contains(&same_month_other_year));
    }

    #[test]
    fn displays_as_year_dash_month() {
        let month = VisibleMonth::new(987, 4).unwrap();
        assert_eq!(month.to_string(), "0987-04");
    }
}
