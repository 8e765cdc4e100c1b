//! Date helpers: the injected "today", the trailing trend window and the
//! month/year query for category budgets.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ShapeError, ShapeResult};
use crate::format::month_name;

/// Default trend window length, in days before today.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Calendar date of `now_utc` in an IANA timezone like "America/Chicago".
pub fn local_today(tz: &str, now_utc: DateTime<Utc>) -> ShapeResult<NaiveDate> {
    let tz: Tz = tz.parse().map_err(|_| ShapeError::InvalidTimezone {
        value: tz.to_string(),
    })?;
    Ok(now_utc.with_timezone(&tz).date_naive())
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_day(s: &str) -> ShapeResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| ShapeError::InvalidDateFormat {
        value: s.to_string(),
    })
}

/// Inclusive `[start, end]` date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// `[today - days, today]`.
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(days.into()))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Month/year pair sent with the category budget query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthQuery {
    /// 1-12
    pub month: u32,
    pub year: i32,
}

impl MonthQuery {
    pub fn for_date(day: NaiveDate) -> Self {
        Self {
            month: day.month(),
            year: day.year(),
        }
    }

    /// `None` when the month is outside 1-12.
    pub fn new(month: u32, year: i32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { month, year })
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_local_today_crosses_midnight() {
        // 03:00 UTC is still the previous evening in Chicago (CST, UTC-6)
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 3, 0, 0).unwrap();
        assert_eq!(local_today("America/Chicago", now).unwrap(), day(2026, 2, 20));
        assert_eq!(local_today("UTC", now).unwrap(), day(2026, 2, 21));
    }

    #[test]
    fn test_local_today_rejects_unknown_zone() {
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 3, 0, 0).unwrap();
        assert_eq!(
            local_today("Mars/Olympus", now),
            Err(ShapeError::InvalidTimezone {
                value: "Mars/Olympus".to_string()
            })
        );
    }

    #[test]
    fn test_trailing_window_spans_month_boundary() {
        let w = DateWindow::trailing(day(2024, 3, 3), DEFAULT_WINDOW_DAYS);
        assert_eq!(w.start_param(), "2024-02-25");
        assert_eq!(w.end_param(), "2024-03-03");
        assert!(w.contains(day(2024, 2, 25)));
        assert!(w.contains(day(2024, 3, 3)));
        assert!(!w.contains(day(2024, 3, 4)));
    }

    #[test]
    fn test_month_query() {
        let q = MonthQuery::for_date(day(2026, 10, 16));
        assert_eq!(q, MonthQuery { month: 10, year: 2026 });
        assert_eq!(q.month_name(), "October");
        assert!(MonthQuery::new(13, 2026).is_none());
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(parse_day(" 2024-01-05 ").unwrap(), day(2024, 1, 5));
        assert!(parse_day("05/01/2024").is_err());
    }
}
