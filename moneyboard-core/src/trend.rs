//! Trailing expense trend: merge same-day price records into one point per
//! day for the area chart.
//!
//! The merge only folds *adjacent* records with the same date string. A date
//! that reappears after a different one starts a new point. Callers that want
//! one point per day must hand in records grouped by date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ShapeError, ShapeResult};
use crate::format::fixed2;

/// A single expense as returned by the ranged-expense endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    /// `YYYY-MM-DD`, RFC 3339, or an offset-less ISO 8601 datetime.
    pub date: String,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: impl Into<String>, price: f64) -> Self {
        Self {
            date: date.into(),
            price,
        }
    }
}

/// One point of the area series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompressedPoint {
    /// Epoch milliseconds.
    pub x: i64,
    /// Summed price, fixed-point with two decimals.
    pub y: String,
}

impl CompressedPoint {
    pub fn value(&self) -> f64 {
        self.y.parse().unwrap_or_default()
    }
}

/// Epoch milliseconds for a date string.
///
/// Accepts `YYYY-MM-DD` (UTC midnight), RFC 3339, and ISO 8601 datetimes
/// without an offset (`2024-01-01T09:30:00`, read as UTC).
pub fn epoch_millis(date: &str) -> ShapeResult<i64> {
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp_millis());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Ok(dt.timestamp_millis());
    }
    NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().timestamp_millis())
        .map_err(|_| ShapeError::InvalidDateFormat {
            value: date.to_string(),
        })
}

fn finish(date: &str, sum: f64) -> ShapeResult<CompressedPoint> {
    Ok(CompressedPoint {
        x: epoch_millis(date)?,
        y: fixed2(sum),
    })
}

/// Merge consecutive same-date records by summing their prices.
///
/// `None` and an empty slice both yield an empty series. Output order follows
/// the first occurrence of each run in the input.
pub fn compress(records: Option<&[PricePoint]>) -> ShapeResult<Vec<CompressedPoint>> {
    let Some(records) = records else {
        return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(records.len());
    let mut pending: Option<(&str, f64)> = None;

    for r in records {
        if let Some((date, sum)) = pending.as_mut() {
            if *date == r.date {
                *sum += r.price;
                continue;
            }
        }
        if let Some((date, sum)) = pending.replace((r.date.as_str(), r.price)) {
            out.push(finish(date, sum)?);
        }
    }
    if let Some((date, sum)) = pending {
        out.push(finish(date, sum)?);
    }

    debug!(input = records.len(), output = out.len(), "compressed trend points");
    Ok(out)
}

/// Compress a ranged-expense response. The endpoint returns newest first, so
/// the records are reversed before merging.
pub fn compress_response(mut records: Vec<PricePoint>) -> ShapeResult<Vec<CompressedPoint>> {
    records.reverse();
    compress(Some(records.as_slice()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAN_1: i64 = 1_704_067_200_000;
    const JAN_2: i64 = JAN_1 + 86_400_000;

    #[test]
    fn test_empty_and_absent() {
        let empty: Vec<PricePoint> = Vec::new();
        assert!(compress(None).unwrap().is_empty());
        assert!(compress(Some(empty.as_slice())).unwrap().is_empty());
    }

    #[test]
    fn test_same_day_records_are_summed() {
        let records = vec![
            PricePoint::new("2024-01-01", 5.0),
            PricePoint::new("2024-01-01", 3.0),
        ];
        let out = compress(Some(records.as_slice())).unwrap();
        assert_eq!(
            out,
            vec![CompressedPoint {
                x: JAN_1,
                y: "8.00".to_string()
            }]
        );
    }

    #[test]
    fn test_non_adjacent_duplicates_stay_separate() {
        let records = vec![
            PricePoint::new("2024-01-01", 5.0),
            PricePoint::new("2024-01-02", 1.0),
            PricePoint::new("2024-01-01", 3.0),
        ];
        let out = compress(Some(records.as_slice())).unwrap();
        let xs: Vec<i64> = out.iter().map(|p| p.x).collect();
        let ys: Vec<&str> = out.iter().map(|p| p.y.as_str()).collect();
        assert_eq!(xs, vec![JAN_1, JAN_2, JAN_1]);
        assert_eq!(ys, vec!["5.00", "1.00", "3.00"]);
    }

    #[test]
    fn test_y_has_two_decimals() {
        let records = vec![
            PricePoint::new("2024-01-01", 12.0),
            PricePoint::new("2024-01-02", 0.1),
            PricePoint::new("2024-01-02", 0.2),
            PricePoint::new("2024-01-03", 19.999),
        ];
        let out = compress(Some(records.as_slice())).unwrap();
        for p in &out {
            let (_, frac) = p.y.split_once('.').expect("decimal point");
            assert_eq!(frac.len(), 2, "y = {}", p.y);
        }
        assert_eq!(out[0].y, "12.00");
        assert_eq!(out[1].y, "0.30");
        assert_eq!(out[2].y, "20.00");
    }

    #[test]
    fn test_tie_sum_rounds_up() {
        let records = vec![
            PricePoint::new("2024-01-01", 0.0625),
            PricePoint::new("2024-01-01", 0.0625),
            PricePoint::new("2024-01-02", 1.125),
        ];
        let out = compress(Some(records.as_slice())).unwrap();
        assert_eq!(out[0].y, "0.13");
        assert_eq!(out[1].y, "1.13");
    }

    #[test]
    fn test_output_never_longer_and_no_consecutive_duplicates() {
        let dates = ["2024-01-03", "2024-01-03", "2024-01-02", "2024-01-03", "2024-01-01", "2024-01-01"];
        let records: Vec<_> = dates.iter().map(|d| PricePoint::new(*d, 1.0)).collect();
        let out = compress(Some(records.as_slice())).unwrap();
        assert!(out.len() <= records.len());
        assert_eq!(out.len(), 4);
        for w in out.windows(2) {
            assert_ne!(w[0].x, w[1].x);
        }
    }

    #[test]
    fn test_invalid_date_propagates() {
        let records = vec![
            PricePoint::new("2024-01-01", 1.0),
            PricePoint::new("01/02/2024", 2.0),
        ];
        let err = compress(Some(records.as_slice())).unwrap_err();
        assert_eq!(
            err,
            ShapeError::InvalidDateFormat {
                value: "01/02/2024".to_string()
            }
        );
    }

    #[test]
    fn test_rfc3339_dates() {
        assert_eq!(epoch_millis("2024-01-01T00:00:00Z").unwrap(), JAN_1);
        assert_eq!(epoch_millis("2024-01-01T01:00:00+01:00").unwrap(), JAN_1);
        assert!(epoch_millis("").is_err());
    }

    #[test]
    fn test_datetime_without_offset_is_utc() {
        assert_eq!(epoch_millis("2024-01-01T00:00:00").unwrap(), JAN_1);
        assert_eq!(epoch_millis("2024-01-01T00:00:00.250").unwrap(), JAN_1 + 250);
        assert!(epoch_millis("2024-01-01 00:00:00").is_err());
    }

    #[test]
    fn test_compress_response_reverses_first() {
        let newest_first = vec![
            PricePoint::new("2024-01-02", 4.0),
            PricePoint::new("2024-01-01", 2.5),
            PricePoint::new("2024-01-01", 2.5),
        ];
        let out = compress_response(newest_first).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].x, JAN_1);
        assert_eq!(out[0].y, "5.00");
        assert_eq!(out[1].value(), 4.0);
    }
}
