//! Chart-ready views handed to whatever renders the two panels.

use serde::{Deserialize, Serialize};

use crate::category::CategorySummary;
use crate::format::format_currency;
use crate::trend::CompressedPoint;
use crate::window::MonthQuery;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSegment {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// Header pair drawn in the middle of the ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderLabels {
    pub amount: String,
    pub caption: String,
}

/// Horizontal spent/budget bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressIndicator {
    /// Rounded spent/budget percentage; 0 when the budget is zero.
    pub ratio_percent: i64,
    /// False when the budget is zero and `ratio_percent` is the fallback.
    pub ratio_defined: bool,
    pub ratio_label: String,
    /// `ratio_percent` clamped to `[0, 100]`, safe to use as a width.
    pub fill_percent: f64,
    pub budget_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCard {
    pub name: String,
    pub amount: String,
    pub color: String,
}

/// Everything the monthly spending panel draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    pub title: String,
    pub ring: Vec<RingSegment>,
    pub header: HeaderLabels,
    pub progress: ProgressIndicator,
    pub cards: Vec<CategoryCard>,
}

impl CategoryView {
    pub fn build(summary: &CategorySummary, query: MonthQuery, currency: &str) -> Self {
        let month = query.month_name();
        let totals = &summary.totals;

        let ring = summary
            .augmented
            .iter()
            .map(|r| RingSegment {
                label: r.record.category_name.clone(),
                value: r.record.spent,
                color: r.color.clone(),
            })
            .collect();

        let cards = summary
            .augmented
            .iter()
            .map(|r| CategoryCard {
                name: r.record.category_name.clone(),
                amount: format_currency(currency, r.record.spent, 2),
                color: r.color.clone(),
            })
            .collect();

        let ratio = totals.ratio_percent();
        let ratio_percent = ratio.clone().unwrap_or(0);

        Self {
            title: format!("{month}'s Spending"),
            ring,
            header: HeaderLabels {
                amount: format_currency(currency, totals.total_spent, 0),
                caption: format!("Spent in {month}"),
            },
            progress: ProgressIndicator {
                ratio_percent,
                ratio_defined: ratio.is_ok(),
                ratio_label: format!("{ratio_percent}%"),
                fill_percent: (ratio_percent as f64).clamp(0.0, 100.0),
                budget_label: format_currency(currency, totals.total_budget, 0),
            },
            cards,
        }
    }
}

/// Filled area series keyed by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSeries {
    pub points: Vec<CompressedPoint>,
    pub min_y: f64,
    pub max_y: f64,
    pub total: f64,
}

impl AreaSeries {
    pub fn from_points(points: Vec<CompressedPoint>) -> Self {
        let values: Vec<f64> = points.iter().map(CompressedPoint::value).collect();
        let (min_y, max_y) = if values.is_empty() {
            (0.0, 0.0)
        } else {
            values
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(*v), hi.max(*v))
                })
        };
        Self {
            total: values.iter().sum(),
            points,
            min_y,
            max_y,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(x, y)` pairs as floats, for plotting.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.x as f64, p.value()))
            .collect()
    }
}
