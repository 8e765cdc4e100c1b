//! Monthly category spending: totals, spent/budget ratio and the augmented
//! list (colored records plus a synthetic "Amount Left" entry) behind the
//! spending ring.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ShapeError, ShapeResult};
use crate::format::round_half_up;

/// Display name of the synthetic unspent-budget entry.
pub const AMOUNT_LEFT: &str = "Amount Left";
/// Stable id of the synthetic unspent-budget entry.
pub const AMOUNT_LEFT_ID: &str = "amount-left";

/// One month's budgeted vs. spent amount for a spending category.
///
/// Field names follow the budgeting API (`_id`, `category`, `value`, `spent`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "category", alias = "categoryName")]
    pub category_name: String,
    #[serde(rename = "value", alias = "budgeted")]
    pub budgeted: f64,
    pub spent: f64,
}

impl CategoryRecord {
    pub fn new(
        id: impl Into<String>,
        category_name: impl Into<String>,
        budgeted: f64,
        spent: f64,
    ) -> Self {
        Self {
            id: id.into(),
            category_name: category_name.into(),
            budgeted,
            spent,
        }
    }
}

/// A category record with its assigned display color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AugmentedCategoryRecord {
    #[serde(flatten)]
    pub record: CategoryRecord,
    pub color: String,
    /// True only for the synthetic "Amount Left" entry.
    pub is_remaining: bool,
}

/// Ordered gradient colors handed out by record index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub gradient: Vec<String>,
    pub remaining: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            gradient: [
                "#0B3D2E", "#14553F", "#1E6F50", "#2A8A63", "#3AA676", "#52C18A",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            remaining: "#FFFFFF".to_string(),
        }
    }
}

impl Palette {
    /// Color for the record at `index`; cycles when the list outgrows the gradient.
    pub fn color_for(&self, index: usize) -> &str {
        if self.gradient.is_empty() {
            return &self.remaining;
        }
        &self.gradient[index % self.gradient.len()]
    }
}

/// Sums over a month's category records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub total_spent: f64,
    pub total_budget: f64,
}

impl CategoryTotals {
    pub fn from_records(records: &[CategoryRecord]) -> Self {
        Self {
            total_spent: records.iter().map(|r| r.spent).sum(),
            total_budget: records.iter().map(|r| r.budgeted).sum(),
        }
    }

    /// Unspent budget rounded to the nearest whole unit. Negative when overspent.
    pub fn remaining(&self) -> f64 {
        round_half_up(self.total_budget - self.total_spent)
    }

    /// `round(total_spent / total_budget * 100)`.
    pub fn ratio_percent(&self) -> ShapeResult<i64> {
        if self.total_budget == 0.0 {
            return Err(ShapeError::DivisionUndefined);
        }
        let ratio = round_half_up(self.total_spent / self.total_budget * 100.0);
        if !ratio.is_finite() {
            return Err(ShapeError::DivisionUndefined);
        }
        Ok(ratio as i64)
    }

    /// Ratio with the zero-budget case mapped to 0%.
    pub fn ratio_percent_or_zero(&self) -> i64 {
        self.ratio_percent().unwrap_or(0)
    }
}

/// Totals plus the augmented list, ready for the ring chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub totals: CategoryTotals,
    /// Input records in order, then the synthetic entry.
    pub augmented: Vec<AugmentedCategoryRecord>,
}

impl CategorySummary {
    pub fn remaining_entry(&self) -> Option<&AugmentedCategoryRecord> {
        self.augmented.iter().find(|r| r.is_remaining)
    }

    /// Entries as fetched, without the synthetic one.
    pub fn categories(&self) -> impl Iterator<Item = &AugmentedCategoryRecord> {
        self.augmented.iter().filter(|r| !r.is_remaining)
    }
}

/// Compute totals and build a freshly allocated augmented list.
///
/// The caller's records are only borrowed; calling this repeatedly on the same
/// input always yields exactly one synthetic entry.
pub fn compute_totals(records: &[CategoryRecord], palette: &Palette) -> CategorySummary {
    let totals = CategoryTotals::from_records(records);

    let mut augmented: Vec<AugmentedCategoryRecord> = records
        .iter()
        .enumerate()
        .map(|(i, r)| AugmentedCategoryRecord {
            record: r.clone(),
            color: palette.color_for(i).to_string(),
            is_remaining: false,
        })
        .collect();

    augmented.push(AugmentedCategoryRecord {
        record: CategoryRecord::new(AMOUNT_LEFT_ID, AMOUNT_LEFT, 0.0, totals.remaining()),
        color: palette.remaining.clone(),
        is_remaining: true,
    });

    debug!(
        categories = records.len(),
        total_spent = totals.total_spent,
        total_budget = totals.total_budget,
        "computed category totals"
    );

    CategorySummary { totals, augmented }
}
