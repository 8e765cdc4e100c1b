use std::future::Future;

use moneyboard_core::{CategoryRecord, DateWindow, MonthQuery, PricePoint};

use crate::error::FetchError;

/// Where panel data comes from. [`crate::BudgetClient`] is the HTTP
/// implementation; tests plug in canned data.
pub trait BudgetSource {
    /// Category budgets for one month.
    fn category_budgets(
        &self,
        query: MonthQuery,
    ) -> impl Future<Output = Result<Vec<CategoryRecord>, FetchError>> + Send;

    /// Expenses dated inside `window`, in the order the backend returns them.
    fn ranged_expenses(
        &self,
        window: DateWindow,
    ) -> impl Future<Output = Result<Vec<PricePoint>, FetchError>> + Send;
}
