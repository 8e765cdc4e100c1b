//! Refresh drivers for the two panels: fetch, shape, and swap the result
//! into the panel state.

use chrono::NaiveDate;
use moneyboard_core::{
    compress_response, compute_totals, Applied, AreaSeries, CategoryView, DateWindow, MonthQuery,
    Palette, Panel, DEFAULT_WINDOW_DAYS,
};
use tracing::info;

use crate::error::FetchError;
use crate::source::BudgetSource;

/// Display settings shared by both panels.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub palette: Palette,
    pub currency_symbol: String,
    pub window_days: u32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            currency_symbol: "$".to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

/// Fetch one month of category budgets and build the spending panel.
pub async fn load_category_view<S: BudgetSource>(
    source: &S,
    query: MonthQuery,
    settings: &ViewSettings,
) -> Result<CategoryView, FetchError> {
    let records = source.category_budgets(query).await?;
    let summary = compute_totals(&records, &settings.palette);
    Ok(CategoryView::build(&summary, query, &settings.currency_symbol))
}

/// Fetch the trailing window ending at `today` and build the trend series.
pub async fn load_trend_series<S: BudgetSource>(
    source: &S,
    today: NaiveDate,
    settings: &ViewSettings,
) -> Result<AreaSeries, FetchError> {
    let window = DateWindow::trailing(today, settings.window_days);
    let records = source.ranged_expenses(window).await?;
    let points = compress_response(records)?;
    Ok(AreaSeries::from_points(points))
}

/// Both panels plus the source they refresh from.
pub struct Dashboard<S> {
    source: S,
    settings: ViewSettings,
    pub categories: Panel<CategoryView>,
    pub trend: Panel<AreaSeries>,
}

impl<S: BudgetSource> Dashboard<S> {
    pub fn new(source: S, settings: ViewSettings) -> Self {
        Self {
            source,
            settings,
            categories: Panel::new("categories"),
            trend: Panel::new("trend"),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    /// Refresh the spending panel for the month containing `today`.
    pub async fn refresh_categories(&mut self, today: NaiveDate) -> Applied {
        self.refresh_categories_for(MonthQuery::for_date(today)).await
    }

    pub async fn refresh_categories_for(&mut self, query: MonthQuery) -> Applied {
        let ticket = self.categories.begin_refresh();
        let result = load_category_view(&self.source, query, &self.settings).await;
        let applied = self.categories.complete(ticket, result);
        info!(panel = "categories", ?applied, "refresh finished");
        applied
    }

    /// Refresh the trend panel for the window ending at `today`.
    pub async fn refresh_trend(&mut self, today: NaiveDate) -> Applied {
        let ticket = self.trend.begin_refresh();
        let result = load_trend_series(&self.source, today, &self.settings).await;
        let applied = self.trend.complete(ticket, result);
        info!(panel = "trend", ?applied, "refresh finished");
        applied
    }

    pub async fn refresh_all(&mut self, today: NaiveDate) -> (Applied, Applied) {
        let categories = self.refresh_categories(today).await;
        let trend = self.refresh_trend(today).await;
        (categories, trend)
    }
}
