//! moneyboard-api: budgeting-API client and the refresh drivers for the
//! spending and trend panels.

pub mod client;
pub mod dashboard;
pub mod error;
pub mod source;

pub use client::{BudgetClient, BudgetClientBuilder};
pub use dashboard::{load_category_view, load_trend_series, Dashboard, ViewSettings};
pub use error::FetchError;
pub use source::BudgetSource;
