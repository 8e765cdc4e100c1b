//! HTTP client for the budgeting API.
//!
//! Endpoints:
//!   GET /budget/category/all?month=<1-12>&year=<YYYY>
//!   GET /expense/ranged/<YYYY-MM-DD>/<YYYY-MM-DD>

use std::time::Duration;

use moneyboard_core::{CategoryRecord, DateWindow, MonthQuery, PricePoint};
use moneyboard_ingest::{ingest_categories, ingest_expenses, IngestMode};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::source::BudgetSource;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct BudgetClient {
    http: reqwest::Client,
    base_url: String,
    mode: IngestMode,
}

impl BudgetClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::builder(base_url).build()
    }

    pub fn builder(base_url: &str) -> BudgetClientBuilder {
        BudgetClientBuilder {
            base_url: base_url.to_string(),
            timeout: DEFAULT_TIMEOUT,
            bearer_token: None,
            mode: IngestMode::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn category_url(&self) -> String {
        format!("{}/budget/category/all", self.base_url)
    }

    fn ranged_url(&self, window: &DateWindow) -> String {
        format!(
            "{}/expense/ranged/{}/{}",
            self.base_url,
            window.start_param(),
            window.end_param()
        )
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        debug!(url, "GET");
        let resp = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(url, status = status.as_u16(), "budget API error");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        resp.json().await.map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl BudgetSource for BudgetClient {
    async fn category_budgets(&self, query: MonthQuery) -> Result<Vec<CategoryRecord>, FetchError> {
        let url = self.category_url();
        let payload = self
            .get_json(
                &url,
                &[("month", query.month.to_string()), ("year", query.year.to_string())],
            )
            .await?;

        let report = ingest_categories(&payload, self.mode)?;
        info!(
            month = query.month,
            year = query.year,
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            "fetched category budgets"
        );
        Ok(report.accepted)
    }

    async fn ranged_expenses(&self, window: DateWindow) -> Result<Vec<PricePoint>, FetchError> {
        let url = self.ranged_url(&window);
        let payload = self.get_json(&url, &[]).await?;

        let report = ingest_expenses(&payload, self.mode)?;
        info!(
            start = %window.start,
            end = %window.end,
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            "fetched ranged expenses"
        );
        Ok(report.accepted)
    }
}

pub struct BudgetClientBuilder {
    base_url: String,
    timeout: Duration,
    bearer_token: Option<String>,
    mode: IngestMode,
}

impl BudgetClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sent as `Authorization: Bearer <token>` on every request.
    pub fn bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn ingest_mode(mut self, mode: IngestMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn build(self) -> Result<BudgetClient, FetchError> {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&trimmed).map_err(|e| FetchError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidBaseUrl {
                url: self.base_url,
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = &self.bearer_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| FetchError::InvalidToken(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(FetchError::Client)?;

        Ok(BudgetClient {
            http,
            base_url: trimmed,
            mode: self.mode,
        })
    }
}
