//! Plain-text, JSON and CSV output for the one-shot subcommands.

use anyhow::{Context, Result};
use chrono::DateTime;
use moneyboard_core::{AreaSeries, CategoryView, DateWindow};
use serde::Serialize;
use std::path::Path;

const BAR_WIDTH: usize = 30;

fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

/// `YYYY-MM-DD` for an epoch-millis timestamp.
pub fn day_label(x: i64) -> String {
    DateTime::from_timestamp_millis(x)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| x.to_string())
}

pub fn category_text(view: &CategoryView) -> String {
    let mut s = String::new();
    s.push_str(&format!("{}\n\n", view.title));
    s.push_str(&format!("  {}  {}\n", view.header.amount, view.header.caption));
    s.push_str(&format!(
        "  [{}] {} of {}\n\n",
        bar(view.progress.fill_percent / 100.0, BAR_WIDTH),
        view.progress.ratio_label,
        view.progress.budget_label
    ));

    let name_width = view.cards.iter().map(|c| c.name.chars().count()).max().unwrap_or(0);
    for card in &view.cards {
        s.push_str(&format!(
            "  {:<name_width$}  {:>12}\n",
            card.name,
            card.amount,
            name_width = name_width
        ));
    }
    s
}

pub fn trend_text(series: &AreaSeries, window: &DateWindow, currency: &str) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "Expenses {} .. {}\n\n",
        window.start_param(),
        window.end_param()
    ));
    if series.is_empty() {
        s.push_str("  (no expenses in this window)\n");
        return s;
    }
    for p in &series.points {
        let fraction = if series.max_y > 0.0 {
            p.value() / series.max_y
        } else {
            0.0
        };
        s.push_str(&format!(
            "  {}  {:>10}  {}\n",
            day_label(p.x),
            p.y,
            "#".repeat((fraction * BAR_WIDTH as f64).round().max(0.0) as usize)
        ));
    }
    s.push_str(&format!("\n  total {currency}{:.2}\n", series.total));
    s
}

pub fn json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize output")
}

#[derive(Serialize)]
struct TrendRow<'a> {
    timestamp_ms: i64,
    date: String,
    amount: &'a str,
}

pub fn write_trend_csv(series: &AreaSeries, path: &Path) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for p in &series.points {
        w.serialize(TrendRow {
            timestamp_ms: p.x,
            date: day_label(p.x),
            amount: &p.y,
        })?;
    }
    w.flush().with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
