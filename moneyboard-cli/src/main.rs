use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use moneyboard_api::{load_category_view, load_trend_series, Dashboard};
use moneyboard_core::{local_today, window::parse_day, DateWindow, MonthQuery};
use std::path::PathBuf;
use tracing::debug;

mod config;
mod logging;
mod render;
mod state;
mod tui;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "moneyboard",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("MONEYBOARD_BUILD_SHA"), ")"),
    about = "Monthly budget and spending-trend dashboard"
)]
struct Cli {
    /// Budgeting API base URL (overrides config and MONEYBOARD_SERVER_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Spending by category for one month (defaults to the current month)
    Categories {
        /// Month number, 1-12
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        #[arg(long)]
        year: Option<i32>,

        /// Print the panel as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Daily expense totals over the trailing window
    Trend {
        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long)]
        today: Option<String>,

        /// Window length in days (default from config)
        #[arg(long)]
        days: Option<u32>,

        #[arg(long)]
        json: bool,

        /// Also write the series to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Interactive dashboard with both panels (r refreshes, q quits)
    Dashboard {
        #[arg(long)]
        today: Option<String>,
    },

    /// Manage ~/.moneyboard/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the effective config (file plus environment)
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(matches!(cli.command, Command::Dashboard { .. }));

    if let Command::Config { command } = &cli.command {
        return match command {
            ConfigCommand::Init => config::init_config(),
            ConfigCommand::Show => {
                let cfg = effective_config(cli.base_url.as_deref())?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
                Ok(())
            }
        };
    }

    let cfg = effective_config(cli.base_url.as_deref())?;
    let client = cfg.client()?;
    let mut settings = cfg.view_settings();
    debug!(base_url = client.base_url(), "client ready");

    match cli.command {
        Command::Categories { month, year, json } => {
            let query = month_query(&cfg, month, year)?;
            let view = load_category_view(&client, query, &settings)
                .await
                .with_context(|| format!("load categories for {}/{}", query.month, query.year))?;
            if json {
                println!("{}", render::json(&view)?);
            } else {
                print!("{}", render::category_text(&view));
            }
        }

        Command::Trend {
            today,
            days,
            json,
            csv,
        } => {
            if let Some(days) = days {
                if days == 0 {
                    bail!("--days must be at least 1");
                }
                settings.window_days = days;
            }
            let today = resolve_today(&cfg, today.as_deref())?;
            let window = DateWindow::trailing(today, settings.window_days);
            let series = load_trend_series(&client, today, &settings)
                .await
                .with_context(|| {
                    format!("load expenses {} .. {}", window.start_param(), window.end_param())
                })?;

            if let Some(path) = &csv {
                render::write_trend_csv(&series, path)?;
                eprintln!("Wrote {} points to {}", series.points.len(), path.display());
            }
            if json {
                println!("{}", render::json(&series)?);
            } else {
                print!(
                    "{}",
                    render::trend_text(&series, &window, &settings.currency_symbol)
                );
            }
        }

        Command::Dashboard { today } => {
            let today = resolve_today(&cfg, today.as_deref())?;
            tui::run_dashboard(Dashboard::new(client, settings), today).await?;
        }

        Command::Config { .. } => {}
    }

    Ok(())
}

fn effective_config(base_url: Option<&str>) -> Result<Config> {
    let mut cfg = config::load_config()?;
    if let Some(url) = base_url {
        cfg.api.base_url = url.to_string();
    }
    Ok(cfg)
}

/// `--today` if given, otherwise the current date in the configured timezone.
fn resolve_today(cfg: &Config, arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => parse_day(s).with_context(|| format!("invalid --today {s:?}")),
        None => local_today(&cfg.display.timezone, Utc::now())
            .context("resolve today from [display] timezone"),
    }
}

/// Explicit `--month`/`--year`, filling gaps from today's month. Today is only
/// resolved when something is missing.
fn month_query(cfg: &Config, month: Option<u32>, year: Option<i32>) -> Result<MonthQuery> {
    let (month, year) = match (month, year) {
        (Some(month), Some(year)) => (month, year),
        (month, year) => {
            let current = MonthQuery::for_date(resolve_today(cfg, None)?);
            (month.unwrap_or(current.month), year.unwrap_or(current.year))
        }
    };
    MonthQuery::new(month, year).with_context(|| format!("invalid month {month}"))
}
