use anyhow::{Context, Result};
use moneyboard_api::{BudgetClient, ViewSettings};
use moneyboard_core::{Palette, DEFAULT_WINDOW_DAYS};
use moneyboard_ingest::IngestMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::state::ensure_moneyboard_home;

pub const ENV_SERVER_URL: &str = "MONEYBOARD_SERVER_URL";
pub const ENV_API_TOKEN: &str = "MONEYBOARD_API_TOKEN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiSection,
    pub display: DisplaySection,
    pub trend: TrendSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Bearer token for the budgeting API (optional)
    pub token: Option<String>,
    /// Fail a refresh on the first malformed record instead of skipping it
    pub strict_ingest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// IANA timezone used to decide what "today" is
    pub timezone: String,
    pub currency_symbol: String,
    pub palette: Vec<String>,
    pub remaining_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendSection {
    pub window_days: u32,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 15,
            token: None,
            strict_ingest: false,
        }
    }
}

impl Default for DisplaySection {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            timezone: "UTC".to_string(),
            currency_symbol: "$".to_string(),
            palette: palette.gradient,
            remaining_color: palette.remaining,
        }
    }
}

impl Default for TrendSection {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl Config {
    /// Environment wins over the file.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(ENV_SERVER_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = var(ENV_API_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.api.token = Some(token);
        }
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            palette: Palette {
                gradient: self.display.palette.clone(),
                remaining: self.display.remaining_color.clone(),
            },
            currency_symbol: self.display.currency_symbol.clone(),
            window_days: self.trend.window_days,
        }
    }

    pub fn client(&self) -> Result<BudgetClient> {
        let mode = if self.api.strict_ingest {
            IngestMode::Strict
        } else {
            IngestMode::Lenient
        };
        BudgetClient::builder(&self.api.base_url)
            .timeout(Duration::from_secs(self.api.timeout_secs.max(1)))
            .bearer_token(self.api.token.clone())
            .ingest_mode(mode)
            .build()
            .context("build budget API client")
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_moneyboard_home()?.join("config.toml"))
}

/// Load `config.toml` (defaults when absent) and apply environment overrides.
pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    let mut cfg = if p.exists() {
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?
    } else {
        Config::default()
    };
    cfg.apply_env(|k| std::env::var(k).ok());
    Ok(cfg)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
