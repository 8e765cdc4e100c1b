use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `MONEYBOARD_HOME` if set, else `~/.moneyboard`.
pub fn moneyboard_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("MONEYBOARD_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".moneyboard"))
}

pub fn ensure_moneyboard_home() -> Result<PathBuf> {
    let dir = moneyboard_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
