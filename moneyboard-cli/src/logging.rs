use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::state::ensure_moneyboard_home;

pub const ENV_LOG: &str = "MONEYBOARD_LOG";
pub const LOG_FILE: &str = "moneyboard.log";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    /// Appended to; the TUI owns the terminal.
    File(PathBuf),
}

pub fn sink_for(full_screen: bool, home: &Path) -> LogSink {
    if full_screen {
        LogSink::File(home.join(LOG_FILE))
    } else {
        LogSink::Stderr
    }
}

pub fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))
}

/// Structured logs on stderr so stdout stays free for panel output. In
/// full-screen mode they go to `~/.moneyboard/moneyboard.log` instead, and are
/// dropped if that file cannot be opened.
pub fn init(full_screen: bool) {
    let default = "moneyboard=info,moneyboard_api=info,moneyboard_core=info,moneyboard_ingest=warn";
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let sink = if full_screen {
        match ensure_moneyboard_home() {
            Ok(home) => sink_for(true, &home),
            Err(_) => return,
        }
    } else {
        LogSink::Stderr
    };

    // A second init (tests) is harmless
    match sink {
        LogSink::Stderr => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
        LogSink::File(path) => {
            if let Ok(file) = open_log_file(&path) {
                let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_full_screen_logs_to_file_under_home() {
        let home = Path::new("/tmp/mb-home");
        assert_eq!(
            sink_for(true, home),
            LogSink::File(PathBuf::from("/tmp/mb-home/moneyboard.log"))
        );
        assert_eq!(sink_for(false, home), LogSink::Stderr);
    }

    #[test]
    fn test_log_file_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
