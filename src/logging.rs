//! Log output setup
//!
//! The TUI owns the terminal, so log lines go to a file under the data
//! directory. Setting `RUST_LOG` explicitly also mirrors them to stderr.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "signup-tui.log";
pub const DEFAULT_FILTER: &str = "signup_tui=info";

/// Filter and sinks derived from `RUST_LOG`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPlan {
    pub filter: String,
    pub to_stderr: bool,
}

impl LogPlan {
    pub fn from_env_value(rust_log: Option<String>) -> Self {
        match rust_log.filter(|v| !v.trim().is_empty()) {
            Some(filter) => Self {
                filter,
                to_stderr: true,
            },
            None => Self {
                filter: DEFAULT_FILTER.to_string(),
                to_stderr: false,
            },
        }
    }
}

/// Non-blocking writer appending to `dir/signup-tui.log`
fn file_writer(dir: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    Ok(tracing_appender::non_blocking(appender))
}

/// Install the global subscriber. The returned guard flushes the file on drop.
pub fn init(log_dir: PathBuf) -> Result<WorkerGuard> {
    let plan = LogPlan::from_env_value(std::env::var("RUST_LOG").ok());
    let (writer, guard) = file_writer(&log_dir)?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(writer);
    let stderr_layer = plan
        .to_stderr
        .then(|| tracing_subscriber::fmt::layer().with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(EnvFilter::new(&plan.filter))
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::debug!(path = %log_dir.join(LOG_FILE_NAME).display(), "Logging initialised");
    Ok(guard)
}
