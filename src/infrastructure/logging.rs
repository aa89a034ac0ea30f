//! Logging setup

use crate::error::{Result, TamioError};
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Daily log file name, e.g. `tamio_fs_20250117.log`
pub fn log_file_name(date: chrono::NaiveDate) -> String {
    format!("tamio_fs_{}.log", date.format("%Y%m%d"))
}

fn open_log_file(log_dir: &Path) -> std::io::Result<(PathBuf, File)> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(log_file_name(Local::now().date_naive()));
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Install the global subscriber: stderr plus an append-only daily file.
///
/// `RUST_LOG` wins over `verbose`. Returns the log file path, or `None` when
/// the file could not be opened (stderr logging still works).
pub fn init_logging(log_dir: &Path, verbose: bool) -> Result<Option<PathBuf>> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (path, file_layer) = match open_log_file(log_dir) {
        Ok((path, file)) => (
            Some(path),
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file))),
        ),
        Err(e) => {
            eprintln!(
                "Warning: cannot open log file in {}: {}",
                log_dir.display(),
                e
            );
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| TamioError::Config(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        os = std::env::consts::OS,
        log_file = ?path,
        "tamio starting"
    );

    Ok(path)
}
