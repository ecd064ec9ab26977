//! Log file setup.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::errors::AppError;

/// Route `tracing` output to `log_file`, appending.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init(log_file: &Path) -> Result<(), AppError> {
    let log_error = |source| AppError::LogFile {
        path: log_file.to_path_buf(),
        source,
    };

    if let Some(dir) = log_file.parent() {
        fs::create_dir_all(dir).map_err(log_error)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(log_error)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::Subscriber(e.to_string()))
}
