//! Tracing subscriber setup
//!
//! One-shot commands log to stderr. The full-screen dashboard owns the
//! terminal, so its logs go to a file through a non-blocking writer.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

const LOG_FILE_NAME: &str = "cloud-economics.log";

/// Where log output should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

/// Initialize tracing/logging
///
/// `RUST_LOG` wins over `logging.level` when set. Returns the worker
/// guard of the file writer; it must be held until the process exits or
/// buffered lines are lost.
///
/// Note: This function can only be called once.
pub fn init_tracing(config: &LoggingConfig, target: LogTarget) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let json = config.format == "json";

    match target {
        LogTarget::Stderr => {
            let registry = tracing_subscriber::registry().with(filter);
            let layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
            if json {
                registry.with(layer.json()).try_init()?;
            } else {
                registry.with(layer).try_init()?;
            }
            Ok(None)
        }
        LogTarget::File => {
            let path = config.file.clone().unwrap_or_else(default_log_file);
            let (dir, file_name) = split_log_path(&path);
            std::fs::create_dir_all(&dir)?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let registry = tracing_subscriber::registry().with(filter);
            let layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer);
            if json {
                registry.with(layer.json()).try_init()?;
            } else {
                registry.with(layer).try_init()?;
            }
            Ok(Some(guard))
        }
    }
}

/// `<data-local-dir>/cloud-economics/cloud-economics.log`, falling back to
/// the working directory
pub fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("cloud-economics"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

fn split_log_path(path: &Path) -> (PathBuf, String) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| LOG_FILE_NAME.to_string());
    (dir, file_name)
}
