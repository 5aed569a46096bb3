use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use time::UtcOffset;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{self, fmt, prelude::*};

use crate::config::LoggingConfig;

const LOG_RETENTION_DAYS: u64 = 7;

/// Get the log directory path, creating it if needed
///
/// Uses `override_dir` when given, otherwise the user-specific OS cache directory:
/// - Linux: ~/.cache/alloy-language-server/
/// - macOS: ~/Library/Caches/alloy-language-server/
/// - Windows: %LOCALAPPDATA%\alloy-language-server\
fn get_log_dir(override_dir: Option<&Path>) -> io::Result<PathBuf> {
    let log_dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::cache_dir()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "Unable to determine user cache directory",
                )
            })?
            .join("alloy-language-server"),
    };

    if !log_dir.exists() {
        fs::create_dir_all(&log_dir)?;
    }

    Ok(log_dir)
}

fn is_session_log(name: &str) -> bool {
    name.starts_with("session-") && name.ends_with(".log")
}

/// Clean up session logs older than `retention`, returning how many were removed
fn cleanup_old_logs(log_dir: &Path, retention: Duration) -> io::Result<usize> {
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)?.flatten() {
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let is_candidate = metadata.is_file()
            && entry.file_name().to_str().is_some_and(is_session_log);
        if !is_candidate {
            continue;
        }
        let expired = metadata
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .is_some_and(|age| age > retention);
        if !expired {
            continue;
        }
        match fs::remove_file(entry.path()) {
            Ok(()) => {
                eprintln!("Removed old log file: {:?}", entry.path());
                removed += 1;
            }
            Err(e) => eprintln!("Failed to remove old log file {:?}: {}", entry.path(), e),
        }
    }

    Ok(removed)
}

fn session_id() -> io::Result<String> {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(format_description!("[year][month][day]-[hour][minute][second]"))
        .map_err(io::Error::other)?;
    Ok(format!("{}-{}", timestamp, std::process::id()))
}

fn tolerate_reinit(result: Result<(), tracing_subscriber::util::TryInitError>) -> io::Result<()> {
    match result {
        Ok(()) => Ok(()),
        // Ignore errors due to the subscriber or logger already being set
        Err(e) if e.to_string().contains("already been set") || e.to_string().contains("SetLoggerError") => {
            Ok(())
        }
        Err(e) => Err(io::Error::other(e)),
    }
}

/// Initialize logger with stderr and optional file output
/// Returns a WorkerGuard that must be kept alive for the duration of the program
///
/// # Logging Behavior
/// - **Stderr**: Logs at the configured level (`--log-level`, else RUST_LOG, else "info").
///   stdout carries the protocol and never receives log output.
/// - **Session File**: Logs at DEBUG level, including full request parameters
pub fn init_logger(config: &LoggingConfig) -> io::Result<WorkerGuard> {
    let timer = fmt::time::OffsetTime::new(
        UtcOffset::UTC,
        format_description!("[[[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z]"),
    );

    let stderr_filter = match config.level.as_deref() {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer.clone())
        .with_ansi(!config.no_color)
        .with_filter(stderr_filter);

    if !config.file_logging {
        // No file logging - use a dummy guard
        let (_, guard) = tracing_appender::non_blocking(std::io::sink());
        tolerate_reinit(tracing_subscriber::registry().with(stderr_layer).try_init())?;
        return Ok(guard);
    }

    let log_dir = get_log_dir(config.log_dir.as_deref())?;
    cleanup_old_logs(
        &log_dir,
        Duration::from_secs(LOG_RETENTION_DAYS * 24 * 60 * 60),
    )?;

    let log_path = log_dir.join(format!("session-{}.log", session_id()?));
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(timer)
        .with_ansi(false)
        .with_filter(tracing_subscriber::EnvFilter::new("debug"));

    // Each layer has its own filter, so no global filter is needed
    tolerate_reinit(
        tracing_subscriber::registry()
            .with(stderr_layer)
            .with(file_layer)
            .try_init(),
    )?;
    eprintln!("Logging to file: {:?}", log_path);
    Ok(guard)
}
