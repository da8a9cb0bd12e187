//! Usage: Tracing/logging initialization (rolling file logs + best-effort cleanup).

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;

use crate::settings;

const LOG_SUBDIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "bracket-hub.log";
const CLEANUP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

pub(crate) fn init(data_dir: &Path) -> Option<WorkerGuard> {
    match init_impl(data_dir) {
        Ok(guard) => Some(guard),
        Err(err) => {
            // Last-resort fallback: stderr logger.
            let _ = tracing_subscriber::fmt()
                .with_env_filter(default_env_filter())
                .with_target(false)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .try_init();
            eprintln!("tracing init failed: {err}");
            None
        }
    }
}

fn init_impl(data_dir: &Path) -> Result<WorkerGuard, String> {
    let log_dir = ensure_log_dir(data_dir)?;
    let env_filter = default_env_filter();

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("failed to set global tracing subscriber: {e}"))?;

    // Capture `log` crate records from dependencies. If another logger is
    // already set, skip silently.
    let _ = tracing_log::LogTracer::init();

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Ok(guard)
}

fn default_env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            tracing_subscriber::EnvFilter::new("info,bracket_hub=debug")
        }
        #[cfg(not(debug_assertions))]
        {
            tracing_subscriber::EnvFilter::new("info")
        }
    })
}

fn ensure_log_dir(data_dir: &Path) -> Result<PathBuf, String> {
    let dir = data_dir.join(LOG_SUBDIR);
    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("failed to create log dir {}: {e}", dir.display()))?;
    Ok(dir)
}

/// Periodically deletes rolled log files past the retention window. Requires
/// a running tokio runtime.
pub(crate) fn spawn_cleanup_task(data_dir: PathBuf) {
    let log_dir = data_dir.join(LOG_SUBDIR);
    tokio::spawn(async move {
        let data_dir_first = data_dir.clone();
        let log_dir_first = log_dir.clone();
        std::mem::drop(tokio::task::spawn_blocking(move || {
            cleanup_once(&data_dir_first, &log_dir_first);
        }));

        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        // First tick is immediate; skip it so we don't run twice at startup.
        interval.tick().await;
        loop {
            interval.tick().await;
            let data_dir = data_dir.clone();
            let log_dir = log_dir.clone();
            std::mem::drop(tokio::task::spawn_blocking(move || {
                cleanup_once(&data_dir, &log_dir);
            }));
        }
    });
}

fn cleanup_once(data_dir: &Path, log_dir: &Path) {
    let retention_days = settings::log_retention_days_fail_open(data_dir);
    match cleanup_logs(log_dir, retention_days) {
        Ok(deleted) if deleted > 0 => {
            tracing::info!(retention_days, deleted, "cleaned up old log files");
        }
        Ok(_) => {}
        Err(err) => {
            tracing::warn!(retention_days, "log cleanup failed: {}", err);
        }
    }
}

fn cleanup_logs(log_dir: &Path, retention_days: u32) -> Result<usize, String> {
    let retention_days = retention_days.max(1);
    let now = SystemTime::now();
    let cutoff = now
        .checked_sub(Duration::from_secs(
            (retention_days as u64).saturating_mul(24 * 60 * 60),
        ))
        .unwrap_or(UNIX_EPOCH);

    let mut deleted = 0usize;
    let entries = std::fs::read_dir(log_dir).map_err(|e| format!("read_dir failed: {e}"))?;
    for entry in entries {
        let entry = match entry {
            Ok(v) => v,
            Err(err) => {
                tracing::warn!("log cleanup: read_dir entry error: {}", err);
                continue;
            }
        };

        let path = entry.path();
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !name.starts_with(LOG_FILE_PREFIX) {
            continue;
        }
        let meta = match entry.metadata() {
            Ok(v) => v,
            Err(err) => {
                tracing::warn!(path = %path.display(), "log cleanup: metadata error: {}", err);
                continue;
            }
        };
        if !meta.is_file() {
            continue;
        }

        let modified = meta.modified().unwrap_or(UNIX_EPOCH);
        if modified >= cutoff {
            continue;
        }

        match std::fs::remove_file(&path) {
            Ok(()) => deleted = deleted.saturating_add(1),
            Err(err) => {
                tracing::warn!(path = %path.display(), "log cleanup: remove failed: {}", err);
            }
        }
    }

    Ok(deleted)
}
