use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Keeps the non-blocking writer alive; dropping it flushes buffered logs.
pub struct LogGuard(#[allow(dead_code)] Option<WorkerGuard>);

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub filter: Option<String>,
}

/// File-only logging so nothing bleeds into the terminal the TUI draws on.
pub fn init(data_dir: &Path, cfg: LogConfig) -> LogGuard {
    let log_dir = ensure_log_dir(cfg.dir.unwrap_or_else(|| data_dir.join("logs")));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "melodiary-tui.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer);

    let _ = tracing_subscriber::registry()
        .with(env_filter(cfg.filter))
        .with(file_layer)
        .try_init();
    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    LogGuard(Some(guard))
}

/// Falls back to a temp directory when the preferred one cannot be created.
fn ensure_log_dir(preferred: PathBuf) -> PathBuf {
    if fs::create_dir_all(&preferred).is_ok() {
        return preferred;
    }
    let fallback = std::env::temp_dir().join("melodiary-tui-logs");
    let _ = fs::create_dir_all(&fallback);
    fallback
}

/// The `--log-filter` flag wins over `RUST_LOG`; the default quiets the
/// HTTP stack.
fn env_filter(flag: Option<String>) -> EnvFilter {
    match flag {
        Some(s) if !s.trim().is_empty() => EnvFilter::new(s),
        _ => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
    }
}
