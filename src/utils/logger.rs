use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;

pub const DEBUG_ENV: &str = "QUALITY_MENU_DEBUG";

/// Initialize logging based on QUALITY_MENU_DEBUG environment variable.
///
/// The terminal belongs to the menu, so logs only ever go to a file.
pub fn init_logging() -> Option<WorkerGuard> {
    if std::env::var(DEBUG_ENV).is_err() {
        return None;
    }

    let log_dir = log_dir();
    let _ = std::fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::daily(&log_dir, "quality-menu.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::DEBUG.into()),
        )
        .init();

    tracing::info!("Quality menu logging initialized in {}", log_dir.display());
    Some(guard)
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quality-menu")
}
