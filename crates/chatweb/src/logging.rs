//! Subscriber setup: readable stderr plus a daily rolling JSON file.

use crate::AppPaths;

use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "chatweb=info,chatweb_core=info";

/// Log file name prefix inside the log directory.
pub const LOG_FILE_PREFIX: &str = "chatweb.log";

/// Install the global subscriber. The returned guard flushes the file writer
/// on drop and must live as long as the event loop.
pub fn init(paths: &AppPaths) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let log_dir = match paths.ensure_log_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            warn!(error = %e, "File logging disabled");
            return None;
        }
    };

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // One JSON object per line, so log files can be filtered by field.
    let file_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Some(guard)
}
