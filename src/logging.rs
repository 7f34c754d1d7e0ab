//! Terminal and log-file tracing setup
//!
//! The terminal gets a compact, coloured stream; the log directory gets a
//! plain-text file per day. `RUST_LOG` overrides [`DEFAULT_DIRECTIVES`].

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name stem; the appender suffixes the date
const LOG_FILE_PREFIX: &str = "museum.log";

/// Catalog loading and browsing details, quieter dependencies
pub const DEFAULT_DIRECTIVES: &str = "warn,mineral_museum=debug";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop, so keep it alive for
/// as long as the program runs.
pub fn init_logging(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        log_dir,
        LOG_FILE_PREFIX,
    ));

    let terminal = fmt::layer().compact().with_target(false);
    let file = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(terminal)
        .with(file)
        .try_init()?;

    tracing::debug!(dir = %log_dir.display(), "Writing logs");
    Ok(guard)
}

/// Log a failed operation with its error and optional fields
#[macro_export]
macro_rules! log_failure {
    ($what:expr, $err:expr) => {
        tracing::error!(error = %$err, "{} failed", $what);
    };
    ($what:expr, $err:expr, $($field:tt)*) => {
        tracing::error!(error = %$err, $($field)*, "{} failed", $what);
    };
}
