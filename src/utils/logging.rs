use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "portfolio-relay.log";

/// Picks the log filter: a set `RUST_LOG` wins over the configured level, and
/// anything unparseable falls back to "info".
fn build_filter(rust_log: Option<&str>, log_level: &str) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        match EnvFilter::try_new(directives) {
            Ok(f) => return f,
            Err(e) => eprintln!("Ignoring invalid RUST_LOG '{}': {}", directives, e),
        }
    }

    EnvFilter::try_new(log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level '{}', defaulting to 'info'", log_level);
        EnvFilter::new("info")
    })
}

/// Installs the global subscriber.
///
/// Request and provider events always go to stdout. With `with_file` they are
/// also written, without ANSI colors, to daily rotating files under `logs/`
/// through a non-blocking writer. The returned guard flushes that writer and
/// must be held for the life of the server.
pub fn init_logging(log_level: &str, with_file: bool) -> Option<WorkerGuard> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(rust_log.as_deref(), log_level);

    let stdout_layer = fmt::layer().with_target(true).with_line_number(true);

    let (file_layer, guard) = if with_file {
        let appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_ansi(false)
            .with_line_number(true)
            .with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
