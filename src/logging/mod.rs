/// Structured logging setup: console and/or an append-only file sink under
/// `<log_dir>/log.txt`, toggled by `[logging]` in the config file. Built on
/// `tracing` + `tracing-subscriber`, the same stack the teacher crate used,
/// extended with `tracing-appender` for the file sink the spec requires.
use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::core::CrawlError;

/// Must be kept alive for the lifetime of the process — dropping it stops
/// the background writer thread that flushes the file sink.
pub struct LoggingHandle {
    _file_guard: Option<WorkerGuard>,
}

pub fn init(config: &LoggingConfig) -> Result<LoggingHandle, CrawlError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    let file_guard = if config.file {
        fs::create_dir_all(&config.log_dir)
            .map_err(|e| CrawlError::Config(format!("cannot create {}: {e}", config.log_dir)))?;
        let file_appender = tracing_appender::rolling::never(&config.log_dir, "log.txt");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false);

        if config.console {
            registry
                .with(tracing_subscriber::fmt::layer())
                .with(file_layer)
                .init();
        } else {
            registry.with(file_layer).init();
        }
        Some(guard)
    } else {
        if config.console {
            registry.with(tracing_subscriber::fmt::layer()).init();
        } else {
            registry.init();
        }
        None
    };

    Ok(LoggingHandle {
        _file_guard: file_guard,
    })
}
