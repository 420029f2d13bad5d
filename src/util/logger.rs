use std::path::PathBuf;

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Owns the background writer guards; drop it only at shutdown or buffered
/// file logs are lost.
pub struct Logger {
    pub guards: Vec<WorkerGuard>,
}

impl Logger {
    /// Console logging always; daily-rolling plain and JSON files when `LOG_DIR` is set.
    ///
    /// - RUST_LOG: console filter (defaults to `info,assignment_backend=debug`)
    /// - LOG_DIR: directory for file logs (disabled when unset)
    /// - FILE_LOG_LEVEL: file filter (defaults to `info`)
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let console_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,assignment_backend=debug"));

        let console = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(true)
            .with_filter(console_filter);

        let Some(log_dir) = std::env::var_os("LOG_DIR").map(PathBuf::from) else {
            tracing_subscriber::registry().with(console).try_init()?;
            return Ok(Logger { guards: Vec::new() });
        };

        std::fs::create_dir_all(&log_dir)?;
        let file_log_level = std::env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let (plain_writer, plain_guard) = non_blocking(rolling::daily(&log_dir, "assignment-backend.log"));
        let (json_writer, json_guard) = non_blocking(rolling::daily(&log_dir, "assignment-backend.json"));

        tracing_subscriber::registry()
            .with(console)
            .with(
                fmt::layer()
                    .with_writer(plain_writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(json_writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .try_init()?;

        Ok(Logger { guards: vec![plain_guard, json_guard] })
    }
}
