//! Logging backend.
//!
//! Provides a `log::Log` implementation that writes timestamped records to
//! stderr, keeping stdout free for command output.

use crate::error::{AppError, AppResult};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Parse a level name from configuration, falling back to `Info`.
///
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Logger writing records at or above `level` to stderr.
///
pub struct PortalLogger {
    level: LevelFilter,
}

impl PortalLogger {
    pub fn new(level: LevelFilter) -> Self {
        PortalLogger { level }
    }
}

impl Log for PortalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(std::io::stderr(), "{}", format_log(record));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the logger as the global `log` backend.
///
pub fn init(level: LevelFilter) -> AppResult<()> {
    log::set_boxed_logger(Box::new(PortalLogger::new(level)))
        .map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}
