//! Bridge from the `log` crate into a [`Logger`]
//!
//! Libraries logging through `log::info!` and friends reach the facade's
//! backends once [`install`] has registered the bridge as the global logger.
//! `log::Level::Trace` has no counterpart and is delivered as `debug`.

use crate::core::{FieldValue, LogLevel, Logger, LoggerError, Result};
use std::sync::Arc;

/// `log::Log` implementation forwarding records to a shared [`Logger`]
pub struct LogBridge {
    logger: Arc<Logger>,
}

impl LogBridge {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    pub fn level_for(level: log::Level) -> LogLevel {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        Self::level_for(metadata.level()).passes(self.logger.threshold())
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        let data = vec![FieldValue::from(record.target())];
        self.logger.log(
            Self::level_for(record.level()).name(),
            Some(&message),
            data,
        );
    }

    fn flush(&self) {
        if let Err(e) = futures::executor::block_on(self.logger.flush()) {
            eprintln!("[LOGGER ERROR] Failed to flush through log bridge: {}", e);
        }
    }
}

/// Install `logger` as the global `log` logger
///
/// Fails if another global logger is already installed.
pub fn install(logger: Arc<Logger>) -> Result<()> {
    log::set_boxed_logger(Box::new(LogBridge::new(logger)))
        .map_err(|e| LoggerError::other(format!("cannot install log bridge: {}", e)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
