//! Stopwatch handles, optionally reporting through the logger

use super::log_level::LogLevel;
use super::logger::Logger;
use std::time::{Duration, Instant};

/// Placeholder in a timer label replaced by the elapsed time
pub const ELAPSED_PLACEHOLDER: &str = "%s";

/// Stopwatch started by [`Logger::timer`] or [`Timer::start`]
///
/// A labeled timer emits an `info` event each time it is logged or stopped.
///
/// # Example
///
/// ```
/// use rust_logger_facade::prelude::*;
///
/// let logger = Logger::builder().without_backends().build();
///
/// let timer = logger.timer(Some("cache warmup took %s"));
/// // ... work ...
/// let elapsed = timer.stop(); // emits "cache warmup took 0.042ms" at info
/// println!("{:?}", elapsed);
/// ```
#[must_use = "a timer measures nothing unless it is stopped or logged"]
pub struct Timer<'a> {
    started: Instant,
    label: Option<String>,
    logger: Option<&'a Logger>,
}

impl Timer<'static> {
    /// Freestanding stopwatch, not attached to any logger
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            label: None,
            logger: None,
        }
    }
}

impl<'a> Timer<'a> {
    pub(crate) fn attached(logger: &'a Logger, label: Option<&str>) -> Self {
        Self {
            started: Instant::now(),
            label: label.map(str::to_string),
            logger: Some(logger),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Emit the current elapsed time without stopping
    pub fn log(&self) -> Duration {
        let elapsed = self.elapsed();
        self.emit(elapsed);
        elapsed
    }

    /// Stop the timer, emitting once when labeled
    pub fn stop(self) -> Duration {
        let elapsed = self.elapsed();
        self.emit(elapsed);
        elapsed
    }

    fn emit(&self, elapsed: Duration) {
        if let (Some(logger), Some(label)) = (self.logger, self.label.as_deref()) {
            let message = format_label(label, elapsed);
            logger.log(LogLevel::Info.name(), Some(&message), Vec::new());
        }
    }
}

/// Milliseconds with three decimals, e.g. `12.345ms`
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.3}ms", elapsed.as_secs_f64() * 1000.0)
}

/// Substitute the elapsed time into `label`
///
/// The first `%s` is replaced; a label without one gets the value appended
/// after a space.
pub fn format_label(label: &str, elapsed: Duration) -> String {
    let value = format_elapsed(elapsed);
    if label.contains(ELAPSED_PLACEHOLDER) {
        label.replacen(ELAPSED_PLACEHOLDER, &value, 1)
    } else {
        format!("{} {}", label, value)
    }
}
