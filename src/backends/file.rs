//! File backend implementation

use crate::core::{Backend, LogEvent, LoggerError, Result, TimestampFormat};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Log file used when the config names none
pub const DEFAULT_LOGFILE: &str = "./logs/app.log";

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FileConfig {
    logfile: PathBuf,
    timestamp_format: TimestampFormat,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            logfile: PathBuf::from(DEFAULT_LOGFILE),
            timestamp_format: TimestampFormat::default(),
        }
    }
}

/// Appends plain (undecorated) lines to a log file
pub struct FileBackend {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    timestamp_format: TimestampFormat,
}

impl FileBackend {
    /// Open `path` for appending, creating missing parent directories
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "creating log directory",
                    format!("cannot create '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_backend(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// Build from a `{ logfile, timestamp_format }` config
    pub fn from_config(config: &Value) -> Result<Self> {
        let config: FileConfig = if config.is_null() {
            FileConfig::default()
        } else {
            serde_json::from_value(config.clone())
                .map_err(|e| LoggerError::config("FileBackend", e.to_string()))?
        };
        Ok(Self::new(config.logfile)?.with_timestamp_format(config.timestamp_format))
    }

    /// Set the timestamp format for this backend
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_logger_facade::backends::FileBackend;
    /// use rust_logger_facade::TimestampFormat;
    ///
    /// let backend = FileBackend::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self, event: &LogEvent) -> String {
        let mut output = format!(
            "{} [{}] {}",
            self.timestamp_format.format(&event.time),
            event.kind.to_uppercase(),
            event.msg
        );
        if !event.data.is_empty() {
            output.push_str(" | ");
            output.push_str(&event.format_data());
        }
        output.push('\n');
        output
    }

    fn flush_writer(&self) -> Result<()> {
        self.writer.lock().flush().map_err(|e| {
            LoggerError::file_backend(self.path.display().to_string(), e.to_string())
        })
    }
}

#[async_trait]
impl Backend for FileBackend {
    fn log(&self, event: &LogEvent) -> Result<()> {
        let output = self.format(event);
        self.writer.lock().write_all(output.as_bytes())?;
        Ok(())
    }

    fn can_flush(&self) -> bool {
        true
    }

    async fn flush(&self) -> Result<()> {
        self.flush_writer()
    }
}

impl Drop for FileBackend {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.writer.get_mut().flush();
    }
}
