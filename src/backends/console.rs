//! Console backend implementation

use crate::core::{Backend, LogEvent, LogLevel, LoggerError, Result, TimestampFormat};
use colored::Colorize;
use serde::Deserialize;
use serde_json::Value;

/// Line layout used by [`ConsoleBackend`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleTemplate {
    /// `[<time> ]<TYPE> <message> <data...>`
    #[default]
    Default,
    /// Message and data only
    Simple,
    /// One JSON object per event
    Json,
}

impl ConsoleTemplate {
    fn parse(name: &str) -> Result<Self> {
        match name {
            "default" => Ok(ConsoleTemplate::Default),
            "simple" => Ok(ConsoleTemplate::Simple),
            "json" => Ok(ConsoleTemplate::Json),
            other => Err(LoggerError::config(
                "ConsoleBackend",
                format!("unknown template '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ConsoleConfig {
    colors: bool,
    template: String,
    timestamp: bool,
    timestamp_format: TimestampFormat,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            colors: true,
            template: "default".to_string(),
            timestamp: false,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

pub struct ConsoleBackend {
    use_colors: bool,
    template: ConsoleTemplate,
    timestamp: Option<TimestampFormat>,
}

impl ConsoleBackend {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            template: ConsoleTemplate::Default,
            timestamp: None,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Build from a `{ colors, template, timestamp, timestamp_format }` config
    ///
    /// `null` yields the defaults.
    pub fn from_config(config: &Value) -> Result<Self> {
        let config: ConsoleConfig = if config.is_null() {
            ConsoleConfig::default()
        } else {
            serde_json::from_value(config.clone())
                .map_err(|e| LoggerError::config("ConsoleBackend", e.to_string()))?
        };

        Ok(Self {
            use_colors: config.colors,
            template: ConsoleTemplate::parse(&config.template)?,
            timestamp: config.timestamp.then_some(config.timestamp_format),
        })
    }

    #[must_use]
    pub fn with_template(mut self, template: ConsoleTemplate) -> Self {
        self.template = template;
        self
    }

    /// Prefix each line with the event time
    #[must_use]
    pub fn with_timestamp(mut self, format: TimestampFormat) -> Self {
        self.timestamp = Some(format);
        self
    }

    /// Render one event as a console line
    pub fn format(&self, event: &LogEvent) -> String {
        match self.template {
            ConsoleTemplate::Default => self.format_default(event),
            ConsoleTemplate::Simple => with_data(self.message(event).to_string(), event),
            ConsoleTemplate::Json => event.to_json().unwrap_or_default(),
        }
    }

    fn message<'e>(&self, event: &'e LogEvent) -> &'e str {
        if self.use_colors {
            &event.cmsg
        } else {
            &event.msg
        }
    }

    fn format_default(&self, event: &LogEvent) -> String {
        let tag = event.kind.to_uppercase();
        let tag = match (self.use_colors, event.kind.parse::<LogLevel>()) {
            (true, Ok(level)) => tag.color(level.color_code()).bold().to_string(),
            _ => tag,
        };

        let line = match &self.timestamp {
            Some(format) => format!(
                "[{}] {} {}",
                format.format(&event.time),
                tag,
                self.message(event)
            ),
            None => format!("{} {}", tag, self.message(event)),
        };
        with_data(line, event)
    }
}

fn with_data(mut line: String, event: &LogEvent) -> String {
    if !event.data.is_empty() {
        line.push(' ');
        line.push_str(&event.format_data());
    }
    line
}

impl Default for ConsoleBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for ConsoleBackend {
    fn log(&self, event: &LogEvent) -> Result<()> {
        let output = self.format(event);

        // Errors go to stderr, everything else to stdout
        if event.kind.eq_ignore_ascii_case(LogLevel::Error.name()) {
            eprintln!("{}", output);
        } else {
            println!("{}", output);
        }
        Ok(())
    }
}
