//! Timestamp rendering for backends that print event times

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Write};

/// How a backend renders [`LogEvent::time`](crate::core::LogEvent)
///
/// In backend configs this is a string: `"iso8601"`, `"rfc3339"`,
/// `"unix_millis"`, or any other value taken as a strftime pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// `2025-01-08T10:30:45.123+00:00`
    Rfc3339,

    /// `1736332245123`
    UnixMillis,

    /// strftime pattern, e.g. `%d/%b/%Y:%H:%M:%S %z`
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => {
                datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, false)
            }
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(pattern) => {
                let mut out = String::new();
                // invalid strftime patterns surface as fmt errors
                if write!(out, "{}", datetime.format(pattern)).is_err() {
                    return datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
                }
                out
            }
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "iso8601" | "iso" => TimestampFormat::Iso8601,
            "rfc3339" => TimestampFormat::Rfc3339,
            "unix_millis" | "unix-millis" | "epoch" => TimestampFormat::UnixMillis,
            _ => TimestampFormat::Custom(value.to_string()),
        }
    }

    fn as_config_str(&self) -> &str {
        match self {
            TimestampFormat::Iso8601 => "iso8601",
            TimestampFormat::Rfc3339 => "rfc3339",
            TimestampFormat::UnixMillis => "unix_millis",
            TimestampFormat::Custom(pattern) => pattern,
        }
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_config_str())
    }
}

impl Serialize for TimestampFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_config_str())
    }
}

impl<'de> Deserialize<'de> for TimestampFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(TimestampFormat::parse(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap()
            + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn test_builtin_formats() {
        let time = sample();
        assert_eq!(TimestampFormat::Iso8601.format(&time), "2025-01-08T10:30:45.123Z");
        assert_eq!(
            TimestampFormat::Rfc3339.format(&time),
            "2025-01-08T10:30:45.123+00:00"
        );
        assert_eq!(TimestampFormat::UnixMillis.format(&time), "1736332245123");
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::parse("%Y/%m/%d");
        assert_eq!(format, TimestampFormat::Custom("%Y/%m/%d".to_string()));
        assert_eq!(format.format(&sample()), "2025/01/08");
    }

    #[test]
    fn test_invalid_custom_format_falls_back() {
        let format = TimestampFormat::Custom("%Q%".to_string());
        assert_eq!(format.format(&sample()), "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_config_string_roundtrip() {
        let parsed: TimestampFormat = serde_json::from_str(r#""RFC3339""#).unwrap();
        assert_eq!(parsed, TimestampFormat::Rfc3339);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#""rfc3339""#);
    }
}
