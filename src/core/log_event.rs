//! Log event structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static FACADE_START: OnceLock<Instant> = OnceLock::new();

/// Start the uptime clock if nothing has yet; called by every logger build
pub(crate) fn start_facade_clock() {
    FACADE_START.get_or_init(Instant::now);
}

/// Time since the first [`Logger`](crate::Logger) of this process was built
///
/// This is facade uptime, not OS process uptime: std exposes no portable
/// process start time, so the clock starts with the first logger build (or
/// the first event, whichever comes first).
pub fn facade_uptime() -> Duration {
    FACADE_START.get_or_init(Instant::now).elapsed()
}

/// Extra argument attached to a log event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Json(serde_json::Value),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Json(v) => write!(f, "{}", v),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Json(v) => v.clone(),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => FieldValue::Null,
            other => FieldValue::Json(other),
        }
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// One logical log event, shared by reference with every backend
///
/// Built once per dispatch after the level filter; `time` and `uptime` are
/// captured once so every backend sees the same values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub msg: String,
    pub cmsg: String,
    pub data: Vec<FieldValue>,
    pub time: DateTime<Utc>,
    /// Facade uptime at dispatch, see [`facade_uptime`]
    #[serde(serialize_with = "serialize_uptime")]
    pub uptime: Duration,
}

fn serialize_uptime<S: Serializer>(uptime: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(uptime.as_secs_f64())
}

impl LogEvent {
    pub fn new(kind: impl Into<String>, msg: String, cmsg: String, data: Vec<FieldValue>) -> Self {
        Self {
            kind: kind.into(),
            msg,
            cmsg,
            data,
            time: Utc::now(),
            uptime: facade_uptime(),
        }
    }

    /// Extra arguments joined by spaces, empty when there are none
    pub fn format_data(&self) -> String {
        self.data
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_conversions() {
        assert_eq!(FieldValue::from("a"), FieldValue::String("a".to_string()));
        assert_eq!(FieldValue::from(7), FieldValue::Int(7));
        assert_eq!(FieldValue::from(None::<i32>), FieldValue::Null);
        assert_eq!(
            FieldValue::from(serde_json::json!({"k": 1})).to_string(),
            r#"{"k":1}"#
        );
    }

    #[test]
    fn test_event_format_data() {
        let event = LogEvent::new(
            "info",
            "hello".to_string(),
            "hello".to_string(),
            vec![FieldValue::from("user"), FieldValue::from(42), FieldValue::from(true)],
        );
        assert_eq!(event.format_data(), "user 42 true");
    }

    #[test]
    fn test_event_json_shape() {
        let event = LogEvent::new("req", "GET /".to_string(), "GET /".to_string(), vec![]);
        let json: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "req");
        assert_eq!(json["msg"], "GET /");
        assert!(json["uptime"].is_f64());
        assert!(json["time"].is_string());
    }

    #[test]
    fn test_event_uptime_counts_from_facade_start() {
        start_facade_clock();
        std::thread::sleep(Duration::from_millis(10));
        let before = facade_uptime();
        let event = LogEvent::new("info", "x".to_string(), "x".to_string(), vec![]);
        assert!(before >= Duration::from_millis(10));
        assert!(event.uptime >= before);
    }

    #[test]
    fn test_uptime_is_monotonic() {
        start_facade_clock();
        let first = facade_uptime();
        let second = facade_uptime();
        assert!(second >= first);
    }
}
