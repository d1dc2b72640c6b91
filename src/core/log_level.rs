//! Log level table
//!
//! Every level maps to a severity rank; lower ranks are more severe. An event
//! passes the threshold when its rank is at most the threshold.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fallback rank when the environment tag is absent or unknown (`info`)
pub const FALLBACK_RANK: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    Sys = 3,
    Req = 4,
    Res = 5,
    Info = 6,
    Debug = 7,
}

impl LogLevel {
    /// All levels, most severe first
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Sys,
        LogLevel::Req,
        LogLevel::Res,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Sys => "sys",
            LogLevel::Req => "req",
            LogLevel::Res => "res",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.rank() == rank)
    }

    /// Whether an event at this level passes `threshold`
    #[inline]
    pub const fn passes(self, threshold: u8) -> bool {
        self.rank() <= threshold
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Error => Red,
            LogLevel::Warn => Yellow,
            LogLevel::Sys => Magenta,
            LogLevel::Req => Cyan,
            LogLevel::Res => Blue,
            LogLevel::Info => Green,
            LogLevel::Debug => BrightBlack,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "sys" => Ok(LogLevel::Sys),
            "req" => Ok(LogLevel::Req),
            "res" => Ok(LogLevel::Res),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}

/// Rank of a level name, failing with `InvalidLevel` for unknown names
pub fn rank_of(name: &str) -> Result<u8> {
    name.parse::<LogLevel>().map(LogLevel::rank)
}

/// Name of the level holding `rank`, if any
pub fn name_of(rank: u8) -> Option<&'static str> {
    LogLevel::from_rank(rank).map(LogLevel::name)
}

/// Default threshold for an environment tag
///
/// `production` keeps `sys` and above, `staging`/`qa` keep `res` and above,
/// `test` keeps only errors; anything else falls back to `info`.
pub fn default_rank(environment_tag: Option<&str>) -> u8 {
    match environment_tag {
        Some("production") => LogLevel::Sys.rank(),
        Some("staging") | Some("qa") => LogLevel::Res.rank(),
        Some("test") => LogLevel::Error.rank(),
        _ => FALLBACK_RANK,
    }
}
