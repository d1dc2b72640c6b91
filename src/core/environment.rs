//! Process environment resolved once at logger construction

use super::log_level::default_rank;
use std::env;

/// Variable holding the deployment tag (`production`, `staging`, `qa`, `test`, ...)
pub const ENV_TAG_VAR: &str = "APP_ENV";

/// Variable enabling verbose diagnostics of the facade itself
pub const DEBUG_VAR: &str = "LOGGER_DEBUG";

/// Snapshot of the environment inputs the facade depends on
///
/// Read once with [`Environment::from_process`] and then threaded through as
/// an immutable value, so nothing deeper in the facade touches `std::env`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    tag: Option<String>,
    debug_mode: bool,
}

impl Environment {
    pub fn new(tag: Option<&str>, debug_mode: bool) -> Self {
        Self {
            tag: tag.map(str::to_string),
            debug_mode,
        }
    }

    /// Read [`ENV_TAG_VAR`] and [`DEBUG_VAR`] from the process environment
    pub fn from_process() -> Self {
        let tag = env::var(ENV_TAG_VAR).ok().filter(|t| !t.is_empty());
        let debug_mode = env::var(DEBUG_VAR)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);
        Self { tag, debug_mode }
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Threshold used when no explicit level is configured
    pub fn default_rank(&self) -> u8 {
        default_rank(self.tag())
    }
}

/// Any non-empty value other than an explicit "off" spelling counts as enabled
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !matches!(
            value.to_ascii_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        for value in ["1", "true", "yes", "on", "*", "facade"] {
            assert!(is_truthy(value), "{} should enable diagnostics", value);
        }
        for value in ["", "  ", "0", "false", "FALSE", "no", "off"] {
            assert!(!is_truthy(value), "{:?} should not enable diagnostics", value);
        }
    }

    #[test]
    fn test_default_rank_follows_tag() {
        assert_eq!(Environment::new(Some("production"), false).default_rank(), 3);
        assert_eq!(Environment::new(Some("qa"), false).default_rank(), 5);
        assert_eq!(Environment::new(None, false).default_rank(), 6);
    }

    #[test]
    fn test_explicit_environment() {
        let env = Environment::new(Some("test"), true);
        assert_eq!(env.tag(), Some("test"));
        assert!(env.debug_mode());
        assert_eq!(env.default_rank(), 1);
    }
}
