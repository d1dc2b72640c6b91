//! Internal lifecycle reporting for the facade
//!
//! The facade cannot log through its own backends (a broken backend would
//! hide its own failure), so lifecycle messages go straight to stderr.

use std::fmt;
use std::time::Duration;

/// Diagnostics mode, fixed at construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    enabled: bool,
}

impl Diagnostics {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    #[inline]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Verbose notice, only emitted in diagnostics mode
    pub fn notice(&self, args: fmt::Arguments<'_>) {
        if self.enabled {
            eprintln!("[LOGGER DEBUG] {}", args);
        }
    }

    /// Per-backend dispatch latency, only emitted in diagnostics mode
    pub fn backend_timing(&self, backend: &str, kind: &str, elapsed: Duration) {
        if self.enabled {
            eprintln!(
                "[LOGGER DEBUG] Backend '{}' handled '{}' event in {:?}",
                backend, kind, elapsed
            );
        }
    }

    /// Failures are always reported, diagnostics mode or not
    pub fn error(&self, args: fmt::Arguments<'_>) {
        eprintln!("[LOGGER ERROR] {}", args);
    }

    pub fn warning(&self, args: fmt::Arguments<'_>) {
        eprintln!("[LOGGER WARNING] {}", args);
    }
}

/// Extract a readable message from a caught panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
