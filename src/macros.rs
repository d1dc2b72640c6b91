//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Formatting only
//! happens when the level passes the logger's threshold.
//!
//! # Examples
//!
//! ```
//! use rust_logger_facade::prelude::*;
//! use rust_logger_facade::{info, req};
//!
//! let logger = Logger::builder().without_backends().build();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! req!(logger, "{} {}", "GET", "/health");
//! ```

/// Log a message of any kind with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = Logger::builder().without_backends().build();
/// use rust_logger_facade::log;
/// log!(logger, "audit", "Simple message");
/// log!(logger, "error", "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $kind:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let kind: &str = $kind;
        if logger.is_enabled(kind) {
            let message = format!($($arg)+);
            logger.log(kind, Some(&message), ::std::vec::Vec::new());
        }
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = Logger::builder().without_backends().build();
/// # logger.set_level("debug").unwrap();
/// use rust_logger_facade::debug;
/// debug!(logger, "Cache miss for key {}", "user:42");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug.name(), $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = Logger::builder().without_backends().build();
/// use rust_logger_facade::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info.name(), $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = Logger::builder().without_backends().build();
/// use rust_logger_facade::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn.name(), $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = Logger::builder().without_backends().build();
/// use rust_logger_facade::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error.name(), $($arg)+)
    };
}

/// Log an incoming-request message.
///
/// # Examples
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = Logger::builder().without_backends().build();
/// use rust_logger_facade::req;
/// req!(logger, "{} {}", "POST", "/users");
/// ```
#[macro_export]
macro_rules! req {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Req.name(), $($arg)+)
    };
}

/// Log an outgoing-response message.
///
/// # Examples
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = Logger::builder().without_backends().build();
/// use rust_logger_facade::res;
/// res!(logger, "{} in {}ms", 201, 14);
/// ```
#[macro_export]
macro_rules! res {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Res.name(), $($arg)+)
    };
}

/// Log a system lifecycle message.
///
/// # Examples
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = Logger::builder().without_backends().build();
/// use rust_logger_facade::sys;
/// sys!(logger, "Worker {} started", 3);
/// ```
#[macro_export]
macro_rules! sys {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Sys.name(), $($arg)+)
    };
}
