//! # Rust Logger Facade
//!
//! A pluggable logging facade: application code emits leveled events through
//! one API, and every registered backend renders and persists them
//! independently.
//!
//! ## Features
//!
//! - **Severity levels**: `error`, `warn`, `sys`, `req`, `res`, `info`, `debug`
//!   with an environment-derived default threshold
//! - **Dynamic backends**: add and remove backends at runtime, or load them from
//!   a declarative config through a host-supplied catalog
//! - **Failure isolation**: a failing backend never silences the others
//! - **Graceful shutdown**: concurrent flush across every backend
//!
//! ```
//! use rust_logger_facade::prelude::*;
//!
//! let logger = Logger::builder()
//!     .without_backends()
//!     .backend("memory", MemoryBackend::new())
//!     .build();
//!
//! logger.info("service started");
//! logger.req_with("GET /health", vec![FieldValue::from(200)]);
//! ```

pub mod backends;
#[cfg(feature = "log-bridge")]
pub mod bridge;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::backends::{MemoryBackend, MemoryHandle};
    #[cfg(feature = "console")]
    pub use crate::backends::ConsoleBackend;
    #[cfg(feature = "file")]
    pub use crate::backends::FileBackend;
    pub use crate::core::{
        Backend, BackendCatalog, BackendResolver, DispatchMetrics, Environment, FieldValue,
        LogEvent, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, Render, Result,
        StyledMessage, Timer, TimestampFormat,
    };
}

pub use backends::{MemoryBackend, MemoryHandle};
#[cfg(feature = "console")]
pub use backends::ConsoleBackend;
#[cfg(feature = "file")]
pub use backends::FileBackend;
pub use core::{
    Backend, BackendCatalog, BackendResolver, DispatchMetrics, Environment, FieldValue,
    LoadReport, LogEvent, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, Render,
    Result, StyledMessage, Timer, TimestampFormat,
};
