//! Core facade types and traits

pub mod backend;
pub mod config;
pub mod diagnostics;
pub mod dispatcher;
pub mod environment;
pub mod error;
pub mod loader;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod render;
pub mod timer;
pub mod timestamp;

pub use backend::Backend;
pub use config::LoggerConfig;
pub use diagnostics::Diagnostics;
pub use dispatcher::{Dispatcher, NO_MESSAGE};
pub use environment::{Environment, DEBUG_VAR, ENV_TAG_VAR};
pub use error::{FlushFailure, LoggerError, Result};
pub use loader::{
    canonical_id, BackendCatalog, BackendFactory, BackendLoader, BackendResolver, LoadReport,
};
pub use log_event::{facade_uptime, FieldValue, LogEvent};
pub use log_level::{default_rank, name_of, rank_of, LogLevel};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::DispatchMetrics;
pub use registry::BackendRegistry;
pub use render::{strip_ansi, Render, Renderings, StyledMessage};
pub use timer::Timer;
pub use timestamp::TimestampFormat;
