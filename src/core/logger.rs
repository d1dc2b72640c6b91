//! Logger facade: the public API composing level table, registry and dispatcher

use super::{
    backend::Backend,
    config::LoggerConfig,
    diagnostics::Diagnostics,
    dispatcher::Dispatcher,
    environment::Environment,
    error::Result,
    loader::{BackendCatalog, BackendLoader, BackendResolver, LoadReport},
    log_event::{start_facade_clock, FieldValue},
    log_level::{name_of, rank_of, LogLevel},
    metrics::DispatchMetrics,
    render::Render,
    timer::Timer,
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Leveled logging facade over a dynamic set of backends
///
/// # Example
///
/// ```
/// use rust_logger_facade::prelude::*;
///
/// let memory = MemoryBackend::new();
/// let events = memory.handle();
///
/// let logger = Logger::builder()
///     .without_backends()
///     .level(LogLevel::Sys)
///     .backend("memory", memory)
///     .build();
///
/// logger.debug("filtered out");
/// logger.error("delivered");
///
/// assert_eq!(events.kinds(), vec!["error"]);
/// ```
pub struct Logger {
    dispatcher: Dispatcher,
    environment: Environment,
    resolver: Arc<dyn BackendResolver>,
}

macro_rules! level_methods {
    ($($level:ident => $name:ident, $with:ident;)*) => {
        $(
            #[doc = concat!("Log a message at `", stringify!($name), "` level")]
            #[inline]
            pub fn $name(&self, message: impl Render) {
                self.log(LogLevel::$level.name(), Some(&message), Vec::new());
            }

            #[doc = concat!("Log a message with extra data at `", stringify!($name), "` level")]
            #[inline]
            pub fn $with(&self, message: impl Render, data: Vec<FieldValue>) {
                self.log(LogLevel::$level.name(), Some(&message), data);
            }
        )*
    };
}

impl Logger {
    /// Logger configured from the process environment with the default backends
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Logger built from `config` and the process environment
    #[must_use]
    pub fn from_config(config: LoggerConfig) -> Self {
        Self::builder().config(config).build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Set the threshold to the rank of `name`
    ///
    /// Fails with `InvalidLevel` for an unknown name, leaving the threshold
    /// untouched.
    pub fn set_level(&self, name: &str) -> Result<()> {
        let rank = rank_of(name)?;
        self.dispatcher.set_threshold(rank);
        self.dispatcher
            .diagnostics()
            .notice(format_args!("Log level set to '{}' ({})", name, rank));
        Ok(())
    }

    /// Reset the threshold to the environment default
    pub fn reset_level(&self) {
        let rank = self.environment.default_rank();
        self.dispatcher.set_threshold(rank);
        self.dispatcher.diagnostics().notice(format_args!(
            "Log level reset to environment default ({})",
            rank
        ));
    }

    /// Set a raw threshold rank
    pub fn set_threshold(&self, rank: u8) {
        self.dispatcher.set_threshold(rank);
    }

    /// Name of the current threshold, `None` for a rank without a level
    pub fn get_level(&self) -> Option<&'static str> {
        name_of(self.dispatcher.threshold())
    }

    pub fn threshold(&self) -> u8 {
        self.dispatcher.threshold()
    }

    /// Whether an event of `kind` would currently reach the backends
    pub fn is_enabled(&self, kind: &str) -> bool {
        self.dispatcher.would_emit(kind)
    }

    /// Construct and register a backend unless `name` is taken
    ///
    /// Returns `Ok(false)` without invoking `factory` when `name` is already
    /// registered.
    pub fn add_logger<F>(&self, name: &str, factory: F, config: &Value) -> Result<bool>
    where
        F: FnOnce(&Value) -> Result<Arc<dyn Backend>>,
    {
        self.dispatcher.registry().add(name, factory, config)
    }

    /// Register an already constructed backend unless `name` is taken
    pub fn add_backend<B: Backend + 'static>(&self, name: &str, backend: B) -> bool {
        self.dispatcher.registry().insert(name, Arc::new(backend))
    }

    /// Resolve and register backends through this logger's resolver
    pub fn load_backends(&self, config: &Map<String, Value>) -> LoadReport {
        BackendLoader::new(self.resolver.as_ref(), self.dispatcher.diagnostics())
            .load(config, self.dispatcher.registry())
    }

    pub fn remove_logger(&self, name: &str) -> bool {
        self.dispatcher.registry().remove(name)
    }

    pub fn has_logger(&self, name: &str) -> bool {
        self.dispatcher.registry().has(name)
    }

    pub fn logger_names(&self) -> Vec<String> {
        self.dispatcher.registry().names()
    }

    /// Dispatch an event of any kind
    ///
    /// Recognized levels are filtered by the threshold; other kinds always
    /// pass. Backend failures are reported and never reach the caller.
    pub fn log(&self, kind: &str, message: Option<&dyn Render>, data: Vec<FieldValue>) {
        self.dispatcher.dispatch(kind, message, data);
    }

    level_methods! {
        Debug => debug, debug_with;
        Info => info, info_with;
        Warn => warn, warn_with;
        Error => error, error_with;
        Req => req, req_with;
        Res => res, res_with;
        Sys => sys, sys_with;
    }

    /// Flush every backend with the flush capability, concurrently
    ///
    /// Completes once all flushes have completed. Fails with `BackendFlush`
    /// if any of them failed.
    pub async fn flush(&self) -> Result<()> {
        self.dispatcher.flush().await
    }

    /// Start a stopwatch; with a label, stopping or logging it emits an
    /// `info` event with the elapsed time substituted for `%s`
    pub fn timer(&self, label: Option<&str>) -> Timer<'_> {
        Timer::attached(self, label)
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        self.dispatcher.metrics()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn diagnostics_enabled(&self) -> bool {
        self.dispatcher.diagnostics().enabled()
    }

    /// Flush every backend, then unregister them all
    ///
    /// Backends are removed even when the flush fails; the flush result is
    /// returned.
    pub async fn shutdown(&self) -> Result<()> {
        let result = self.dispatcher.flush().await;
        let removed = self.dispatcher.registry().clear();
        self.dispatcher.diagnostics().notice(format_args!(
            "Shut down {} backend(s)",
            removed.len()
        ));
        result
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let metrics = self.dispatcher.metrics();
        if metrics.backend_failures() > 0 {
            self.dispatcher.diagnostics().warning(format_args!(
                "Logger shutting down after {} backend failure(s) across {} event(s)",
                metrics.backend_failures(),
                metrics.events_dispatched()
            ));
        }
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// # Example
/// ```
/// use rust_logger_facade::prelude::*;
/// use serde_json::json;
///
/// let logger = Logger::builder()
///     .environment(Environment::new(Some("production"), false))
///     .config(LoggerConfig::default().with_backend("memory", json!({ "capacity": 100 })))
///     .build();
///
/// assert_eq!(logger.get_level(), Some("sys"));
/// assert!(logger.has_logger("memory"));
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    environment: Option<Environment>,
    resolver: Option<Arc<dyn BackendResolver>>,
    backends: Vec<(String, Arc<dyn Backend>)>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            environment: None,
            resolver: None,
            backends: Vec::new(),
        }
    }

    /// Replace the whole construction config
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an explicit environment instead of reading the process environment
    #[must_use = "builder methods return a new value"]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Resolver for configured backends; defaults to the built-in catalog
    #[must_use = "builder methods return a new value"]
    pub fn resolver<R: BackendResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Arc::new(resolver) as Arc<dyn BackendResolver>);
        self
    }

    /// Initial threshold rank
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, rank: u8) -> Self {
        self.config.level = Some(rank);
        self
    }

    /// Initial threshold as a level
    #[must_use = "builder methods return a new value"]
    pub fn level(self, level: LogLevel) -> Self {
        self.threshold(level.rank())
    }

    #[must_use = "builder methods return a new value"]
    pub fn debug_mode(mut self, enabled: bool) -> Self {
        self.config.debug_mode = Some(enabled);
        self
    }

    /// Load no configured backends, not even the defaults
    #[must_use = "builder methods return a new value"]
    pub fn without_backends(mut self) -> Self {
        self.config.logger = Some(Map::new());
        self
    }

    /// Register an already constructed backend after the configured ones
    #[must_use = "builder methods return a new value"]
    pub fn backend<B: Backend + 'static>(mut self, name: impl Into<String>, backend: B) -> Self {
        self.backends
            .push((name.into(), Arc::new(backend) as Arc<dyn Backend>));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        self.build_with_report().0
    }

    /// Build the Logger, also returning what happened to each configured backend
    pub fn build_with_report(self) -> (Logger, LoadReport) {
        start_facade_clock();

        let environment = self.environment.unwrap_or_else(Environment::from_process);
        let diagnostics = Diagnostics::new(
            self.config
                .debug_mode
                .unwrap_or_else(|| environment.debug_mode()),
        );
        let threshold = self
            .config
            .level
            .unwrap_or_else(|| environment.default_rank());
        let resolver = self
            .resolver
            .unwrap_or_else(|| Arc::new(BackendCatalog::with_builtins()) as Arc<dyn BackendResolver>);

        let logger = Logger {
            dispatcher: Dispatcher::new(threshold, diagnostics),
            environment,
            resolver,
        };
        diagnostics.notice(format_args!(
            "Logger starting with threshold {} (environment {:?})",
            threshold,
            logger.environment.tag()
        ));

        let report = logger.load_backends(&self.config.backends());
        for (name, backend) in self.backends {
            logger.dispatcher.registry().insert(&name, backend);
        }

        (logger, report)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryBackend;
    use crate::core::error::LoggerError;
    use serde_json::json;

    fn test_logger(level: LogLevel) -> (Logger, crate::backends::MemoryHandle) {
        let memory = MemoryBackend::new();
        let handle = memory.handle();
        let logger = Logger::builder()
            .environment(Environment::new(None, false))
            .without_backends()
            .level(level)
            .backend("memory", memory)
            .build();
        (logger, handle)
    }

    #[test]
    fn test_builder_defaults_from_environment() {
        let logger = Logger::builder()
            .environment(Environment::new(Some("staging"), true))
            .without_backends()
            .build();

        assert_eq!(logger.threshold(), 5);
        assert_eq!(logger.get_level(), Some("res"));
        assert!(logger.diagnostics_enabled());
    }

    #[test]
    fn test_config_overrides_environment() {
        let logger = Logger::builder()
            .environment(Environment::new(Some("production"), true))
            .config(LoggerConfig::without_backends().with_level(7).with_debug_mode(false))
            .build();

        assert_eq!(logger.get_level(), Some("debug"));
        assert!(!logger.diagnostics_enabled());
    }

    #[test]
    fn test_set_level_and_reset() {
        let (logger, _) = test_logger(LogLevel::Info);

        logger.set_level("warn").unwrap();
        assert_eq!(logger.threshold(), 2);

        let err = logger.set_level("loud").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));
        assert_eq!(logger.threshold(), 2, "invalid level must not change threshold");

        logger.reset_level();
        assert_eq!(logger.get_level(), Some("info"));
    }

    #[test]
    fn test_raw_threshold_without_name() {
        let (logger, _) = test_logger(LogLevel::Info);
        logger.set_threshold(0);
        assert_eq!(logger.get_level(), None);
        assert!(!logger.is_enabled("error"));
        assert!(logger.is_enabled("custom"));
    }

    #[test]
    fn test_level_methods_bind_kind() {
        let (logger, events) = test_logger(LogLevel::Debug);

        logger.debug("d");
        logger.info("i");
        logger.warn("w");
        logger.error("e");
        logger.req("rq");
        logger.res("rs");
        logger.sys("s");

        assert_eq!(
            events.kinds(),
            vec!["debug", "info", "warn", "error", "req", "res", "sys"]
        );
    }

    #[test]
    fn test_with_data() {
        let (logger, events) = test_logger(LogLevel::Info);
        logger.info_with("user created", vec![FieldValue::from("alice"), FieldValue::from(3)]);

        let event = &events.events()[0];
        assert_eq!(event.msg, "user created");
        assert_eq!(event.data.len(), 2);
    }

    #[test]
    fn test_add_logger_is_idempotent() {
        let (logger, events) = test_logger(LogLevel::Info);

        let added = logger
            .add_logger(
                "memory",
                |_| Ok(Arc::new(MemoryBackend::new()) as Arc<dyn Backend>),
                &json!({}),
            )
            .unwrap();
        assert!(!added);

        logger.info("still the original");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_factory_can_log_through_logger() {
        let (logger, events) = test_logger(LogLevel::Info);
        let logger = Arc::new(logger);

        let (done_tx, done_rx) = std::sync::mpsc::channel();
        let shared = Arc::clone(&logger);
        std::thread::spawn(move || {
            let inner = Arc::clone(&shared);
            let added = shared.add_logger(
                "audit",
                |_| {
                    inner.info("constructing audit backend");
                    assert!(!inner.has_logger("audit"));
                    Ok(Arc::new(MemoryBackend::new()) as Arc<dyn Backend>)
                },
                &Value::Null,
            );
            let _ = done_tx.send(added.is_ok());
        });

        let added = done_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("add_logger must not deadlock when the factory logs");
        assert!(added);
        assert_eq!(events.messages(), vec!["constructing audit backend"]);
        assert!(logger.has_logger("audit"));
    }

    #[test]
    fn test_remove_logger_stops_delivery() {
        let (logger, events) = test_logger(LogLevel::Info);
        logger.info("one");
        assert!(logger.remove_logger("memory"));
        assert!(!logger.remove_logger("memory"));
        logger.info("two");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_labeled_timer_emits_info() {
        let (logger, events) = test_logger(LogLevel::Info);

        let timer = logger.timer(Some("elapsed: %s"));
        let elapsed = timer.stop();

        let recorded = events.events();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].kind, "info");
        assert!(recorded[0].msg.starts_with("elapsed: "));
        assert!(recorded[0].msg.ends_with("ms"));
        assert!(elapsed <= std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_unlabeled_timer_is_silent() {
        let (logger, events) = test_logger(LogLevel::Debug);
        let timer = logger.timer(None);
        timer.log();
        timer.stop();
        assert!(events.is_empty());
    }

    #[test]
    fn test_load_backends_through_resolver() {
        let logger = Logger::builder()
            .environment(Environment::new(None, false))
            .without_backends()
            .build();

        let config = match json!({ "memory": {}, "nonexistentTransport": {} }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let report = logger.load_backends(&config);

        assert_eq!(report.loaded, vec!["memory"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(logger.logger_names(), vec!["memory"]);
    }

    #[test]
    fn test_shutdown_unregisters_backends() {
        let (logger, events) = test_logger(LogLevel::Info);
        tokio_test::block_on(logger.shutdown()).unwrap();

        assert!(logger.logger_names().is_empty());
        assert_eq!(events.flush_count(), 1);
    }
}
