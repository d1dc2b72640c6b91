//! Event dispatch: level filter, rendering and fan-out

use super::{
    diagnostics::{panic_message, Diagnostics},
    error::{FlushFailure, LoggerError, Result},
    log_event::{FieldValue, LogEvent},
    log_level::rank_of,
    metrics::DispatchMetrics,
    registry::BackendRegistry,
    render::{Render, Renderings},
};
use futures::future::join_all;
use futures::FutureExt;
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

/// Message used when a dispatch carries none
pub const NO_MESSAGE: &str = "(no message)";

pub struct Dispatcher {
    threshold: RwLock<u8>,
    registry: BackendRegistry,
    diagnostics: Diagnostics,
    metrics: Arc<DispatchMetrics>,
}

impl Dispatcher {
    pub fn new(threshold: u8, diagnostics: Diagnostics) -> Self {
        Self {
            threshold: RwLock::new(threshold),
            registry: BackendRegistry::new(diagnostics),
            diagnostics,
            metrics: Arc::new(DispatchMetrics::new()),
        }
    }

    #[inline]
    pub fn threshold(&self) -> u8 {
        *self.threshold.read()
    }

    pub fn set_threshold(&self, rank: u8) {
        *self.threshold.write() = rank;
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Whether an event of `kind` would reach the backends
    ///
    /// Unrecognized kinds are never filtered.
    pub fn would_emit(&self, kind: &str) -> bool {
        match rank_of(kind) {
            Ok(rank) => rank <= self.threshold(),
            Err(_) => true,
        }
    }

    /// Filter, render and fan one event out to every registered backend
    ///
    /// Returns the number of backends that accepted the event. A failing or
    /// panicking backend is reported and skipped; the rest still receive it.
    pub fn dispatch(&self, kind: &str, message: Option<&dyn Render>, data: Vec<FieldValue>) -> usize {
        if !self.would_emit(kind) {
            self.metrics.record_filtered();
            return 0;
        }

        let Renderings { plain, decorated } = match message {
            Some(message) => Renderings::of(message),
            None => Renderings::of(NO_MESSAGE),
        };
        let event = LogEvent::new(kind, plain, decorated, data);
        self.metrics.record_dispatched();

        let mut delivered = 0;
        for (name, backend) in self.registry.snapshot() {
            let started = self.diagnostics.enabled().then(Instant::now);
            let outcome = catch_unwind(AssertUnwindSafe(|| backend.log(&event)));
            if let Some(started) = started {
                self.diagnostics
                    .backend_timing(&name, kind, started.elapsed());
            }

            let failure = match outcome {
                Ok(Ok(())) => {
                    delivered += 1;
                    continue;
                }
                Ok(Err(e)) => LoggerError::backend_dispatch(&*name, e.to_string()),
                Err(payload) => LoggerError::backend_dispatch(
                    &*name,
                    format!("panicked: {}", panic_message(payload.as_ref())),
                ),
            };
            self.metrics.record_backend_failure();
            self.diagnostics.error(format_args!(
                "{}. Other backends continue to function.",
                failure
            ));
        }
        delivered
    }

    /// Flush every backend that can flush, concurrently
    ///
    /// All flushes run to completion; failures are collected into one
    /// `BackendFlush` error.
    pub async fn flush(&self) -> Result<()> {
        let targets: Vec<_> = self
            .registry
            .snapshot()
            .into_iter()
            .filter(|(_, backend)| backend.can_flush())
            .collect();

        let flushes = targets.iter().map(|(name, backend)| async move {
            let outcome = AssertUnwindSafe(backend.flush()).catch_unwind().await;
            let result = match outcome {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(payload) => Err(format!("panicked: {}", panic_message(payload.as_ref()))),
            };
            (name, result)
        });

        let mut failures = Vec::new();
        for (name, result) in join_all(flushes).await {
            match result {
                Ok(()) => self
                    .diagnostics
                    .notice(format_args!("Flushed backend '{}'", name)),
                Err(message) => {
                    self.metrics.record_flush_failure();
                    self.diagnostics.error(format_args!(
                        "Backend '{}' flush failed: {}",
                        name, message
                    ));
                    failures.push(FlushFailure {
                        backend: name.to_string(),
                        message,
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::BackendFlush { failures })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryBackend;
    use crate::core::backend::Backend;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingBackend;

    #[async_trait]
    impl Backend for FailingBackend {
        fn log(&self, _event: &LogEvent) -> Result<()> {
            Err(LoggerError::other("Simulated failure"))
        }
    }

    struct PanickingBackend;

    #[async_trait]
    impl Backend for PanickingBackend {
        fn log(&self, _event: &LogEvent) -> Result<()> {
            panic!("backend exploded");
        }
    }

    struct CountingBackend(AtomicUsize);

    #[async_trait]
    impl Backend for CountingBackend {
        fn log(&self, _event: &LogEvent) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_filtered_event_reaches_no_backend() {
        let dispatcher = Dispatcher::new(3, Diagnostics::default());
        let memory = Arc::new(MemoryBackend::new());
        dispatcher.registry().insert("memory", memory.clone());

        assert_eq!(dispatcher.dispatch("debug", Some(&"x"), vec![]), 0);
        assert!(memory.handle().is_empty());
        assert_eq!(dispatcher.metrics().events_filtered(), 1);
        assert_eq!(dispatcher.metrics().events_dispatched(), 0);

        assert_eq!(dispatcher.dispatch("error", Some(&"y"), vec![]), 1);
        assert_eq!(memory.handle().kinds(), vec!["error"]);
    }

    #[test]
    fn test_unrecognized_kind_is_never_filtered() {
        let dispatcher = Dispatcher::new(1, Diagnostics::default());
        let memory = Arc::new(MemoryBackend::new());
        dispatcher.registry().insert("memory", memory.clone());

        assert!(dispatcher.would_emit("audit"));
        dispatcher.dispatch("audit", Some(&"custom"), vec![]);
        assert_eq!(memory.handle().kinds(), vec!["audit"]);
    }

    #[test]
    fn test_missing_message_uses_placeholder() {
        let dispatcher = Dispatcher::new(7, Diagnostics::default());
        let memory = Arc::new(MemoryBackend::new());
        dispatcher.registry().insert("memory", memory.clone());

        dispatcher.dispatch("info", None, vec![FieldValue::from(1)]);
        let events = memory.handle().events();
        assert_eq!(events[0].msg, NO_MESSAGE);
        assert_eq!(events[0].cmsg, NO_MESSAGE);
        assert_eq!(events[0].data, vec![FieldValue::Int(1)]);
    }

    #[test]
    fn test_plain_and_decorated_renderings() {
        let dispatcher = Dispatcher::new(7, Diagnostics::default());
        let memory = Arc::new(MemoryBackend::new());
        dispatcher.registry().insert("memory", memory.clone());

        dispatcher.dispatch("warn", Some(&"\x1b[33mcareful\x1b[0m"), vec![]);
        let event = &memory.handle().events()[0];
        assert_eq!(event.msg, "careful");
        assert_eq!(event.cmsg, "\x1b[33mcareful\x1b[0m");
    }

    #[test]
    fn test_failures_are_isolated() {
        let dispatcher = Dispatcher::new(7, Diagnostics::new(true));
        let counter = Arc::new(CountingBackend(AtomicUsize::new(0)));
        dispatcher.registry().insert("failing", Arc::new(FailingBackend));
        dispatcher.registry().insert("panicking", Arc::new(PanickingBackend));
        dispatcher.registry().insert("counting", counter.clone());

        for _ in 0..3 {
            assert_eq!(dispatcher.dispatch("info", Some(&"still delivered"), vec![]), 1);
        }

        assert_eq!(counter.0.load(Ordering::SeqCst), 3);
        assert_eq!(dispatcher.metrics().backend_failures(), 6);
        assert_eq!(dispatcher.metrics().events_dispatched(), 3);
    }

    #[test]
    fn test_backends_share_one_event() {
        let dispatcher = Dispatcher::new(7, Diagnostics::default());
        let first = Arc::new(MemoryBackend::new());
        let second = Arc::new(MemoryBackend::new());
        dispatcher.registry().insert("first", first.clone());
        dispatcher.registry().insert("second", second.clone());

        dispatcher.dispatch("sys", Some(&"boot"), vec![]);
        assert_eq!(first.handle().events(), second.handle().events());
    }

    struct FlushCounting {
        declared: bool,
        flushes: AtomicUsize,
    }

    #[async_trait]
    impl Backend for FlushCounting {
        fn log(&self, _event: &LogEvent) -> Result<()> {
            Ok(())
        }

        fn can_flush(&self) -> bool {
            self.declared
        }

        async fn flush(&self) -> Result<()> {
            self.flushes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_flush_requires_declared_capability() {
        let dispatcher = Dispatcher::new(7, Diagnostics::default());
        let declared = Arc::new(FlushCounting {
            declared: true,
            flushes: AtomicUsize::new(0),
        });
        let undeclared = Arc::new(FlushCounting {
            declared: false,
            flushes: AtomicUsize::new(0),
        });
        dispatcher.registry().insert("declared", declared.clone());
        dispatcher.registry().insert("undeclared", undeclared.clone());

        futures::executor::block_on(dispatcher.flush()).unwrap();

        assert_eq!(declared.flushes.load(Ordering::SeqCst), 1);
        assert_eq!(undeclared.flushes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_threshold_update() {
        let dispatcher = Dispatcher::new(6, Diagnostics::default());
        assert!(!dispatcher.would_emit("debug"));
        dispatcher.set_threshold(7);
        assert!(dispatcher.would_emit("debug"));
    }
}
