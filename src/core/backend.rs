//! Backend capability: the sink side of the facade

use super::{error::Result, log_event::LogEvent};
use async_trait::async_trait;
use std::sync::Arc;

/// A registered sink that renders and persists log events
///
/// Backends are shared behind `Arc` and called through `&self`; any
/// buffering state lives behind the backend's own lock.
///
/// # Flushing
///
/// Flushing is an optional capability declared by [`Backend::can_flush`].
/// The facade only calls [`Backend::flush`] on backends whose `can_flush`
/// returns `true`. **Override both together**: a backend that implements
/// `flush` but keeps the default `can_flush` is never flushed.
///
/// ```
/// use rust_logger_facade::core::{Backend, LogEvent, Result};
/// use async_trait::async_trait;
///
/// struct Buffered;
///
/// #[async_trait]
/// impl Backend for Buffered {
///     fn log(&self, _event: &LogEvent) -> Result<()> {
///         Ok(())
///     }
///
///     fn can_flush(&self) -> bool {
///         true
///     }
///
///     async fn flush(&self) -> Result<()> {
///         // write out buffered lines
///         Ok(())
///     }
/// }
/// ```
///
/// # Example
///
/// ```
/// use rust_logger_facade::core::{Backend, LogEvent, Result};
/// use async_trait::async_trait;
///
/// struct Stdout;
///
/// #[async_trait]
/// impl Backend for Stdout {
///     fn log(&self, event: &LogEvent) -> Result<()> {
///         println!("{}: {}", event.kind, event.msg);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Backend: Send + Sync {
    /// Handle one event
    fn log(&self, event: &LogEvent) -> Result<()>;

    /// Whether this backend exposes the flush capability
    ///
    /// Must return `true` for [`Backend::flush`] to ever be called.
    fn can_flush(&self) -> bool {
        false
    }

    /// Flush buffered output
    ///
    /// Only called when [`Backend::can_flush`] returns `true`.
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn log(&self, event: &LogEvent) -> Result<()> {
        (**self).log(event)
    }

    fn can_flush(&self) -> bool {
        (**self).can_flush()
    }

    async fn flush(&self) -> Result<()> {
        (**self).flush().await
    }
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for Box<B> {
    fn log(&self, event: &LogEvent) -> Result<()> {
        (**self).log(event)
    }

    fn can_flush(&self) -> bool {
        (**self).can_flush()
    }

    async fn flush(&self) -> Result<()> {
        (**self).flush().await
    }
}
