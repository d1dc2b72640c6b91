//! In-memory backend, for tests and for hosts that inspect recent events

use crate::core::{Backend, LogEvent, LoggerError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Shared {
    events: Mutex<VecDeque<LogEvent>>,
    flushes: AtomicUsize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MemoryConfig {
    capacity: Option<usize>,
}

/// Keeps received events in memory
///
/// With a capacity, the oldest events are dropped once it is reached.
/// Inspect the events through a [`MemoryHandle`], which stays valid after
/// the backend has been moved into a logger.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    shared: Arc<Shared>,
    capacity: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shared: Arc::default(),
            capacity: Some(capacity),
        }
    }

    /// Build from a `{ capacity }` config
    pub fn from_config(config: &Value) -> Result<Self> {
        let config: MemoryConfig = if config.is_null() {
            MemoryConfig::default()
        } else {
            serde_json::from_value(config.clone())
                .map_err(|e| LoggerError::config("MemoryBackend", e.to_string()))?
        };
        Ok(match config.capacity {
            Some(capacity) => Self::with_capacity(capacity),
            None => Self::new(),
        })
    }

    pub fn handle(&self) -> MemoryHandle {
        MemoryHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn log(&self, event: &LogEvent) -> Result<()> {
        let mut events = self.shared.events.lock();
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return Ok(());
            }
            while events.len() >= capacity {
                events.pop_front();
            }
        }
        events.push_back(event.clone());
        Ok(())
    }

    fn can_flush(&self) -> bool {
        true
    }

    async fn flush(&self) -> Result<()> {
        self.shared.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Read side of a [`MemoryBackend`]
#[derive(Debug, Clone)]
pub struct MemoryHandle {
    shared: Arc<Shared>,
}

impl MemoryHandle {
    pub fn events(&self) -> Vec<LogEvent> {
        self.shared.events.lock().iter().cloned().collect()
    }

    /// Event kinds in arrival order
    pub fn kinds(&self) -> Vec<String> {
        self.shared
            .events
            .lock()
            .iter()
            .map(|event| event.kind.clone())
            .collect()
    }

    /// Plain messages in arrival order
    pub fn messages(&self) -> Vec<String> {
        self.shared
            .events
            .lock()
            .iter()
            .map(|event| event.msg.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.shared.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.events.lock().is_empty()
    }

    pub fn flush_count(&self) -> usize {
        self.shared.flushes.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.shared.events.lock().clear();
    }
}
