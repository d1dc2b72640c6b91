//! Named, insertion-ordered set of live backends

use super::{backend::Backend, diagnostics::Diagnostics, error::Result};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

/// A registered backend together with its registration name
pub type BackendEntry = (Arc<str>, Arc<dyn Backend>);

/// Registry of backends keyed by name
///
/// Adding a name that is already present is a no-op: the original instance
/// stays registered and the new factory is never invoked.
pub struct BackendRegistry {
    entries: RwLock<Vec<BackendEntry>>,
    diagnostics: Diagnostics,
}

impl BackendRegistry {
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            diagnostics,
        }
    }

    /// Construct a backend with `factory(config)` and register it under `name`
    ///
    /// Returns `Ok(false)` when `name` is already registered. No lock is held
    /// while the factory runs, so it may log or inspect the registry. If
    /// another thread registers `name` first, the new instance is dropped and
    /// `Ok(false)` is returned.
    pub fn add<F>(&self, name: &str, factory: F, config: &Value) -> Result<bool>
    where
        F: FnOnce(&Value) -> Result<Arc<dyn Backend>>,
    {
        if self.has(name) {
            self.diagnostics
                .notice(format_args!("Backend '{}' is already registered, skipping", name));
            return Ok(false);
        }

        let backend = factory(config)?;
        Ok(self.insert(name, backend))
    }

    /// Register an already constructed backend
    pub fn insert(&self, name: &str, backend: Arc<dyn Backend>) -> bool {
        let mut entries = self.entries.write();
        if entries.iter().any(|(existing, _)| &**existing == name) {
            self.diagnostics
                .notice(format_args!("Backend '{}' is already registered, skipping", name));
            return false;
        }
        entries.push((Arc::from(name), backend));
        self.diagnostics
            .notice(format_args!("Registered backend '{}'", name));
        true
    }

    /// Unregister `name`; returns whether anything was removed
    pub fn remove(&self, name: &str) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|(existing, _)| &**existing != name);
        let removed = entries.len() != before;
        if removed {
            self.diagnostics
                .notice(format_args!("Removed backend '{}'", name));
        }
        removed
    }

    /// Remove every backend, returning them in registration order
    pub fn clear(&self) -> Vec<BackendEntry> {
        std::mem::take(&mut *self.entries.write())
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries
            .read()
            .iter()
            .any(|(existing, _)| &**existing == name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Backend>> {
        self.entries
            .read()
            .iter()
            .find(|(existing, _)| &**existing == name)
            .map(|(_, backend)| Arc::clone(backend))
    }

    pub fn names(&self) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Cheap copy of the current entries; the lock is released on return
    pub fn snapshot(&self) -> Vec<BackendEntry> {
        self.entries.read().clone()
    }

    /// Visit every backend in registration order
    ///
    /// Runs over a snapshot, so the visitor may add or remove backends.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, &dyn Backend),
    {
        for (name, backend) in self.snapshot() {
            visitor(&name, backend.as_ref());
        }
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new(Diagnostics::default())
    }
}
