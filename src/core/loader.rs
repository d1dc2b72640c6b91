//! Backend resolution from declarative configuration
//!
//! The host supplies a [`BackendResolver`] mapping canonical backend ids to
//! factories. [`BackendLoader`] walks a `{ name: config }` map, resolves each
//! name and registers the result; one bad entry never stops the others.

use super::{
    backend::Backend,
    diagnostics::Diagnostics,
    error::{LoggerError, Result},
    registry::BackendRegistry,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Constructs a backend from its backend-specific config
pub type BackendFactory = Arc<dyn Fn(&Value) -> Result<Arc<dyn Backend>> + Send + Sync>;

/// Source of backend factories, keyed by canonical id
pub trait BackendResolver: Send + Sync {
    fn resolve(&self, id: &str) -> Result<BackendFactory>;
}

/// Canonical id of a configured backend name
///
/// Camel-case boundaries become hyphens and everything is lowercased:
/// `fileLogger` becomes `file-logger`. Runs of capitals stay together.
pub fn canonical_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len() + 4);
    let mut prev_lower_or_digit = false;
    for ch in name.chars() {
        if ch.is_uppercase() && prev_lower_or_digit {
            id.push('-');
        }
        prev_lower_or_digit = ch.is_lowercase() || ch.is_ascii_digit();
        id.extend(ch.to_lowercase());
    }
    id
}

/// Explicit factory map supplied by the host application
#[derive(Clone, Default)]
pub struct BackendCatalog {
    factories: HashMap<String, BackendFactory>,
}

impl BackendCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the backends shipped with this crate
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        #[cfg(feature = "console")]
        catalog.register("console", |config| {
            Ok(Arc::new(crate::backends::ConsoleBackend::from_config(config)?) as Arc<dyn Backend>)
        });
        #[cfg(feature = "file")]
        catalog.register("file", |config| {
            Ok(Arc::new(crate::backends::FileBackend::from_config(config)?) as Arc<dyn Backend>)
        });
        catalog.register("memory", |config| {
            Ok(Arc::new(crate::backends::MemoryBackend::from_config(config)?) as Arc<dyn Backend>)
        });
        catalog
    }

    /// Register a factory; `name` is canonicalized first
    pub fn register<F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn(&Value) -> Result<Arc<dyn Backend>> + Send + Sync + 'static,
    {
        self.factories.insert(canonical_id(name), Arc::new(factory));
        self
    }

    /// Builder-style [`BackendCatalog::register`]
    #[must_use]
    pub fn with<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn(&Value) -> Result<Arc<dyn Backend>> + Send + Sync + 'static,
    {
        self.register(name, factory);
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl BackendResolver for BackendCatalog {
    fn resolve(&self, id: &str) -> Result<BackendFactory> {
        self.factories
            .get(id)
            .cloned()
            .ok_or_else(|| LoggerError::backend_resolution(id, "no backend registered under this id"))
    }
}

impl fmt::Debug for BackendCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendCatalog")
            .field("ids", &self.ids())
            .finish()
    }
}

/// Outcome of loading a backend config map
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names newly registered, in config order
    pub loaded: Vec<String>,
    /// Names skipped because they were already registered
    pub skipped: Vec<String>,
    /// Names that failed to resolve or construct
    pub failed: Vec<(String, LoggerError)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct BackendLoader<'a> {
    resolver: &'a dyn BackendResolver,
    diagnostics: Diagnostics,
}

impl<'a> BackendLoader<'a> {
    pub fn new(resolver: &'a dyn BackendResolver, diagnostics: Diagnostics) -> Self {
        Self {
            resolver,
            diagnostics,
        }
    }

    /// Resolve and register every backend in `config`, in declaration order
    pub fn load(&self, config: &Map<String, Value>, registry: &BackendRegistry) -> LoadReport {
        let mut report = LoadReport::default();
        for (name, backend_config) in config {
            match self.load_one(name, backend_config, registry) {
                Ok(true) => report.loaded.push(name.clone()),
                Ok(false) => report.skipped.push(name.clone()),
                Err(e) => {
                    self.diagnostics
                        .notice(format_args!("Skipping backend '{}': {}", name, e));
                    report.failed.push((name.clone(), e));
                }
            }
        }
        report
    }

    fn load_one(&self, name: &str, config: &Value, registry: &BackendRegistry) -> Result<bool> {
        let id = canonical_id(name);
        let factory = self.resolver.resolve(&id)?;
        registry
            .add(name, |cfg| factory(cfg), config)
            .map_err(|e| match e {
                e @ LoggerError::BackendResolution { .. } => e,
                other => LoggerError::backend_resolution(name, other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryBackend;
    use serde_json::json;

    fn catalog() -> BackendCatalog {
        BackendCatalog::new()
            .with("memory", |_| Ok(Arc::new(MemoryBackend::new()) as Arc<dyn Backend>))
            .with("auditTrail", |_| Ok(Arc::new(MemoryBackend::new()) as Arc<dyn Backend>))
            .with("broken", |_| Err(LoggerError::config("broken", "always fails")))
    }

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_canonical_id() {
        assert_eq!(canonical_id("fileLogger"), "file-logger");
        assert_eq!(canonical_id("console"), "console");
        assert_eq!(canonical_id("myHttpTransport"), "my-http-transport");
        assert_eq!(canonical_id("s3Uploader"), "s3-uploader");
        assert_eq!(canonical_id("HTTPLogger"), "httplogger");
        assert_eq!(canonical_id("already-hyphenated"), "already-hyphenated");
    }

    #[test]
    fn test_catalog_canonicalizes_names() {
        let catalog = catalog();
        assert!(catalog.contains("audit-trail"));
        assert!(catalog.resolve("audit-trail").is_ok());
        assert!(matches!(
            catalog.resolve("auditTrail"),
            Err(LoggerError::BackendResolution { .. })
        ));
    }

    #[test]
    fn test_load_continues_past_failures() {
        let catalog = catalog();
        let registry = BackendRegistry::default();
        let loader = BackendLoader::new(&catalog, Diagnostics::new(false));

        let config = as_map(json!({
            "missing": {},
            "broken": {},
            "memory": {},
            "auditTrail": { "capacity": 10 }
        }));
        let report = loader.load(&config, &registry);

        assert_eq!(report.loaded, vec!["memory", "auditTrail"]);
        assert_eq!(report.failed.len(), 2);
        assert!(!report.is_clean());
        assert_eq!(registry.names(), vec!["memory", "auditTrail"]);
        for (_, err) in &report.failed {
            assert!(matches!(err, LoggerError::BackendResolution { .. }));
        }
    }

    #[test]
    fn test_load_skips_already_registered() {
        let catalog = catalog();
        let registry = BackendRegistry::default();
        let loader = BackendLoader::new(&catalog, Diagnostics::new(false));
        let config = as_map(json!({ "memory": {} }));

        loader.load(&config, &registry);
        let report = loader.load(&config, &registry);

        assert!(report.loaded.is_empty());
        assert_eq!(report.skipped, vec!["memory"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_builtin_ids() {
        let catalog = BackendCatalog::with_builtins();
        assert!(catalog.contains("memory"));
        #[cfg(feature = "console")]
        assert!(catalog.contains("console"));
        #[cfg(feature = "file")]
        assert!(catalog.contains("file"));
    }
}
