// Named listener factories
// The host selects listeners by string identifier through its own CLI

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::warn;

use crate::config::HostOptions;
use crate::listener::TestListener;
use crate::report::{ConsoleReporter, JsonReporter, JunitReporter, StreamingReporter};

type ListenerFactory = Box<dyn Fn(&HostOptions) -> Box<dyn TestListener> + Send + Sync>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no listener registered under '{0}'")]
    UnknownListener(String),
}

/// Table of named listener factories.
///
/// Hosts may build listeners from several threads, hence the lock; the
/// listeners themselves are single-threaded.
pub struct ListenerRegistry {
    factories: RwLock<HashMap<String, ListenerFactory>>,
}

impl ListenerRegistry {
    /// Create a registry pre-populated with the built-in listeners
    pub fn new() -> Self {
        let registry = Self {
            factories: RwLock::new(HashMap::new()),
        };
        registry.register_defaults();
        registry
    }

    fn register_defaults(&self) {
        self.register("json", |options| {
            Box::new(JsonReporter::from_options(options))
        });
        self.register("console", |options| {
            Box::new(ConsoleReporter::from_options(options))
        });
        self.register("junit", |options| {
            Box::new(JunitReporter::from_options(options))
        });
        self.register("stream", |options| {
            Box::new(StreamingReporter::from_options(options))
        });
    }

    /// Register a factory under a name, replacing any previous holder
    pub fn register<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(&HostOptions) -> Box<dyn TestListener> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut factories = self.factories.write().unwrap_or_else(|e| e.into_inner());
        if factories.insert(name.clone(), Box::new(factory)).is_some() {
            warn!("Listener '{}' registered twice, keeping the newer one", name);
        }
    }

    /// Build the listener registered under `name`
    pub fn create(
        &self,
        name: &str,
        options: &HostOptions,
    ) -> Result<Box<dyn TestListener>, RegistryError> {
        let factories = self.factories.read().unwrap_or_else(|e| e.into_inner());
        factories
            .get(name)
            .map(|factory| factory(options))
            .ok_or_else(|| RegistryError::UnknownListener(name.to_string()))
    }

    /// Registered names, unordered
    pub fn names(&self) -> Vec<String> {
        let factories = self.factories.read().unwrap_or_else(|e| e.into_inner());
        factories.keys().cloned().collect()
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide registry the host resolves identifiers against
pub fn global() -> &'static ListenerRegistry {
    static REGISTRY: Lazy<ListenerRegistry> = Lazy::new(ListenerRegistry::new);
    &REGISTRY
}
