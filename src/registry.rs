//! Logger registry: identity-keyed caching and namespace configuration.

use crate::error::ConfigError;
use crate::logger::Logger;
use crate::options::{LoggerOptions, LoggerPatch};
use crate::scope::{Namespace, Region};
use crate::sink::{DefaultSinkFactory, SinkFactory};
use crate::store::ConfigStore;
use dashmap::DashMap;
use std::fmt;
use std::sync::{Arc, PoisonError};

type InstanceTable = DashMap<Region, Arc<Logger>>;

/// Produces and caches logger instances keyed by (namespace, region) and
/// owns the namespace-level configure operation.
///
/// Entries are created once and never removed: equal identities always
/// resolve to the identical instance for the process lifetime.
pub struct Registry {
    store: ConfigStore,
    namespaces: DashMap<Namespace, Arc<InstanceTable>>,
    factory: Arc<dyn SinkFactory>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry with the default console/file sink factory.
    pub fn new() -> Self {
        Self::with_sink_factory(Arc::new(DefaultSinkFactory))
    }

    /// Creates a registry with a custom sink factory.
    ///
    /// The factory is consulted whenever an instance is created or
    /// reconfigured; it receives the resolved options and the instance's
    /// region.
    pub fn with_sink_factory(factory: Arc<dyn SinkFactory>) -> Self {
        Self {
            store: ConfigStore::new(),
            namespaces: DashMap::new(),
            factory,
        }
    }

    /// Returns the logger for (region, namespace), creating it on first
    /// use.
    ///
    /// A fresh instance is seeded with a copy of the namespace defaults
    /// at the moment of creation. A cached instance is returned
    /// unchanged; repeated lookups never re-apply configuration.
    pub fn get_logger(&self, region: &Region, namespace: &Namespace) -> Arc<Logger> {
        let instances = self
            .namespaces
            .entry(namespace.clone())
            .or_insert_with(|| Arc::new(DashMap::new()))
            .value()
            .clone();
        if let Some(existing) = instances.get(region) {
            return existing.value().clone();
        }
        // Hold the defaults read guard across seed + insert so a racing
        // namespace configure either sees the new instance or seeds it
        // with the post-merge defaults, never a torn value.
        let cell = self.store.cell(namespace);
        let defaults = cell.read().unwrap_or_else(PoisonError::into_inner);
        let logger = instances
            .entry(region.clone())
            .or_insert_with(|| {
                tracing::debug!(
                    target: "nexus_log",
                    namespace = %namespace,
                    region = %region,
                    "logger instance created"
                );
                Arc::new(Logger::seeded(
                    region.clone(),
                    namespace.clone(),
                    defaults.clone(),
                    self.factory.clone(),
                ))
            })
            .value()
            .clone();
        drop(defaults);
        logger
    }

    /// Returns the logger for the well-known global region and
    /// namespace.
    pub fn global_logger(&self) -> Arc<Logger> {
        self.get_logger(&Region::global(), &Namespace::global())
    }

    /// Returns the logger for `region` under the global namespace.
    pub fn region_logger(&self, region: &Region) -> Arc<Logger> {
        self.get_logger(region, &Namespace::global())
    }

    /// Reconfigures the global namespace.
    pub fn configure(&self, patch: &LoggerPatch) -> Result<(), ConfigError> {
        self.configure_namespace(patch, &Namespace::global())
    }

    /// Merges `patch` into the namespace defaults and applies the merged
    /// record to every instance currently cached under the namespace.
    ///
    /// Propagation is authoritative: per-instance customizations applied
    /// through [`Logger::configure`] are replaced by the merged
    /// namespace record. Instances created later are seeded from the
    /// updated defaults.
    pub fn configure_namespace(
        &self,
        patch: &LoggerPatch,
        namespace: &Namespace,
    ) -> Result<(), ConfigError> {
        patch.validate()?;
        let cell = self.store.cell(namespace);
        let mut defaults = cell.write().unwrap_or_else(PoisonError::into_inner);
        patch.apply(&mut defaults);
        let merged = LoggerPatch::from(&*defaults);
        if let Some(instances) = self.namespaces.get(namespace) {
            for entry in instances.iter() {
                entry.value().configure(&merged)?;
            }
        }
        tracing::debug!(
            target: "nexus_log",
            namespace = %namespace,
            "namespace defaults reconfigured"
        );
        Ok(())
    }

    /// Returns a copy of the namespace's current default record.
    pub fn namespace_defaults(&self, namespace: &Namespace) -> LoggerOptions {
        self.store.snapshot(namespace)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("namespaces", &self.namespaces.len())
            .finish_non_exhaustive()
    }
}
