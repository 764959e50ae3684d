//! Per-namespace default configuration store.

use crate::options::LoggerOptions;
use crate::scope::Namespace;
use dashmap::DashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Owns every namespace's default configuration record.
///
/// Entries are created lazily as copies of the global default record and
/// persist for the process lifetime. Each entry sits behind its own
/// `RwLock` so a namespace reconfiguration can hold the guard across
/// "merge defaults" and "propagate to instances" as one exclusive step.
#[derive(Debug, Default)]
pub struct ConfigStore {
    table: DashMap<Namespace, Arc<RwLock<LoggerOptions>>>,
}

impl ConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live entry for `namespace`, inserting a copy of the
    /// global default record on first access.
    pub fn cell(&self, namespace: &Namespace) -> Arc<RwLock<LoggerOptions>> {
        self.table
            .entry(namespace.clone())
            .or_insert_with(|| Arc::new(RwLock::new(LoggerOptions::default())))
            .value()
            .clone()
    }

    /// Returns a copy of the namespace's current defaults.
    pub fn snapshot(&self, namespace: &Namespace) -> LoggerOptions {
        let cell = self.cell(namespace);
        let guard = cell.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }
}
