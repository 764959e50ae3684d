#![warn(missing_docs)]
//! # nexus-log
//!
//! A hierarchical logger registry: logger handles are produced and
//! cached by a two-level (namespace, region) identity, effective
//! configuration resolves through a cascade, and namespace-level
//! reconfiguration propagates live to every cached instance.
//!
//! ## Overview
//!
//! - **Identity-keyed caching**: one logger instance per
//!   (namespace, region) pair, created lazily and cached for the
//!   process lifetime.
//! - **Configuration cascade**: effective instance config ← namespace
//!   default ← global default.
//! - **Live propagation**: reconfiguring a namespace updates its
//!   defaults and re-applies them to every instance already cached
//!   under that namespace.
//! - **Pluggable sinks**: emission goes through a replaceable sink set
//!   (console, rotating files) built by a [`SinkFactory`].
//!
//! ## Architecture
//!
//! ```text
//!  get_logger(region, namespace)        configure(patch, namespace)
//!         │                                      │
//!         ▼                                      ▼
//!  ┌─────────────────────────────────────────────────────┐
//!  │ Registry                                            │
//!  │  namespace ─▶ region ─▶ Logger (cached, identical)  │
//!  └──────┬──────────────────────────────────┬───────────┘
//!         │ seed on miss                     │ merge + propagate
//!         ▼                                  ▼
//!  ┌─────────────┐                   ┌──────────────────┐
//!  │ ConfigStore │                   │ cached instances │
//!  │ ns defaults │                   │ adopt new record │
//!  └─────────────┘                   └──────────────────┘
//! ```
//!
//! Each `Logger` owns a private copy of its configuration plus a sink
//! set; both are replaced together on reconfiguration, so no log call
//! observes a half-updated state.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nexus_log::{configure_namespace, get_logger, global_logger, LoggerPatch, Namespace, Region, Severity};
//!
//! // Default logger under the well-known global identities.
//! global_logger().info("service starting");
//!
//! // Namespace with its own baseline, shared by every region in it.
//! let api = Namespace::new("api");
//! configure_namespace(
//!     &LoggerPatch::new().with_level(Severity::Info).with_file(true),
//!     &api,
//! )?;
//! let http = get_logger(&Region::new("http"), &api);
//! http.warn("slow upstream").error("upstream gone");
//! ```

mod error;
mod logger;
mod options;
mod registry;
mod scope;
mod severity;
pub mod sink;
mod store;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use logger::Logger;
pub use options::{
    FormatFn, LogRecord, LoggerOptions, LoggerPatch, Retention, default_format,
    parse_retention_spec, parse_size_spec,
};
pub use registry::Registry;
pub use scope::{Namespace, Region};
pub use severity::{Severity, UnknownSeverity};
pub use sink::{ConsoleSink, DefaultSinkFactory, RollingFileSink, Sink, SinkFactory};
pub use store::ConfigStore;

use std::sync::{Arc, LazyLock};

static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// The process-wide registry behind the crate-level convenience
/// functions.
pub fn registry() -> &'static Registry {
    &GLOBAL_REGISTRY
}

/// Fetches the logger for (region, namespace) from the process-wide
/// registry.
pub fn get_logger(region: &Region, namespace: &Namespace) -> Arc<Logger> {
    GLOBAL_REGISTRY.get_logger(region, namespace)
}

/// Fetches the well-known global logger.
pub fn global_logger() -> Arc<Logger> {
    GLOBAL_REGISTRY.global_logger()
}

/// Fetches the logger for `region` under the global namespace.
pub fn region_logger(region: &Region) -> Arc<Logger> {
    GLOBAL_REGISTRY.region_logger(region)
}

/// Reconfigures the global namespace of the process-wide registry.
pub fn configure(patch: &LoggerPatch) -> Result<(), ConfigError> {
    GLOBAL_REGISTRY.configure(patch)
}

/// Reconfigures `namespace` in the process-wide registry.
pub fn configure_namespace(
    patch: &LoggerPatch,
    namespace: &Namespace,
) -> Result<(), ConfigError> {
    GLOBAL_REGISTRY.configure_namespace(patch, namespace)
}
