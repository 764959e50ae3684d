//! Logger instances.

use crate::error::ConfigError;
use crate::options::{LogRecord, LoggerOptions, LoggerPatch};
use crate::scope::{Namespace, Region};
use crate::severity::Severity;
use crate::sink::{Sink, SinkFactory};
use chrono::Local;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

struct ActiveConfig {
    options: LoggerOptions,
    sinks: Vec<Arc<dyn Sink>>,
}

/// A logger handle for one (region, namespace) pair.
///
/// The instance owns a private copy of its configuration, decoupled from
/// the namespace defaults after creation; the registry replaces it
/// wholesale when the namespace is reconfigured. All leveled operations
/// return the instance itself so calls can be chained.
pub struct Logger {
    region: Region,
    namespace: Namespace,
    factory: Arc<dyn SinkFactory>,
    active: RwLock<ActiveConfig>,
}

impl Logger {
    /// Creates an instance seeded with `options`, a copy of the
    /// namespace defaults at creation time.
    pub(crate) fn seeded(
        region: Region,
        namespace: Namespace,
        options: LoggerOptions,
        factory: Arc<dyn SinkFactory>,
    ) -> Self {
        let sinks = factory.build(&options, &region);
        Self {
            region,
            namespace,
            factory,
            active: RwLock::new(ActiveConfig { options, sinks }),
        }
    }

    /// The region identity this instance is keyed by.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The namespace identity this instance is keyed by.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// A snapshot of the currently effective configuration.
    pub fn options(&self) -> LoggerOptions {
        self.read().options.clone()
    }

    /// Replaces this instance's configuration.
    ///
    /// The new record starts from the absolute global default (not from
    /// the instance's previous state, and not from the namespace
    /// default) and then applies `patch`. Per-key customizations applied
    /// earlier are therefore lost unless the new patch re-specifies
    /// them. The sink set is rebuilt for the new record and swapped in
    /// together with it, so no log call observes a half-updated pair.
    pub fn configure(&self, patch: &LoggerPatch) -> Result<&Self, ConfigError> {
        patch.validate()?;
        let mut options = LoggerOptions::default();
        patch.apply(&mut options);
        let sinks = self.factory.build(&options, &self.region);
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        *active = ActiveConfig { options, sinks };
        Ok(self)
    }

    /// Logs at debug severity.
    pub fn debug(&self, message: impl AsRef<str>) -> &Self {
        self.log(Severity::Debug, message.as_ref(), &[])
    }

    /// Logs at debug severity with meta values appended.
    pub fn debug_with(&self, message: impl AsRef<str>, meta: &[Value]) -> &Self {
        self.log(Severity::Debug, message.as_ref(), meta)
    }

    /// Logs at info severity.
    pub fn info(&self, message: impl AsRef<str>) -> &Self {
        self.log(Severity::Info, message.as_ref(), &[])
    }

    /// Logs at info severity with meta values appended.
    pub fn info_with(&self, message: impl AsRef<str>, meta: &[Value]) -> &Self {
        self.log(Severity::Info, message.as_ref(), meta)
    }

    /// Logs at warn severity.
    pub fn warn(&self, message: impl AsRef<str>) -> &Self {
        self.log(Severity::Warn, message.as_ref(), &[])
    }

    /// Logs at warn severity with meta values appended.
    pub fn warn_with(&self, message: impl AsRef<str>, meta: &[Value]) -> &Self {
        self.log(Severity::Warn, message.as_ref(), meta)
    }

    /// Logs at error severity.
    pub fn error(&self, message: impl AsRef<str>) -> &Self {
        self.log(Severity::Error, message.as_ref(), &[])
    }

    /// Logs at error severity with meta values appended.
    pub fn error_with(&self, message: impl AsRef<str>, meta: &[Value]) -> &Self {
        self.log(Severity::Error, message.as_ref(), meta)
    }

    /// Logs `message` at `severity`.
    ///
    /// Below the configured level this is a silent no-op: no formatting
    /// work, no sink writes. At or above it, the composed text is
    /// formatted once and handed to every sink in the active set.
    pub fn log(&self, severity: Severity, message: &str, meta: &[Value]) -> &Self {
        let active = self.read();
        if !active.options.level.enables(severity) {
            return self;
        }
        let record = LogRecord {
            level: severity,
            time_str: Local::now().format(TIME_FORMAT).to_string(),
            message: compose_text(message, meta),
            region: self.region.label().to_string(),
        };
        let line = (active.options.format)(&record);
        for sink in &active.sinks {
            sink.write(severity, &line);
        }
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, ActiveConfig> {
        self.active.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("region", &self.region)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

/// Composes the emitted text: the message verbatim, or the message plus
/// a newline and the serialized meta sequence in call order.
fn compose_text(message: &str, meta: &[Value]) -> String {
    if meta.is_empty() {
        return message.to_string();
    }
    let rendered: Vec<String> = meta.iter().map(render_meta_value).collect();
    format!("{}\n{}", message, rendered.join(" "))
}

// Strings render bare, everything else as compact JSON.
fn render_meta_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
