//! Sink capability: destinations accepting formatted lines by severity.
//!
//! The registry and logger instances never perform I/O themselves; they
//! hand formatted lines to a set of [`Sink`]s built by a [`SinkFactory`].
//! Reconfiguration replaces the whole set: the previous sinks are dropped
//! and a fresh set is built from the new options.

mod console;
mod rolling;

pub use console::ConsoleSink;
pub use rolling::RollingFileSink;

use crate::options::LoggerOptions;
use crate::scope::Region;
use crate::severity::Severity;
use std::sync::Arc;

/// A destination that accepts formatted log lines at or above a minimum
/// severity.
///
/// Writes are fire-and-forget: implementations never surface I/O
/// failures to the logging call site.
pub trait Sink: Send + Sync {
    /// Writes one formatted line recorded at `severity`.
    fn write(&self, severity: Severity, line: &str);
}

/// Builds the sink set for a logger's resolved configuration.
pub trait SinkFactory: Send + Sync {
    /// Builds sinks for `options` on behalf of the logger owning
    /// `region`.
    fn build(&self, options: &LoggerOptions, region: &Region) -> Vec<Arc<dyn Sink>>;
}

/// Default factory: a console sink filtered at the configured level, plus
/// one rolling file sink per severity from the configured level upward.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSinkFactory;

impl SinkFactory for DefaultSinkFactory {
    fn build(&self, options: &LoggerOptions, _region: &Region) -> Vec<Arc<dyn Sink>> {
        let mut sinks: Vec<Arc<dyn Sink>> = Vec::new();
        if options.enable_console {
            sinks.push(Arc::new(ConsoleSink::new(options.level)));
        }
        if options.enable_file {
            for severity in options.level.upwards() {
                sinks.push(Arc::new(RollingFileSink::new(severity, options)));
            }
        }
        sinks
    }
}

/// A sink that captures writes for assertions.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MockSink {
    writes: Arc<std::sync::Mutex<Vec<(Severity, String)>>>,
}

#[cfg(test)]
impl MockSink {
    /// Creates an empty capturing sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured writes in call order.
    pub fn writes(&self) -> Vec<(Severity, String)> {
        self.writes.lock().unwrap().clone()
    }

    /// Returns the number of captured writes.
    pub fn len(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.writes.lock().unwrap().is_empty()
    }

    /// Discards all captured writes.
    pub fn clear(&self) {
        self.writes.lock().unwrap().clear();
    }
}

#[cfg(test)]
impl Sink for MockSink {
    fn write(&self, severity: Severity, line: &str) {
        self.writes.lock().unwrap().push((severity, line.to_string()));
    }
}
