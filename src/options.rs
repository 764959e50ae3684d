//! Configuration records, patches and the file rotation specs.
//!
//! [`LoggerOptions`] is the fully resolved record every logger instance
//! owns a private copy of; [`LoggerPatch`] is the all-optional overlay
//! used for incremental reconfiguration. Merging is an explicit
//! per-field operation: present fields overwrite, absent fields are left
//! untouched.

use crate::error::ConfigError;
use crate::severity::Severity;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// A single log event as seen by the display format function.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// Severity of the event.
    pub level: Severity,
    /// Wall-clock timestamp, formatted `YYYY-MM-DD HH:MM:SS`.
    pub time_str: String,
    /// Composed message text (message plus serialized meta, if any).
    pub message: String,
    /// Display label of the owning logger's region.
    pub region: String,
}

/// Maps a log record to the final display line.
///
/// Invoked once per emitted record, after threshold filtering.
pub type FormatFn = Arc<dyn Fn(&LogRecord) -> String + Send + Sync>;

/// The default display format: `[<level>]: <time> [<region>]<message>`.
pub fn default_format() -> FormatFn {
    Arc::new(|record: &LogRecord| {
        format!(
            "[{}]: {} [{}]{}",
            record.level, record.time_str, record.region, record.message
        )
    })
}

/// Fully resolved logger configuration.
///
/// The configuration store owns one record per namespace as that
/// namespace's defaults; every logger instance owns a private copy,
/// decoupled from the store after creation.
#[derive(Clone)]
pub struct LoggerOptions {
    /// Minimum severity a message needs to be emitted.
    pub level: Severity,
    /// Display format function, invoked once per emitted record.
    pub format: FormatFn,
    /// Whether a console sink is attached.
    pub enable_console: bool,
    /// Whether rotating file sinks are attached.
    pub enable_file: bool,
    /// Directory the file sinks write under.
    pub file_path: String,
    /// Size spec after which the active file rotates, e.g. `20m`.
    pub file_max_size: String,
    /// Retention spec for rotated files, e.g. `30d`.
    pub file_max_date: String,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: Severity::Debug,
            format: default_format(),
            enable_console: true,
            enable_file: false,
            file_path: "logs".to_string(),
            file_max_size: "20m".to_string(),
            file_max_date: "30d".to_string(),
        }
    }
}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("level", &self.level)
            .field("format", &"<fn>")
            .field("enable_console", &self.enable_console)
            .field("enable_file", &self.enable_file)
            .field("file_path", &self.file_path)
            .field("file_max_size", &self.file_max_size)
            .field("file_max_date", &self.file_max_date)
            .finish()
    }
}

/// Partial configuration: every field optional.
///
/// Built with the `with_*` methods and applied with [`LoggerPatch::apply`].
#[derive(Clone, Default)]
pub struct LoggerPatch {
    /// Minimum severity override.
    pub level: Option<Severity>,
    /// Display format override.
    pub format: Option<FormatFn>,
    /// Console sink toggle.
    pub enable_console: Option<bool>,
    /// File sink toggle.
    pub enable_file: Option<bool>,
    /// File sink directory override.
    pub file_path: Option<String>,
    /// Size spec override.
    pub file_max_size: Option<String>,
    /// Retention spec override.
    pub file_max_date: Option<String>,
}

impl LoggerPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum severity.
    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the display format function.
    pub fn with_format<F>(mut self, format: F) -> Self
    where
        F: Fn(&LogRecord) -> String + Send + Sync + 'static,
    {
        self.format = Some(Arc::new(format));
        self
    }

    /// Toggles the console sink.
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.enable_console = Some(enabled);
        self
    }

    /// Toggles the rotating file sinks.
    pub fn with_file(mut self, enabled: bool) -> Self {
        self.enable_file = Some(enabled);
        self
    }

    /// Sets the file sink directory.
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Sets the rotation size spec, e.g. `20m`.
    pub fn with_file_max_size(mut self, spec: impl Into<String>) -> Self {
        self.file_max_size = Some(spec.into());
        self
    }

    /// Sets the retention spec, e.g. `30d`.
    pub fn with_file_max_date(mut self, spec: impl Into<String>) -> Self {
        self.file_max_date = Some(spec.into());
        self
    }

    /// Checks the string-typed specs.
    ///
    /// Called by every configure operation before any state is touched,
    /// so malformed specs fail eagerly instead of at emission time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(spec) = &self.file_max_size {
            parse_size_spec(spec)?;
        }
        if let Some(spec) = &self.file_max_date {
            parse_retention_spec(spec)?;
        }
        Ok(())
    }

    /// Overwrites `target` with every present field; absent fields are
    /// left untouched.
    pub fn apply(&self, target: &mut LoggerOptions) {
        if let Some(level) = self.level {
            target.level = level;
        }
        if let Some(format) = &self.format {
            target.format = format.clone();
        }
        if let Some(enabled) = self.enable_console {
            target.enable_console = enabled;
        }
        if let Some(enabled) = self.enable_file {
            target.enable_file = enabled;
        }
        if let Some(path) = &self.file_path {
            target.file_path = path.clone();
        }
        if let Some(spec) = &self.file_max_size {
            target.file_max_size = spec.clone();
        }
        if let Some(spec) = &self.file_max_date {
            target.file_max_date = spec.clone();
        }
    }
}

impl From<&LoggerOptions> for LoggerPatch {
    /// A full patch: every field present. Applying it makes the target an
    /// exact copy of `options`.
    fn from(options: &LoggerOptions) -> Self {
        Self {
            level: Some(options.level),
            format: Some(options.format.clone()),
            enable_console: Some(options.enable_console),
            enable_file: Some(options.enable_file),
            file_path: Some(options.file_path.clone()),
            file_max_size: Some(options.file_max_size.clone()),
            file_max_date: Some(options.file_max_date.clone()),
        }
    }
}

impl fmt::Debug for LoggerPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerPatch")
            .field("level", &self.level)
            .field("format", &self.format.as_ref().map(|_| "<fn>"))
            .field("enable_console", &self.enable_console)
            .field("enable_file", &self.enable_file)
            .field("file_path", &self.file_path)
            .field("file_max_size", &self.file_max_size)
            .field("file_max_date", &self.file_max_date)
            .finish()
    }
}

/// Retention policy for rotated log files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Remove rotated files older than this many days.
    Days(u32),
    /// Keep only the newest N rotated files.
    Count(u32),
}

static SIZE_SPEC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)(b|k|m|g)?$").expect("size spec pattern"));

static RETENTION_SPEC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)(d)?$").expect("retention spec pattern"));

/// Parses a size spec (`20m`, `512k`, `4096`) into bytes.
pub fn parse_size_spec(spec: &str) -> Result<u64, ConfigError> {
    let invalid = || ConfigError::InvalidSizeSpec(spec.to_string());
    let caps = SIZE_SPEC.captures(spec.trim()).ok_or_else(invalid)?;
    let value: u64 = caps[1].parse().map_err(|_| invalid())?;
    let multiplier: u64 = match caps
        .get(2)
        .map(|suffix| suffix.as_str().to_ascii_lowercase())
        .as_deref()
    {
        None | Some("b") => 1,
        Some("k") => 1 << 10,
        Some("m") => 1 << 20,
        Some("g") => 1 << 30,
        Some(_) => return Err(invalid()),
    };
    value.checked_mul(multiplier).ok_or_else(invalid)
}

/// Parses a retention spec: `30d` keeps thirty days of rotated files, a
/// bare number keeps that many files.
pub fn parse_retention_spec(spec: &str) -> Result<Retention, ConfigError> {
    let invalid = || ConfigError::InvalidRetentionSpec(spec.to_string());
    let caps = RETENTION_SPEC.captures(spec.trim()).ok_or_else(invalid)?;
    let value: u32 = caps[1].parse().map_err(|_| invalid())?;
    Ok(match caps.get(2) {
        Some(_) => Retention::Days(value),
        None => Retention::Count(value),
    })
}
