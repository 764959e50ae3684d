//! Severity levels and threshold filtering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ordered logging severity.
///
/// Ordering drives threshold filtering: a message at severity `s` is
/// emitted only when `s` is at or above the configured minimum level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Most verbose level; the default minimum.
    #[default]
    Debug,
    /// General informational messages.
    Info,
    /// Potentially problematic situations.
    Warn,
    /// Failures.
    Error,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// Returns the lowercase label for this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// Checks whether a message at `target` passes a threshold of `self`.
    pub fn enables(&self, target: Severity) -> bool {
        target >= *self
    }

    /// Iterates severities from `self` up to [`Severity::Error`] inclusive.
    ///
    /// Drives the per-severity file sink fan-out: a logger configured at
    /// `info` gets one file sink each for `info`, `warn` and `error`.
    pub fn upwards(self) -> impl Iterator<Item = Severity> {
        Self::ALL.into_iter().filter(move |severity| *severity >= self)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a severity label does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity `{0}`: expected debug, info, warn or error")]
pub struct UnknownSeverity(String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}
