//! Error types for configuration validation.

use thiserror::Error;

/// Errors raised by configure-time validation of logger options.
///
/// The registry never fails for normal misuse: unknown namespaces and
/// regions are created lazily, and absent patch fields fall back to the
/// active record. The only inputs that can be malformed on a typed
/// surface are the two string file-rotation specs, which are checked
/// before any configuration state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The `file_max_size` spec did not parse.
    #[error("invalid size spec `{0}`: expected digits with an optional b/k/m/g suffix")]
    InvalidSizeSpec(String),

    /// The `file_max_date` spec did not parse.
    #[error("invalid retention spec `{0}`: expected `<days>d` or a bare file count")]
    InvalidRetentionSpec(String),
}
