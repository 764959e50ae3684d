//! Namespace and region identity tokens.
//!
//! Tokens are opaque identities: two tokens constructed from equal label
//! text are still distinct, because identity lives in a per-construction
//! UUID rather than in the label. Equality and hashing consider only the
//! UUID. Each process has one well-known `global` namespace and one
//! well-known `global` region, created once and reused whenever a caller
//! omits an explicit identity.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};
use uuid::Uuid;

static GLOBAL_NAMESPACE: LazyLock<Namespace> = LazyLock::new(|| Namespace {
    id: Uuid::nil(),
    label: Arc::from("global"),
});

static GLOBAL_REGION: LazyLock<Region> = LazyLock::new(|| Region {
    id: Uuid::nil(),
    label: Arc::from("global"),
});

/// Isolation domain for a group of loggers sharing one configuration
/// baseline.
#[derive(Debug, Clone)]
pub struct Namespace {
    id: Uuid,
    label: Arc<str>,
}

impl Namespace {
    /// Creates a fresh namespace identity with the given display label.
    ///
    /// Every call returns a distinct identity, even for equal labels.
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self {
            id: Uuid::now_v7(),
            label: label.into(),
        }
    }

    /// The well-known default namespace.
    pub fn global() -> Self {
        GLOBAL_NAMESPACE.clone()
    }

    /// Returns the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether this token is the well-known default namespace.
    pub fn is_global(&self) -> bool {
        self.id.is_nil()
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Namespace {}

impl Hash for Namespace {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Sub-identity within a namespace; one logger instance exists per
/// (namespace, region) pair.
#[derive(Debug, Clone)]
pub struct Region {
    id: Uuid,
    label: Arc<str>,
}

impl Region {
    /// Creates a fresh region identity with the given display label.
    ///
    /// Every call returns a distinct identity, even for equal labels.
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self {
            id: Uuid::now_v7(),
            label: label.into(),
        }
    }

    /// The well-known default region.
    pub fn global() -> Self {
        GLOBAL_REGION.clone()
    }

    /// Returns the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether this token is the well-known default region.
    pub fn is_global(&self) -> bool {
        self.id.is_nil()
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Region {}

impl Hash for Region {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
