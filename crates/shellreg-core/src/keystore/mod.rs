//! Key store abstraction
//!
//! The three registry primitives every registration is built from:
//! create a key (and its missing ancestors), set a named value, destroy a
//! key subtree. Implementations:
//!
//! - [`MemoryKeyStore`]: in-memory tree used for tests and dry-run previews
//! - `WindowsKeyStore`: the real registry, Windows targets only

mod memory;
#[cfg(windows)]
mod windows;

pub use memory::MemoryKeyStore;
#[cfg(windows)]
pub use windows::WindowsKeyStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::Hive;

/// Name of a key's default (unnamed) value
pub const DEFAULT_VALUE: &str = "";

/// Absolute registry key path: a hive plus a `\`-separated subkey path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPath {
    pub hive: Hive,
    pub path: String,
}

impl KeyPath {
    pub fn new(hive: Hive, path: impl Into<String>) -> Self {
        Self {
            hive,
            path: path.into(),
        }
    }

    /// Key `name` inside the hive's classes namespace
    pub fn classes(hive: Hive, name: &str) -> Self {
        Self::new(hive, hive.classes_prefix()).join(name)
    }

    /// Child key path
    pub fn join(&self, child: &str) -> Self {
        let path = if self.path.is_empty() {
            child.to_string()
        } else {
            format!("{}\\{}", self.path, child)
        };
        Self::new(self.hive, path)
    }

    /// Parent key path, `None` at the hive root
    pub fn parent(&self) -> Option<Self> {
        if self.path.is_empty() {
            return None;
        }
        let parent = self.path.rfind('\\').map(|i| &self.path[..i]).unwrap_or("");
        Some(Self::new(self.hive, parent))
    }

    /// Whether `other` is this key or one of its descendants (case-insensitive)
    pub fn contains(&self, other: &KeyPath) -> bool {
        if self.hive != other.hive {
            return false;
        }
        let this = self.path.to_ascii_lowercase();
        let that = other.path.to_ascii_lowercase();
        this.is_empty() || that == this || that.starts_with(&format!("{}\\", this))
    }
}

impl std::fmt::Display for KeyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.hive.abbrev())
        } else {
            write!(f, "{}\\{}", self.hive.abbrev(), self.path)
        }
    }
}

/// Typed registry value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum RegValue {
    /// `REG_SZ`
    #[serde(rename = "REG_SZ")]
    Sz(String),
}

impl RegValue {
    pub fn sz(value: impl Into<String>) -> Self {
        Self::Sz(value.into())
    }

    /// String payload of the value
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sz(s) => s,
        }
    }
}

/// Kind of key store primitive, used in error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyOpKind {
    Create,
    Set,
    Destroy,
}

impl std::fmt::Display for KeyOpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create key"),
            Self::Set => write!(f, "set value"),
            Self::Destroy => write!(f, "destroy key"),
        }
    }
}

/// One key store call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum KeyOp {
    CreateKey {
        key: KeyPath,
    },
    SetValue {
        key: KeyPath,
        name: String,
        value: RegValue,
    },
    DestroyKey {
        key: KeyPath,
    },
}

impl KeyOp {
    pub fn create(key: KeyPath) -> Self {
        Self::CreateKey { key }
    }

    /// Set a `REG_SZ` value
    pub fn set(key: KeyPath, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetValue {
            key,
            name: name.into(),
            value: RegValue::sz(value),
        }
    }

    pub fn destroy(key: KeyPath) -> Self {
        Self::DestroyKey { key }
    }

    pub fn kind(&self) -> KeyOpKind {
        match self {
            Self::CreateKey { .. } => KeyOpKind::Create,
            Self::SetValue { .. } => KeyOpKind::Set,
            Self::DestroyKey { .. } => KeyOpKind::Destroy,
        }
    }

    pub fn key(&self) -> &KeyPath {
        match self {
            Self::CreateKey { key } | Self::SetValue { key, .. } | Self::DestroyKey { key } => key,
        }
    }

    /// Run the operation against a store, attaching the path and operation to any failure
    pub async fn apply(&self, store: &dyn KeyStore) -> crate::Result<()> {
        debug!("{}", self);
        let result = match self {
            Self::CreateKey { key } => store.create_key(key).await,
            Self::SetValue { key, name, value } => store.set_value(key, name, value).await,
            Self::DestroyKey { key } => store.destroy_key(key).await,
        };
        result.map_err(|e| crate::Error::key_store(self.kind(), self.key().to_string(), e))
    }
}

impl std::fmt::Display for KeyOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateKey { key } => write!(f, "create {}", key),
            Self::SetValue { key, name, value } => {
                let name = if name.is_empty() { "(Default)" } else { name };
                write!(f, "set {} [{}] = {}", key, name, value.as_str())
            }
            Self::DestroyKey { key } => write!(f, "destroy {}", key),
        }
    }
}

/// Failure reported by a key store primitive
#[derive(Error, Debug)]
pub enum KeyStoreError {
    /// The key does not exist
    #[error("key not found")]
    NotFound,

    /// The caller lacks rights on the key
    #[error("access denied")]
    AccessDenied,

    /// Underlying OS error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Store-specific failure
    #[error("{0}")]
    Backend(String),
}

/// Registry primitives consumed by the install orchestration
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Store name for logs
    fn name(&self) -> &'static str;

    /// Create `key` and any missing ancestors; succeeds if it already exists
    async fn create_key(&self, key: &KeyPath) -> Result<(), KeyStoreError>;

    /// Set value `name` (`""` for the default value) on an existing key
    async fn set_value(&self, key: &KeyPath, name: &str, value: &RegValue)
        -> Result<(), KeyStoreError>;

    /// Remove `key` and all of its descendants; succeeds if it is absent
    async fn destroy_key(&self, key: &KeyPath) -> Result<(), KeyStoreError>;
}
