//! Error types for shellreg-core

use thiserror::Error;

use crate::keystore::{KeyOpKind, KeyStoreError};
use crate::types::Verb;

/// Result type alias using shellreg-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for shell registration
#[derive(Error, Debug)]
pub enum Error {
    /// A shell verb was installed before being attached to a ProgId
    #[error("Shell option '{verb}' must be part of a ProgId before it can be installed")]
    UnboundShellOption { verb: Verb },

    /// A shell verb was bound to a second ProgId (or twice to the same one)
    #[error("Shell option '{verb}' is already bound to ProgId '{prog_id}'")]
    AlreadyBound { verb: Verb, prog_id: String },

    /// The derived ProgId cannot be used as a registry key name
    #[error("Invalid ProgId '{id}': {reason}")]
    InvalidProgId { id: String, reason: String },

    /// A key store primitive failed
    #[error("Registry {op} failed for {path}: {source}")]
    KeyStore {
        op: KeyOpKind,
        path: String,
        #[source]
        source: KeyStoreError,
    },

    /// Manifest file not found
    #[error("Manifest file not found: {path}")]
    ManifestNotFound { path: String },

    /// Manifest content is structurally valid YAML but semantically wrong
    #[error("Invalid manifest: {message}")]
    InvalidManifest { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unbound shell option error
    pub fn unbound(verb: Verb) -> Self {
        Self::UnboundShellOption { verb }
    }

    /// Create an already-bound error
    pub fn already_bound(verb: Verb, prog_id: impl Into<String>) -> Self {
        Self::AlreadyBound {
            verb,
            prog_id: prog_id.into(),
        }
    }

    /// Create an invalid ProgId error
    pub fn invalid_prog_id(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProgId {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a key store failure with the operation and path it happened on
    pub fn key_store(op: KeyOpKind, path: impl Into<String>, source: KeyStoreError) -> Self {
        Self::KeyStore {
            op,
            path: path.into(),
            source,
        }
    }

    /// Create a manifest not found error
    pub fn manifest_not_found(path: impl Into<String>) -> Self {
        Self::ManifestNotFound { path: path.into() }
    }

    /// Create an invalid manifest error
    pub fn invalid_manifest(message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            message: message.into(),
        }
    }

    /// Whether this error came from the key store rather than the caller's model
    pub fn is_key_store(&self) -> bool {
        matches!(self, Self::KeyStore { .. })
    }
}
