//! Registry-backed key store for Windows

use std::io;

use async_trait::async_trait;
use tracing::trace;
use winreg::enums::{HKEY_CLASSES_ROOT, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_SET_VALUE};
use winreg::RegKey;

use super::{KeyPath, KeyStore, KeyStoreError, RegValue};
use crate::types::Hive;

/// Key store that writes to the live Windows registry
///
/// `winreg` calls block, so each primitive runs on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsKeyStore;

impl WindowsKeyStore {
    pub fn new() -> Self {
        Self
    }
}

fn root(hive: Hive) -> RegKey {
    match hive {
        Hive::CurrentUser => RegKey::predef(HKEY_CURRENT_USER),
        Hive::LocalMachine => RegKey::predef(HKEY_LOCAL_MACHINE),
        Hive::ClassesRoot => RegKey::predef(HKEY_CLASSES_ROOT),
    }
}

fn map_io(err: io::Error) -> KeyStoreError {
    match err.kind() {
        io::ErrorKind::NotFound => KeyStoreError::NotFound,
        io::ErrorKind::PermissionDenied => KeyStoreError::AccessDenied,
        _ => KeyStoreError::Io(err),
    }
}

async fn blocking<F>(f: F) -> Result<(), KeyStoreError>
where
    F: FnOnce() -> io::Result<()> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| KeyStoreError::Backend(format!("registry task failed: {}", e)))?
        .map_err(map_io)
}

#[async_trait]
impl KeyStore for WindowsKeyStore {
    fn name(&self) -> &'static str {
        "windows-registry"
    }

    async fn create_key(&self, key: &KeyPath) -> Result<(), KeyStoreError> {
        let key = key.clone();
        blocking(move || {
            root(key.hive).create_subkey(&key.path)?;
            trace!("created {}", key);
            Ok(())
        })
        .await
    }

    async fn set_value(
        &self,
        key: &KeyPath,
        name: &str,
        value: &RegValue,
    ) -> Result<(), KeyStoreError> {
        let key = key.clone();
        let name = name.to_string();
        let value = value.clone();
        blocking(move || {
            let opened = root(key.hive).open_subkey_with_flags(&key.path, KEY_SET_VALUE)?;
            match value {
                RegValue::Sz(data) => opened.set_value(&name, &data),
            }
        })
        .await
    }

    async fn destroy_key(&self, key: &KeyPath) -> Result<(), KeyStoreError> {
        let key = key.clone();
        blocking(move || match root(key.hive).delete_subkey_all(&key.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        })
        .await
    }
}
