//! In-memory key store
//!
//! Mirrors registry semantics closely enough for previews and tests:
//! key and value names are case-insensitive, creating a key creates its
//! ancestors, setting a value on a missing key fails and destroying a
//! missing key succeeds. Every call is recorded in order.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{KeyOp, KeyOpKind, KeyPath, KeyStore, KeyStoreError, RegValue};

#[derive(Debug)]
struct StoredKey {
    key: KeyPath,
    values: BTreeMap<String, (String, RegValue)>,
}

#[derive(Debug, Clone)]
struct FailureRule {
    kind: KeyOpKind,
    path_fragment: String,
}

#[derive(Debug, Default)]
struct State {
    keys: BTreeMap<String, StoredKey>,
    calls: Vec<KeyOp>,
    failures: Vec<FailureRule>,
}

/// In-memory registry tree shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyStore {
    state: Arc<Mutex<State>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `kind` call whose key path contains `path_fragment` (case-insensitive)
    pub fn fail_on(&self, kind: KeyOpKind, path_fragment: impl Into<String>) {
        self.lock().failures.push(FailureRule {
            kind,
            path_fragment: path_fragment.into().to_ascii_lowercase(),
        });
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<KeyOp> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn contains_key(&self, key: &KeyPath) -> bool {
        self.lock().keys.contains_key(&normalize(key))
    }

    /// Value `name` on `key`, `""` for the default value
    pub fn value(&self, key: &KeyPath, name: &str) -> Option<RegValue> {
        self.lock()
            .keys
            .get(&normalize(key))
            .and_then(|k| k.values.get(&name.to_ascii_lowercase()))
            .map(|(_, v)| v.clone())
    }

    /// String payload of value `name` on `key`
    pub fn string_value(&self, key: &KeyPath, name: &str) -> Option<String> {
        self.value(key, name).map(|v| v.as_str().to_string())
    }

    /// Names of the values set on `key`, as originally cased
    pub fn value_names(&self, key: &KeyPath) -> Vec<String> {
        self.lock()
            .keys
            .get(&normalize(key))
            .map(|k| k.values.values().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    /// `root` (if present) and every key below it
    pub fn keys_under(&self, root: &KeyPath) -> Vec<KeyPath> {
        self.lock()
            .keys
            .values()
            .filter(|k| root.contains(&k.key))
            .map(|k| k.key.clone())
            .collect()
    }

    /// Every key in the store
    pub fn keys(&self) -> Vec<KeyPath> {
        self.lock().keys.values().map(|k| k.key.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, op: KeyOp) -> Result<MutexGuard<'_, State>, KeyStoreError> {
        let mut state = self.lock();
        let path = op.key().to_string().to_ascii_lowercase();
        let injected = state
            .failures
            .iter()
            .any(|rule| rule.kind == op.kind() && path.contains(&rule.path_fragment));
        let kind = op.kind();
        state.calls.push(op);
        if injected {
            return Err(KeyStoreError::Backend(format!("injected {} failure", kind)));
        }
        Ok(state)
    }
}

fn normalize(key: &KeyPath) -> String {
    key.to_string().to_ascii_lowercase()
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn create_key(&self, key: &KeyPath) -> Result<(), KeyStoreError> {
        let mut state = self.record(KeyOp::create(key.clone()))?;
        let mut current = Some(key.clone());
        while let Some(k) = current {
            if k.path.is_empty() {
                break;
            }
            let parent = k.parent();
            state.keys.entry(normalize(&k)).or_insert_with(|| StoredKey {
                key: k,
                values: BTreeMap::new(),
            });
            current = parent;
        }
        Ok(())
    }

    async fn set_value(
        &self,
        key: &KeyPath,
        name: &str,
        value: &RegValue,
    ) -> Result<(), KeyStoreError> {
        let mut state = self.record(KeyOp::SetValue {
            key: key.clone(),
            name: name.to_string(),
            value: value.clone(),
        })?;
        let stored = state
            .keys
            .get_mut(&normalize(key))
            .ok_or(KeyStoreError::NotFound)?;
        stored
            .values
            .insert(name.to_ascii_lowercase(), (name.to_string(), value.clone()));
        Ok(())
    }

    async fn destroy_key(&self, key: &KeyPath) -> Result<(), KeyStoreError> {
        let mut state = self.record(KeyOp::destroy(key.clone()))?;
        state.keys.retain(|_, stored| !key.contains(&stored.key));
        Ok(())
    }
}
