//! Assertion helpers over the in-memory key store

#![allow(dead_code)]

use shellreg_core::{KeyPath, MemoryKeyStore, DEFAULT_VALUE};

/// Assert that `key` exists
pub fn assert_key_exists(store: &MemoryKeyStore, key: &KeyPath) {
    assert!(
        store.contains_key(key),
        "Expected key '{}' to exist; keys: {:?}",
        key,
        store.keys()
    );
}

/// Assert that `key` and everything below it is gone
pub fn assert_key_absent(store: &MemoryKeyStore, key: &KeyPath) {
    let remaining = store.keys_under(key);
    assert!(
        remaining.is_empty(),
        "Expected no keys under '{}', found {:?}",
        key,
        remaining
    );
}

/// Assert the string payload of value `name` on `key`
pub fn assert_value(store: &MemoryKeyStore, key: &KeyPath, name: &str, expected: &str) {
    let actual = store.string_value(key, name);
    assert_eq!(
        actual.as_deref(),
        Some(expected),
        "Unexpected value '{}' on '{}'",
        if name.is_empty() { "(Default)" } else { name },
        key
    );
}

/// Assert the default value of `key`
pub fn assert_default_value(store: &MemoryKeyStore, key: &KeyPath, expected: &str) {
    assert_value(store, key, DEFAULT_VALUE, expected);
}

/// Assert that value `name` was never written on `key`
pub fn assert_no_value(store: &MemoryKeyStore, key: &KeyPath, name: &str) {
    assert!(
        store.value(key, name).is_none(),
        "Expected no value '{}' on '{}'",
        name,
        key
    );
}
