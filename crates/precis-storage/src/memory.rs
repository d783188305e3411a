// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-local [`BlobStore`] backed by a `HashMap`.

use std::collections::HashMap;
use std::sync::RwLock;

use precis_core::{BlobStore, PrecisError};

/// In-memory blob store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a blob, e.g. a persisted ledger from a fixture.
    pub fn with_blob(self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut blobs) = self.blobs.write() {
            blobs.insert(key.into(), value.into());
        }
        self
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.read().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PrecisError> {
        let blobs = self
            .blobs
            .read()
            .map_err(|_| PrecisError::storage("memory store lock poisoned"))?;
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), PrecisError> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| PrecisError::storage("memory store lock poisoned"))?;
        blobs.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn with_blob_seeds_value() {
        let store = MemoryStore::new().with_blob("usageHistory", "[]");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("usageHistory").unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn set_replaces_value() {
        let store = MemoryStore::new();
        store.set("k", b"1").unwrap();
        store.set("k", b"2").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"2".to_vec()));
        assert_eq!(store.len(), 1);
    }
}
