// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic load/update/persist cycle shared by every profile document.

use std::sync::Arc;

use precis_core::{BlobStore, ImportOutcome, PrecisError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// A JSON document stored under a fixed key.
pub trait Document: Serialize + DeserializeOwned + Default + Clone {
    /// Blob key the document is persisted under.
    const KEY: &'static str;
}

/// Owns one document and keeps the store in sync with it.
///
/// Same persistence contract as the usage ledger: reads that fail or return
/// garbage yield the default, writes that fail are logged and swallowed.
pub struct DocumentStore<T: Document> {
    store: Arc<dyn BlobStore>,
    value: T,
}

impl<T: Document> DocumentStore<T> {
    pub fn load(store: Arc<dyn BlobStore>) -> Self {
        let value = match store.get(T::KEY) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(key = T::KEY, error = %e, "persisted document is malformed, using defaults");
                T::default()
            }),
            Ok(None) => {
                debug!(key = T::KEY, "no persisted document, using defaults");
                T::default()
            }
            Err(e) => {
                warn!(key = T::KEY, error = %e, "failed to read document, using defaults");
                T::default()
            }
        };
        Self { store, value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Apply a partial update and persist the result.
    pub fn update(&mut self, apply: impl FnOnce(&mut T)) -> &T {
        apply(&mut self.value);
        self.persist();
        &self.value
    }

    /// Restore defaults and persist them.
    pub fn reset(&mut self) -> &T {
        self.value = T::default();
        info!(key = T::KEY, "document reset to defaults");
        self.persist();
        &self.value
    }

    pub fn export(&self) -> Result<String, PrecisError> {
        Ok(serde_json::to_string_pretty(&self.value)?)
    }

    /// Replace the document with `json`. Invalid input leaves it untouched.
    pub fn import(&mut self, json: &str) -> ImportOutcome {
        match serde_json::from_str::<T>(json) {
            Ok(value) => {
                self.value = value;
                info!(key = T::KEY, "document imported");
                self.persist();
                ImportOutcome::succeeded("Preferences imported successfully")
            }
            Err(e) => {
                warn!(key = T::KEY, error = %e, "rejected document import");
                ImportOutcome::failed("Invalid JSON format")
            }
        }
    }

    fn persist(&self) {
        let result = serde_json::to_vec(&self.value)
            .map_err(PrecisError::from)
            .and_then(|bytes| self.store.set(T::KEY, &bytes));
        if let Err(e) = result {
            warn!(key = T::KEY, backend = self.store.name(), error = %e, "failed to persist document");
        }
    }
}

impl<T: Document + std::fmt::Debug> std::fmt::Debug for DocumentStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("key", &T::KEY)
            .field("backend", &self.store.name())
            .field("value", &self.value)
            .finish()
    }
}
