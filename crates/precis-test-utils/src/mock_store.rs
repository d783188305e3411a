// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blob stores that misbehave on purpose.

use std::sync::atomic::{AtomicUsize, Ordering};

use precis_core::{BlobStore, PrecisError};
use precis_storage::MemoryStore;

/// Wraps a [`MemoryStore`] and rejects every write.
///
/// Reads pass through unless the store was built with [`FailingStore::unreadable`].
/// Write attempts are counted so tests can assert that persistence was tried.
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_reads: bool,
    write_attempts: AtomicUsize,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose reads fail as well.
    pub fn unreadable() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Seed a readable blob, bypassing the failing write path.
    pub fn with_blob(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.inner = self.inner.with_blob(key, value);
        self
    }

    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }
}

impl BlobStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PrecisError> {
        if self.fail_reads {
            return Err(PrecisError::storage(format!("read of '{key}' refused")));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, _value: &[u8]) -> Result<(), PrecisError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        Err(PrecisError::storage(format!("write of '{key}' refused: disk full")))
    }
}
