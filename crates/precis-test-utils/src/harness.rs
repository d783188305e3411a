// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for ledger integration tests.
//!
//! `TestHarness` owns a [`UsageLedger`] together with the store it persists
//! to, so tests can reopen the ledger or inspect the raw blob.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use precis_core::{BlobStore, PrecisError};
use precis_storage::{MemoryStore, SqliteStore};
use precis_usage::{LedgerOptions, ModelPricing, UsageLedger, UsageRecord};
use tempfile::TempDir;

/// `n` days after 2026-01-01. Fixed so tests do not depend on the clock.
pub fn day(n: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default() + Days::new(n)
}

/// Builder for creating test ledgers with configurable options.
pub struct TestHarnessBuilder {
    options: LedgerOptions,
    sqlite: bool,
    seed: Option<Vec<u8>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            options: LedgerOptions::default(),
            sqlite: false,
            seed: None,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.options.capacity = capacity;
        self
    }

    pub fn with_pricing(mut self, pricing: ModelPricing) -> Self {
        self.options.pricing = pricing;
        self
    }

    /// Persist to a SQLite file in a temp directory instead of memory.
    pub fn with_sqlite(mut self) -> Self {
        self.sqlite = true;
        self
    }

    /// Pre-populate the ledger's storage key with raw bytes.
    pub fn with_persisted(mut self, blob: impl Into<Vec<u8>>) -> Self {
        self.seed = Some(blob.into());
        self
    }

    pub fn build(self) -> Result<TestHarness, PrecisError> {
        let (store, temp_dir): (Arc<dyn BlobStore>, Option<TempDir>) = if self.sqlite {
            let temp_dir = TempDir::new()?;
            let path = temp_dir.path().join("precis.db");
            let store = SqliteStore::open(&path.to_string_lossy(), true)?;
            (Arc::new(store), Some(temp_dir))
        } else {
            (Arc::new(MemoryStore::new()), None)
        };

        if let Some(seed) = &self.seed {
            store.set(&self.options.storage_key, seed)?;
        }

        let ledger = UsageLedger::open(store.clone(), self.options.clone());
        Ok(TestHarness {
            ledger,
            store,
            options: self.options,
            _temp_dir: temp_dir,
        })
    }
}

/// A ledger plus the store behind it.
pub struct TestHarness {
    pub ledger: UsageLedger,
    store: Arc<dyn BlobStore>,
    options: LedgerOptions,
    _temp_dir: Option<TempDir>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// In-memory harness with default options.
    pub fn in_memory() -> Self {
        let store: Arc<dyn BlobStore> = Arc::new(MemoryStore::new());
        let options = LedgerOptions::default();
        Self {
            ledger: UsageLedger::open(store.clone(), options.clone()),
            store,
            options,
            _temp_dir: None,
        }
    }

    pub fn store(&self) -> Arc<dyn BlobStore> {
        self.store.clone()
    }

    /// A fresh ledger loaded from the same store.
    pub fn reopen(&self) -> UsageLedger {
        UsageLedger::open(self.store.clone(), self.options.clone())
    }

    /// Records as currently persisted, or `None` if nothing was written yet.
    pub fn persisted(&self) -> Result<Option<Vec<UsageRecord>>, PrecisError> {
        match self.store.get(&self.options.storage_key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}
