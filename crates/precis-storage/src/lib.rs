// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence backends for Precis.
//!
//! Both backends implement [`precis_core::BlobStore`]: a SQLite file with
//! embedded migrations for real use, and an in-memory map for tests and
//! throwaway sessions. [`open_store`] picks one from configuration.

pub mod memory;
pub mod migrations;
pub mod sqlite;

use std::sync::Arc;

use precis_config::model::{StorageBackend, StorageConfig};
use precis_core::{BlobStore, PrecisError};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Open the backend selected by `config.backend`.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn BlobStore>, PrecisError> {
    let store: Arc<dyn BlobStore> = match config.backend {
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(&config.database_path, config.wal_mode)?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    tracing::debug!(backend = store.name(), "blob store ready");
    Ok(store)
}
