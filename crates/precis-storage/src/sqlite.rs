// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`BlobStore`] port.
//!
//! Blobs live in a single `kv_store` table keyed by name. Every `set` is one
//! upsert statement, so a reader never observes a half-written value.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use precis_core::{BlobStore, PrecisError};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::migrations::run_migrations;

/// SQLite-backed blob store.
///
/// `rusqlite::Connection` is not `Sync`, so the connection sits behind a
/// mutex; all reads and writes are serialized through it.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: String,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and apply migrations.
    ///
    /// Missing parent directories are created.
    pub fn open(path: &str, wal_mode: bool) -> Result<Self, PrecisError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).map_err(PrecisError::storage)?;
        let store = Self::from_connection(conn, path, wal_mode)?;
        debug!(path, wal_mode, "sqlite blob store opened");
        Ok(store)
    }

    /// Open a private in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Self, PrecisError> {
        let conn = Connection::open_in_memory().map_err(PrecisError::storage)?;
        Self::from_connection(conn, ":memory:", false)
    }

    fn from_connection(mut conn: Connection, path: &str, wal_mode: bool) -> Result<Self, PrecisError> {
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(PrecisError::storage)?;
        if wal_mode {
            let mode: String = conn
                .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
                .map_err(PrecisError::storage)?;
            debug!(journal_mode = %mode, "journal mode set");
        }
        run_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: path.to_string(),
        })
    }

    /// Filesystem path of the database (`:memory:` for in-memory stores).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Current SQLite journal mode, lowercased (e.g. `wal`, `memory`, `delete`).
    pub fn journal_mode(&self) -> Result<String, PrecisError> {
        let conn = self.lock()?;
        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .map_err(PrecisError::storage)?;
        Ok(mode.to_lowercase())
    }

    /// Names of every stored blob, sorted.
    pub fn keys(&self) -> Result<Vec<String>, PrecisError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT key FROM kv_store ORDER BY key")
            .map_err(PrecisError::storage)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(PrecisError::storage)?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(PrecisError::storage)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, PrecisError> {
        self.conn
            .lock()
            .map_err(|_| PrecisError::storage("sqlite connection lock poisoned"))
    }
}

impl BlobStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PrecisError> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get::<_, Vec<u8>>(0),
        )
        .optional()
        .map_err(PrecisError::storage)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), PrecisError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )
        .map_err(PrecisError::storage)?;
        Ok(())
    }
}
