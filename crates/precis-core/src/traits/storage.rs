// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence port for named byte blobs.

use crate::error::PrecisError;

/// A generic key-value store of opaque byte blobs.
///
/// The usage ledger and the profile documents serialize their whole state
/// under a single fixed key and read it back at construction. Backends
/// decide how the bytes are stored; callers never see partial writes.
///
/// Several processes may share one backend. The stored value is always a full
/// snapshot, so concurrent writers resolve as last-writer-wins.
pub trait BlobStore: Send + Sync {
    /// Returns the human-readable name of this backend.
    fn name(&self) -> &str;

    /// Reads the blob stored under `key`, or `None` if nothing was written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PrecisError>;

    /// Replaces the blob stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), PrecisError>;
}
