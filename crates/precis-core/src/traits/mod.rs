// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Port traits implemented by the storage backends.

pub mod storage;

pub use storage::BlobStore;
