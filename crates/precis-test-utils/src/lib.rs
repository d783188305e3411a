// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Precis integration tests.
//!
//! Provides mock stores and a ledger harness for fast, deterministic tests
//! without touching the user's real data directory.
//!
//! # Components
//!
//! - [`FailingStore`] - Blob store whose writes (and optionally reads) fail
//! - [`MockModel`] - Scripted model call outcomes for reporting tests
//! - [`TestHarness`] - Ledger over a memory or temp-file SQLite store

pub mod harness;
pub mod mock_model;
pub mod mock_store;

pub use harness::{TestHarness, TestHarnessBuilder, day};
pub use mock_model::MockModel;
pub use mock_store::FailingStore;
