// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user JSON documents persisted next to the usage ledger.
//!
//! Each document type has a fixed storage key and a default. A
//! [`DocumentStore`] loads it once, applies updates in memory and writes the
//! whole document back after every change. [`SummaryHistory`] keeps the list
//! of generated summaries under the same rules.

pub mod document;
pub mod history;
pub mod preferences;
pub mod profile;
pub mod settings;

pub use document::{Document, DocumentStore};
pub use history::{NewSummary, Summary, SummaryHistory, SummaryStats};
pub use preferences::{DateFormat, Theme, UserPreferences};
pub use profile::UserProfile;
pub use settings::AccountSettings;
