// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History of generated summaries.
//!
//! Entries are kept newest first under the `summaryHistory` key. Loading
//! falls back to an empty history and every mutation rewrites the whole list,
//! the same contract as [`DocumentStore`](crate::DocumentStore).

use std::sync::Arc;

use chrono::Utc;
use precis_core::{BlobStore, PrecisError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A stored summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: String,
    pub original_text: String,
    pub summary: String,
    /// Words in the original text.
    pub word_count: u64,
    /// Requested summary length in sentences.
    pub summary_length: u32,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub is_saved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_mode: Option<bool>,
}

/// A summary before it is assigned an id and timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSummary {
    pub original_text: String,
    pub summary: String,
    pub word_count: u64,
    pub summary_length: u32,
    pub is_saved: bool,
    pub tags: Option<Vec<String>>,
    pub demo_mode: Option<bool>,
}

impl NewSummary {
    /// Unsaved entry with `word_count` taken from the whitespace-separated
    /// words of `original_text`.
    pub fn new(original_text: impl Into<String>, summary: impl Into<String>, summary_length: u32) -> Self {
        let original_text = original_text.into();
        Self {
            word_count: original_text.split_whitespace().count() as u64,
            original_text,
            summary: summary.into(),
            summary_length,
            ..Self::default()
        }
    }
}

/// Totals over the whole history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total: usize,
    pub saved: usize,
    pub total_words: u64,
}

pub struct SummaryHistory {
    store: Arc<dyn BlobStore>,
    entries: Vec<Summary>,
}

impl SummaryHistory {
    /// Blob key the history is persisted under.
    pub const KEY: &'static str = "summaryHistory";

    /// Load the persisted history. Missing, unreadable or malformed data
    /// gives an empty history.
    pub fn load(store: Arc<dyn BlobStore>) -> Self {
        let entries = match store.get(Self::KEY) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(key = Self::KEY, error = %e, "persisted summary history is malformed, starting empty");
                Vec::new()
            }),
            Ok(None) => {
                debug!(key = Self::KEY, "no persisted summary history");
                Vec::new()
            }
            Err(e) => {
                warn!(key = Self::KEY, error = %e, "failed to read summary history, starting empty");
                Vec::new()
            }
        };
        Self { store, entries }
    }

    /// Newest first.
    pub fn entries(&self) -> &[Summary] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Summary> {
        self.entries.iter().find(|s| s.id == id)
    }

    pub fn saved(&self) -> impl Iterator<Item = &Summary> + '_ {
        self.entries.iter().filter(|s| s.is_saved)
    }

    pub fn stats(&self) -> SummaryStats {
        SummaryStats {
            total: self.entries.len(),
            saved: self.saved().count(),
            total_words: self
                .entries
                .iter()
                .fold(0u64, |acc, s| acc.saturating_add(s.word_count)),
        }
    }

    /// Assign an id and timestamp and prepend the entry.
    pub fn add(&mut self, new: NewSummary) -> Summary {
        let summary = Summary {
            id: Uuid::new_v4().to_string(),
            original_text: new.original_text,
            summary: new.summary,
            word_count: new.word_count,
            summary_length: new.summary_length,
            timestamp: Utc::now().timestamp_millis(),
            is_saved: new.is_saved,
            tags: new.tags,
            demo_mode: new.demo_mode,
        };
        self.entries.insert(0, summary.clone());
        info!(id = %summary.id, words = summary.word_count, "summary added to history");
        self.persist();
        summary
    }

    /// Flip the saved flag. Returns the new value, or `None` for an unknown id.
    pub fn toggle_save(&mut self, id: &str) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|s| s.id == id)?;
        entry.is_saved = !entry.is_saved;
        let saved = entry.is_saved;
        self.persist();
        Some(saved)
    }

    /// Remove an entry. Returns whether it existed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn clear(&mut self) {
        let cleared = self.entries.len();
        self.entries.clear();
        info!(cleared, "summary history cleared");
        self.persist();
    }

    /// Attach `tag` unless the entry already carries it. Returns whether the
    /// tag was added.
    pub fn add_tag(&mut self, id: &str, tag: &str) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        let tags = entry.tags.get_or_insert_with(Vec::new);
        if tags.iter().any(|t| t == tag) {
            return false;
        }
        tags.push(tag.to_string());
        self.persist();
        true
    }

    /// Detach `tag`. Returns whether it was present.
    pub fn remove_tag(&mut self, id: &str, tag: &str) -> bool {
        let Some(tags) = self
            .entries
            .iter_mut()
            .find(|s| s.id == id)
            .and_then(|s| s.tags.as_mut())
        else {
            return false;
        };
        let before = tags.len();
        tags.retain(|t| t != tag);
        let removed = tags.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn export(&self) -> Result<String, PrecisError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    fn persist(&self) {
        let result = serde_json::to_vec(&self.entries)
            .map_err(PrecisError::from)
            .and_then(|bytes| self.store.set(Self::KEY, &bytes));
        if let Err(e) = result {
            warn!(key = Self::KEY, backend = self.store.name(), error = %e, "failed to persist summary history");
        }
    }
}

impl std::fmt::Debug for SummaryHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryHistory")
            .field("backend", &self.store.name())
            .field("entries", &self.entries.len())
            .finish()
    }
}
