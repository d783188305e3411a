// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capacity-bounded, date-keyed usage ledger persisted through a [`BlobStore`].
//!
//! Each calendar day owns at most one [`UsageRecord`]. Reporting usage for a
//! day that already has a record adds to it in place; a new day is inserted at
//! the head of the ledger. When the ledger grows past its capacity the record
//! inserted longest ago is evicted, regardless of its date.
//!
//! The whole ledger is written to the store after every mutation. Write
//! failures are logged and the in-memory state stays authoritative. A missing
//! or unreadable blob at construction yields an empty ledger.
//!
//! Several processes sharing one store each overwrite the full snapshot, so
//! the last writer wins. Nothing here reconciles concurrent writers.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use precis_config::PrecisConfig;
use precis_core::{BlobStore, ImportOutcome, PrecisError, TokenUsage};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::observer::UsageObserver;
use crate::pricing::ModelPricing;
use crate::record::UsageRecord;
use crate::views::{self, UsageStats, WindowError};

/// Number of per-day records kept by default.
pub const DEFAULT_CAPACITY: usize = 90;

/// Key the ledger is persisted under by default.
pub const DEFAULT_STORAGE_KEY: &str = "usageHistory";

/// Current calendar day in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Construction parameters for a [`UsageLedger`].
#[derive(Debug, Clone)]
pub struct LedgerOptions {
    /// Maximum number of per-day records. Values below 1 are treated as 1.
    pub capacity: usize,
    /// Blob key the ledger is stored under.
    pub storage_key: String,
    /// Rates used to price every recorded call.
    pub pricing: ModelPricing,
}

impl Default for LedgerOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            pricing: ModelPricing::default(),
        }
    }
}

impl LedgerOptions {
    pub fn from_config(config: &PrecisConfig) -> Self {
        Self {
            capacity: config.usage.retention_days,
            storage_key: config.usage.storage_key.clone(),
            pricing: ModelPricing::from(&config.pricing),
        }
    }
}

/// Why a serialized ledger was rejected.
#[derive(Debug, Error)]
pub enum LedgerDecodeError {
    #[error("Invalid JSON format: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate usage record for {0}")]
    DuplicateDate(NaiveDate),

    #[error("usage record for {0} has a negative estimatedCost")]
    NegativeCost(NaiveDate),
}

/// Parse a serialized ledger, most-recent-first, truncated to `capacity`.
fn decode_records(bytes: &[u8], capacity: usize) -> Result<Vec<UsageRecord>, LedgerDecodeError> {
    let mut records: Vec<UsageRecord> = serde_json::from_slice(bytes)?;
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.date) {
            return Err(LedgerDecodeError::DuplicateDate(record.date));
        }
        if record.estimated_cost < 0.0 {
            return Err(LedgerDecodeError::NegativeCost(record.date));
        }
    }
    if records.len() > capacity {
        debug!(
            loaded = records.len(),
            capacity, "truncating serialized ledger to capacity"
        );
        records.truncate(capacity);
    }
    Ok(records)
}

/// Read the persisted ledger, falling back to empty on any failure.
fn load_records(store: &dyn BlobStore, options: &LedgerOptions) -> Vec<UsageRecord> {
    let key = options.storage_key.as_str();
    match store.get(key) {
        Ok(Some(bytes)) => match decode_records(&bytes, options.capacity) {
            Ok(records) => {
                debug!(key, records = records.len(), "usage ledger loaded");
                records
            }
            Err(e) => {
                warn!(key, error = %e, "persisted usage ledger is malformed, starting empty");
                Vec::new()
            }
        },
        Ok(None) => {
            debug!(key, "no persisted usage ledger, starting empty");
            Vec::new()
        }
        Err(e) => {
            warn!(key, backend = store.name(), error = %e, "failed to read usage ledger, starting empty");
            Vec::new()
        }
    }
}

/// Per-day usage ledger.
///
/// Lookups go through a map keyed by date; `order` holds the dates
/// most-recently-inserted first, so eviction pops from its back.
pub struct UsageLedger {
    store: Arc<dyn BlobStore>,
    options: LedgerOptions,
    records: HashMap<NaiveDate, UsageRecord>,
    order: VecDeque<NaiveDate>,
    observers: Vec<Box<dyn UsageObserver>>,
}

impl UsageLedger {
    /// Load the ledger stored under `options.storage_key`.
    ///
    /// Never fails: an absent, unreadable or malformed blob gives an empty ledger.
    pub fn open(store: Arc<dyn BlobStore>, mut options: LedgerOptions) -> Self {
        options.capacity = options.capacity.max(1);
        let records = load_records(store.as_ref(), &options);
        let mut ledger = Self {
            store,
            options,
            records: HashMap::new(),
            order: VecDeque::new(),
            observers: Vec::new(),
        };
        ledger.replace(records);
        ledger
    }

    /// Open with default capacity, key and pricing.
    pub fn with_defaults(store: Arc<dyn BlobStore>) -> Self {
        Self::open(store, LedgerOptions::default())
    }

    /// Record one successful call made today (UTC).
    pub fn record(&mut self, input_tokens: u64, output_tokens: u64) -> UsageRecord {
        self.record_at(
            today_utc(),
            TokenUsage::new(input_tokens, output_tokens),
            1,
        )
    }

    /// Merge `requests` calls totalling `usage` into the record for `date`.
    ///
    /// Returns the record for `date` after the merge.
    pub fn record_at(&mut self, date: NaiveDate, usage: TokenUsage, requests: u64) -> UsageRecord {
        let cost = self.options.pricing.cost(usage.input_tokens, usage.output_tokens);

        let merged = match self.records.get_mut(&date) {
            Some(existing) => {
                existing.absorb(requests, usage, cost);
                existing.clone()
            }
            None => {
                let record = UsageRecord::new(date, requests, usage, cost);
                self.records.insert(date, record.clone());
                self.order.push_front(date);
                self.evict_overflow();
                record
            }
        };

        info!(
            %date,
            requests,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            cost_usd = cost,
            "usage recorded"
        );

        self.persist();
        self.notify();
        merged
    }

    /// Drop every record and persist the empty ledger.
    pub fn reset(&mut self) {
        let cleared = self.records.len();
        self.records.clear();
        self.order.clear();
        info!(cleared, "usage ledger reset");
        self.persist();
        self.notify();
    }

    /// Replace the ledger with a previously exported payload.
    ///
    /// Malformed JSON, duplicate dates and negative costs are reported as a
    /// failed outcome and leave the ledger untouched.
    pub fn import(&mut self, json: &str) -> ImportOutcome {
        match decode_records(json.as_bytes(), self.options.capacity) {
            Ok(records) => {
                let count = records.len();
                self.replace(records);
                info!(records = count, "usage ledger imported");
                self.persist();
                self.notify();
                ImportOutcome::succeeded(format!("Imported {count} usage records"))
            }
            Err(e) => {
                warn!(error = %e, "rejected usage ledger import");
                ImportOutcome::failed(e.to_string())
            }
        }
    }

    /// Pretty-printed JSON of the current snapshot.
    pub fn export(&self) -> Result<String, PrecisError> {
        let records: Vec<&UsageRecord> = self.iter().collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Register an observer notified after every mutation.
    pub fn subscribe(&mut self, observer: Box<dyn UsageObserver>) {
        self.observers.push(observer);
    }

    /// Records in most-recently-inserted-first order.
    pub fn iter(&self) -> impl Iterator<Item = &UsageRecord> + '_ {
        self.order.iter().filter_map(|date| self.records.get(date))
    }

    /// Owned copy of the records, most-recently-inserted first.
    pub fn snapshot(&self) -> Vec<UsageRecord> {
        self.iter().cloned().collect()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&UsageRecord> {
        self.records.get(&date)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.options.capacity
    }

    pub fn pricing(&self) -> &ModelPricing {
        &self.options.pricing
    }

    /// All-time totals and the resulting tier.
    pub fn stats(&self) -> UsageStats {
        views::aggregate(self.iter())
    }

    /// `days` consecutive records ending at `anchor`, oldest first.
    pub fn window(&self, days: usize, anchor: NaiveDate) -> Result<Vec<UsageRecord>, WindowError> {
        views::window(self, days, anchor)
    }

    /// `days` consecutive records ending today (UTC), oldest first.
    pub fn last_n_days(&self, days: usize) -> Result<Vec<UsageRecord>, WindowError> {
        self.window(days, today_utc())
    }

    pub fn last_7_days(&self) -> Result<Vec<UsageRecord>, WindowError> {
        self.last_n_days(7)
    }

    fn replace(&mut self, records: Vec<UsageRecord>) {
        self.records.clear();
        self.order.clear();
        for record in records {
            self.order.push_back(record.date);
            self.records.insert(record.date, record);
        }
    }

    fn evict_overflow(&mut self) {
        while self.order.len() > self.options.capacity {
            if let Some(oldest) = self.order.pop_back() {
                self.records.remove(&oldest);
                debug!(date = %oldest, "evicted oldest usage record");
            }
        }
    }

    fn persist(&self) {
        let key = self.options.storage_key.as_str();
        let records: Vec<&UsageRecord> = self.iter().collect();
        let result = serde_json::to_vec(&records)
            .map_err(PrecisError::from)
            .and_then(|bytes| self.store.set(key, &bytes));
        if let Err(e) = result {
            warn!(
                key,
                backend = self.store.name(),
                error = %e,
                "failed to persist usage ledger, keeping in-memory state"
            );
        }
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer.on_ledger_change(self);
        }
    }
}

impl std::fmt::Debug for UsageLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageLedger")
            .field("backend", &self.store.name())
            .field("options", &self.options)
            .field("records", &self.order.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
