// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-day usage bucket.

use chrono::NaiveDate;
use precis_core::TokenUsage;
use serde::{Deserialize, Serialize};

/// Usage attributed to one calendar day.
///
/// Serialized with camelCase keys and a `YYYY-MM-DD` date, the layout the
/// browser front end stored under `usageHistory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub date: NaiveDate,
    pub requests: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    /// Estimated cost in USD.
    pub estimated_cost: f64,
}

impl UsageRecord {
    /// A zero-valued record, used to fill gaps in windowed views.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            requests: 0,
            input_tokens: 0,
            output_tokens: 0,
            estimated_cost: 0.0,
        }
    }

    pub(crate) fn new(date: NaiveDate, requests: u64, usage: TokenUsage, cost: f64) -> Self {
        let mut record = Self::empty(date);
        record.absorb(requests, usage, cost);
        record
    }

    /// Add another observation to this day. Every field accumulates.
    pub(crate) fn absorb(&mut self, requests: u64, usage: TokenUsage, cost: f64) {
        self.requests = self.requests.saturating_add(requests);
        self.input_tokens = self.input_tokens.saturating_add(usage.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(usage.output_tokens);
        self.estimated_cost += cost;
    }
}
