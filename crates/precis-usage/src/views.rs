// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only projections over a [`UsageLedger`].
//!
//! Nothing here is cached or stored; every call recomputes from the ledger.

use chrono::{Days, NaiveDate};
pub use precis_config::model::MAX_WINDOW_DAYS;
use serde::Serialize;
use thiserror::Error;

use crate::ledger::UsageLedger;
use crate::record::UsageRecord;
use crate::tier::Tier;

/// All-time totals over the ledger plus the tier they qualify for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub total_requests: u64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    /// Estimated total cost in USD.
    pub total_cost: f64,
    pub current_tier: Tier,
    pub rate_limit: u32,
}

impl Default for UsageStats {
    fn default() -> Self {
        aggregate(std::iter::empty())
    }
}

/// Sum every record, then classify the request total.
pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a UsageRecord>) -> UsageStats {
    let mut total_requests = 0u64;
    let mut total_input_tokens = 0u64;
    let mut total_output_tokens = 0u64;
    let mut total_cost = 0.0;

    for record in records {
        total_requests = total_requests.saturating_add(record.requests);
        total_input_tokens = total_input_tokens.saturating_add(record.input_tokens);
        total_output_tokens = total_output_tokens.saturating_add(record.output_tokens);
        total_cost += record.estimated_cost;
    }

    let current_tier = Tier::classify(total_requests);
    UsageStats {
        total_requests,
        total_input_tokens,
        total_output_tokens,
        total_cost,
        current_tier,
        rate_limit: current_tier.rate_limit(),
    }
}

/// Why a window could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("window of {requested} days exceeds the maximum of {max}", max = MAX_WINDOW_DAYS)]
    TooLong { requested: usize },

    #[error("window of {days} days ending {anchor} starts before the earliest supported date")]
    BeforeCalendarStart { days: usize, anchor: NaiveDate },
}

/// One record per day for the `days` days ending at `anchor`, oldest first.
///
/// Days without a ledger entry get a zero-valued record; those are never
/// written back to the ledger. The result always holds exactly `days`
/// records, so windows longer than [`MAX_WINDOW_DAYS`] or reaching before
/// the earliest representable date are rejected.
pub fn window(
    ledger: &UsageLedger,
    days: usize,
    anchor: NaiveDate,
) -> Result<Vec<UsageRecord>, WindowError> {
    if days > MAX_WINDOW_DAYS {
        return Err(WindowError::TooLong { requested: days });
    }
    let Some(back) = days.checked_sub(1) else {
        return Ok(Vec::new());
    };
    let start = anchor
        .checked_sub_days(Days::new(back as u64))
        .ok_or(WindowError::BeforeCalendarStart { days, anchor })?;

    Ok(start
        .iter_days()
        .take(days)
        .map(|date| {
            ledger
                .get(date)
                .cloned()
                .unwrap_or_else(|| UsageRecord::empty(date))
        })
        .collect())
}
