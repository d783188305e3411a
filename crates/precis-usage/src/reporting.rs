// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry point for the summarization and description services.
//!
//! A finished model call reports the submitted text and the outcome. Both
//! sides are estimated with [`estimate_tokens`](crate::estimator::estimate_tokens);
//! failed calls are not recorded.

use tracing::debug;

use crate::estimator::estimate_usage;
use crate::ledger::{UsageLedger, today_utc};
use crate::record::UsageRecord;

/// Record a completed model call, or nothing if it failed.
///
/// Returns today's merged record when the call succeeded.
pub fn record_completion<T, E>(
    ledger: &mut UsageLedger,
    prompt: &str,
    outcome: &Result<T, E>,
) -> Option<UsageRecord>
where
    T: AsRef<str>,
    E: std::fmt::Display,
{
    match outcome {
        Ok(response) => {
            let usage = estimate_usage(prompt, response.as_ref());
            Some(ledger.record_at(today_utc(), usage, 1))
        }
        Err(e) => {
            debug!(error = %e, "model call failed, usage not recorded");
            None
        }
    }
}
