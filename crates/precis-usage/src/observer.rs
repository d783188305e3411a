// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Change notification for the usage ledger.

use std::cell::Cell;

use tracing::info;

use crate::ledger::UsageLedger;
use crate::tier::Tier;

/// Receives the ledger synchronously after every record, reset or import.
pub trait UsageObserver: Send {
    fn on_ledger_change(&self, ledger: &UsageLedger);
}

impl<F> UsageObserver for F
where
    F: Fn(&UsageLedger) + Send,
{
    fn on_ledger_change(&self, ledger: &UsageLedger) {
        self(ledger)
    }
}

/// Logs an event whenever the aggregate tier moves.
///
/// The first notification only establishes the baseline unless the watch
/// was seeded with the tier observed at startup.
#[derive(Debug, Default)]
pub struct TierWatch {
    last: Cell<Option<Tier>>,
}

impl TierWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known tier, e.g. `ledger.stats().current_tier`.
    pub fn seeded(tier: Tier) -> Self {
        Self {
            last: Cell::new(Some(tier)),
        }
    }
}

impl UsageObserver for TierWatch {
    fn on_ledger_change(&self, ledger: &UsageLedger) {
        let stats = ledger.stats();
        let previous = self.last.replace(Some(stats.current_tier));
        if let Some(previous) = previous
            && previous != stats.current_tier
        {
            info!(
                from = %previous,
                to = %stats.current_tier,
                rate_limit = stats.rate_limit,
                total_requests = stats.total_requests,
                "usage tier changed"
            );
        }
    }
}
