// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Usage metering and rolling-window analytics for Precis.
//!
//! This crate provides:
//! - **Token estimation**: four characters per token
//! - **Pricing**: two-rate linear cost model with configurable rates
//! - **Usage ledger**: capped, date-keyed per-day records persisted through a
//!   [`precis_core::BlobStore`]
//! - **Views**: all-time aggregate stats and gap-filled day windows
//! - **Tiers**: request-volume service tiers and their rate limits

pub mod estimator;
pub mod ledger;
pub mod observer;
pub mod pricing;
pub mod record;
pub mod reporting;
pub mod tier;
pub mod views;

pub use estimator::{estimate_tokens, estimate_usage};
pub use ledger::{LedgerOptions, UsageLedger, today_utc};
pub use observer::{TierWatch, UsageObserver};
pub use pricing::{ModelPricing, calculate_cost};
pub use record::UsageRecord;
pub use reporting::record_completion;
pub use tier::Tier;
pub use views::{MAX_WINDOW_DAYS, UsageStats, WindowError, aggregate, window};
