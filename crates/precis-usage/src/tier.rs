// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service tier classification from cumulative request volume.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Service tier, ordered from lowest to highest volume.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum Tier {
    #[strum(serialize = "Tier 1")]
    #[serde(rename = "Tier 1")]
    Tier1,
    #[strum(serialize = "Tier 2")]
    #[serde(rename = "Tier 2")]
    Tier2,
    #[strum(serialize = "Tier 3")]
    #[serde(rename = "Tier 3")]
    Tier3,
    #[strum(serialize = "Tier 4")]
    #[serde(rename = "Tier 4")]
    Tier4,
}

/// Inclusive request ceilings for every tier below the top one.
const TIER_CEILINGS: [(u64, Tier); 3] = [
    (100, Tier::Tier1),
    (1_000, Tier::Tier2),
    (10_000, Tier::Tier3),
];

impl Tier {
    /// Classify a cumulative request count.
    pub fn classify(total_requests: u64) -> Self {
        TIER_CEILINGS
            .iter()
            .find(|(ceiling, _)| total_requests <= *ceiling)
            .map_or(Tier::Tier4, |(_, tier)| *tier)
    }

    /// Requests-per-minute ceiling granted at this tier.
    pub fn rate_limit(self) -> u32 {
        match self {
            Tier::Tier1 => 50,
            Tier::Tier2 => 1_000,
            Tier::Tier3 => 2_000,
            Tier::Tier4 => 5_000,
        }
    }
}
