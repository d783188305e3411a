// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-rate linear pricing and cost calculation.
//!
//! Default rates follow Claude 3.5 Sonnet list pricing:
//! input=$3.00/MTok, output=$15.00/MTok.

use precis_config::model::PricingConfig;
use precis_core::TokenUsage;
use serde::{Deserialize, Serialize};

/// Pricing in USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    /// Cost per million input tokens.
    pub input_per_mtok: f64,
    /// Cost per million output tokens.
    pub output_per_mtok: f64,
}

impl Default for ModelPricing {
    fn default() -> Self {
        Self {
            input_per_mtok: 3.0,
            output_per_mtok: 15.0,
        }
    }
}

impl From<&PricingConfig> for ModelPricing {
    fn from(config: &PricingConfig) -> Self {
        Self {
            input_per_mtok: config.input_per_mtok,
            output_per_mtok: config.output_per_mtok,
        }
    }
}

impl ModelPricing {
    /// Cost in USD of `input_tokens` in and `output_tokens` out.
    pub fn cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        calculate_cost(&TokenUsage::new(input_tokens, output_tokens), self)
    }
}

/// Calculate cost in USD for a given token usage and pricing.
///
/// Formula: sum of (tokens / 1_000_000) * price_per_million for each side.
pub fn calculate_cost(usage: &TokenUsage, pricing: &ModelPricing) -> f64 {
    let input = (usage.input_tokens as f64 / 1_000_000.0) * pricing.input_per_mtok;
    let output = (usage.output_tokens as f64 / 1_000_000.0) * pricing.output_per_mtok;
    input + output
}
