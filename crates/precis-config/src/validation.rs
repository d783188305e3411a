// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-negative prices, non-empty keys and a usable retention capacity.

use crate::diagnostic::ConfigError;
use crate::model::{MAX_WINDOW_DAYS, PrecisConfig, StorageBackend};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PrecisConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.app.log_level.trim().to_lowercase().as_str()) {
        fail(format!(
            "app.log_level `{}` is not one of {}",
            config.app.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.storage.backend == StorageBackend::Sqlite
        && config.storage.database_path.trim().is_empty()
    {
        fail("storage.database_path must not be empty".to_string());
    }

    for (name, price) in [
        ("pricing.input_per_mtok", config.pricing.input_per_mtok),
        ("pricing.output_per_mtok", config.pricing.output_per_mtok),
    ] {
        if !price.is_finite() || price < 0.0 {
            fail(format!("{name} must be a non-negative number, got {price}"));
        }
    }

    if config.usage.retention_days == 0 {
        fail("usage.retention_days must be at least 1".to_string());
    }

    if config.usage.window_days == 0 {
        fail("usage.window_days must be at least 1".to_string());
    } else if config.usage.window_days > MAX_WINDOW_DAYS {
        fail(format!(
            "usage.window_days must be at most {MAX_WINDOW_DAYS}, got {}",
            config.usage.window_days
        ));
    }

    if config.usage.storage_key.trim().is_empty() {
        fail("usage.storage_key must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
