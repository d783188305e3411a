// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Precis.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Precis configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PrecisConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Persistence backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Token pricing used for cost estimation.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Usage ledger retention and reporting settings.
    #[serde(default)]
    pub usage: UsageConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name used in CLI output.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "precis".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which blob store backend holds persisted state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite file at `storage.database_path`.
    #[default]
    Sqlite,
    /// Process-local map; nothing survives a restart.
    Memory,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Backend kind.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("precis").join("precis.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("precis.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Two-rate linear pricing, in USD per million tokens.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Cost per million input tokens.
    #[serde(default = "default_input_per_mtok")]
    pub input_per_mtok: f64,

    /// Cost per million output tokens.
    #[serde(default = "default_output_per_mtok")]
    pub output_per_mtok: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            input_per_mtok: default_input_per_mtok(),
            output_per_mtok: default_output_per_mtok(),
        }
    }
}

fn default_input_per_mtok() -> f64 {
    3.0
}

fn default_output_per_mtok() -> f64 {
    15.0
}

/// Longest rolling window, in days, that may be requested.
pub const MAX_WINDOW_DAYS: usize = 366;

/// Usage ledger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UsageConfig {
    /// Maximum number of per-day records kept in the ledger.
    #[serde(default = "default_retention_days")]
    pub retention_days: usize,

    /// Key the ledger is persisted under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Default length of the rolling window shown by `precis window`.
    /// At most [`MAX_WINDOW_DAYS`].
    #[serde(default = "default_window_days")]
    pub window_days: usize,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            storage_key: default_storage_key(),
            window_days: default_window_days(),
        }
    }
}

fn default_retention_days() -> usize {
    90
}

fn default_storage_key() -> String {
    "usageHistory".to_string()
}

fn default_window_days() -> usize {
    7
}
