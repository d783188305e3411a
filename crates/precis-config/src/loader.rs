// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./precis.toml` > `~/.config/precis/precis.toml` > `/etc/precis/precis.toml`
//! with environment variable overrides via `PRECIS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PrecisConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/precis/precis.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "precis.toml";

/// Sections whose env vars are mapped to dotted keys.
const SECTIONS: &[&str] = &["app", "storage", "pricing", "usage"];

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("precis").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/precis/precis.toml` (system-wide)
/// 3. `~/.config/precis/precis.toml` (user XDG config)
/// 4. `./precis.toml` (local directory)
/// 5. `PRECIS_*` environment variables
pub fn load_config() -> Result<PrecisConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PrecisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PrecisConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PrecisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PrecisConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PrecisConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider mapping `PRECIS_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `PRECIS_USAGE_RETENTION_DAYS` maps to `usage.retention_days`.
fn env_provider() -> Env {
    Env::prefixed("PRECIS_").map(|key| {
        let key_str = key.as_str();
        SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key_str.to_string())
            .into()
    })
}
