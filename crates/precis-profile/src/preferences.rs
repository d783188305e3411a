// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interface preferences.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::document::Document;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "MM/DD/YYYY")]
    #[strum(serialize = "MM/DD/YYYY")]
    MonthDayYear,
    #[serde(rename = "DD/MM/YYYY")]
    #[strum(serialize = "DD/MM/YYYY")]
    DayMonthYear,
    #[serde(rename = "YYYY-MM-DD")]
    #[strum(serialize = "YYYY-MM-DD")]
    Iso,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub theme: Theme,
    /// Target summary length in sentences.
    pub default_summary_length: u32,
    pub auto_save: bool,
    pub show_demo_warnings: bool,
    pub sidebar_default_open: bool,
    pub date_format: DateFormat,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Auto,
            default_summary_length: 10,
            auto_save: false,
            show_demo_warnings: true,
            sidebar_default_open: true,
            date_format: DateFormat::MonthDayYear,
        }
    }
}

impl Document for UserPreferences {
    const KEY: &'static str = "userPreferences";
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn defaults_serialize_like_front_end() {
        let json = serde_json::to_value(UserPreferences::default()).unwrap();
        assert_eq!(json["theme"], "auto");
        assert_eq!(json["defaultSummaryLength"], 10);
        assert_eq!(json["dateFormat"], "MM/DD/YYYY");
        assert_eq!(json["showDemoWarnings"], true);
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let err = serde_json::from_str::<UserPreferences>(r#"{"theme":"sepia"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn parses_display_names() {
        assert_eq!(Theme::from_str("dark").unwrap(), Theme::Dark);
        assert_eq!(DateFormat::from_str("YYYY-MM-DD").unwrap(), DateFormat::Iso);
        assert_eq!(DateFormat::DayMonthYear.to_string(), "DD/MM/YYYY");
    }
}
