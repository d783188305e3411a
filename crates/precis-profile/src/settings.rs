// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// Notification and locale settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountSettings {
    pub email_notifications: bool,
    pub daily_digest: bool,
    pub language: String,
    pub timezone: String,
    pub privacy_mode: bool,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            daily_digest: false,
            language: "en".to_string(),
            timezone: "UTC".to_string(),
            privacy_mode: false,
        }
    }
}

impl Document for AccountSettings {
    const KEY: &'static str = "accountSettings";
}
