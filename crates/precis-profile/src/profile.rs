// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Display identity of the local user.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::document::Document;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub avatar: String,
    /// Milliseconds since the Unix epoch.
    pub account_created: i64,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "AI User".to_string(),
            email: "user@example.com".to_string(),
            bio: String::new(),
            avatar: "/images/cool-dog.webp".to_string(),
            account_created: Utc::now().timestamp_millis(),
        }
    }
}

impl Document for UserProfile {
    const KEY: &'static str = "userProfile";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let before = Utc::now().timestamp_millis();
        let profile = UserProfile::default();
        assert_eq!(profile.name, "AI User");
        assert_eq!(profile.email, "user@example.com");
        assert_eq!(profile.avatar, "/images/cool-dog.webp");
        assert!(profile.account_created >= before);
    }

    #[test]
    fn reads_front_end_layout() {
        let json = r#"{"name":"Ada","email":"ada@example.com","bio":"hi","avatar":"/a.png","accountCreated":1700000000000}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.account_created, 1_700_000_000_000);
    }
}
