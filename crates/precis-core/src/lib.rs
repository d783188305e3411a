// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Precis workspace.
//!
//! This crate provides the error type, the shared value types and the
//! [`BlobStore`] persistence port that the usage engine and the profile
//! documents are built on. Storage backends implement the port in
//! `precis-storage`.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PrecisError;
pub use traits::BlobStore;
pub use types::{ImportOutcome, TokenUsage};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precis_error_has_all_variants() {
        let _config = PrecisError::Config("test".into());
        let _storage = PrecisError::storage(std::io::Error::other("test"));
        let _serialization = PrecisError::from(
            serde_json::from_str::<u64>("not json").expect_err("should fail"),
        );
        let _io = PrecisError::from(std::io::Error::other("test"));
        let _internal = PrecisError::Internal("test".into());
    }

    #[test]
    fn storage_error_displays_source() {
        let err = PrecisError::storage("disk full");
        assert_eq!(err.to_string(), "storage error: disk full");
    }

    #[test]
    fn token_usage_total() {
        let usage = TokenUsage::new(120, 30);
        assert_eq!(usage.total(), 150);
        assert_eq!(TokenUsage::default().total(), 0);
    }

    #[test]
    fn token_usage_total_saturates() {
        let usage = TokenUsage::new(u64::MAX, 1);
        assert_eq!(usage.total(), u64::MAX);
    }

    #[test]
    fn import_outcome_serializes_flat() {
        let outcome = ImportOutcome::failed("Invalid JSON format");
        let json = serde_json::to_string(&outcome).expect("should serialize");
        assert_eq!(json, r#"{"success":false,"message":"Invalid JSON format"}"#);
        assert!(ImportOutcome::succeeded("ok").success);
    }

    #[test]
    fn blob_store_is_object_safe() {
        fn _assert_blob_store(_store: &dyn BlobStore) {}
    }
}
