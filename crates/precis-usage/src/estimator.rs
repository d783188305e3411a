// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Character-count token estimation.
//!
//! One token is approximated as four characters. Length is measured in
//! UTF-16 code units, the unit the browser front end counted in, so a
//! character outside the Basic Multilingual Plane counts as two.

use precis_core::TokenUsage;

/// Characters assumed per token.
pub const CHARS_PER_TOKEN: u64 = 4;

/// Estimate the token count of `text` as `ceil(len / 4)`.
pub fn estimate_tokens(text: &str) -> u64 {
    let units = text.encode_utf16().count() as u64;
    units.div_ceil(CHARS_PER_TOKEN)
}

/// Estimate both sides of a model call from the submitted and returned text.
pub fn estimate_usage(prompt: &str, response: &str) -> TokenUsage {
    TokenUsage::new(estimate_tokens(prompt), estimate_tokens(response))
}
