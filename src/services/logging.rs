// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Logging utilities for sensitive data redaction.

/// Mask a token for logging.
/// Shows the first four characters and hides the rest: "nHuy***"
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 4 {
        // Too short to reveal anything
        "***".to_string()
    } else {
        format!("{}***", visible)
    }
}

/// Shorten user text for logging, appending "..." when truncated.
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
