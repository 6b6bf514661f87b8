// src/utils.rs
// Utility functions module

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

// ============================================================================
// Timestamp utilities
// ============================================================================

/// Get current timestamp in milliseconds
pub fn get_timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

// ============================================================================
// Random identifiers
// ============================================================================

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random lowercase base-36 string of `len` characters
pub fn random_base36(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

// ============================================================================
// String helpers
// ============================================================================

/// Shorten an address to `head...tail` form, counting chars, not bytes.
/// Strings too short to shorten come back unchanged.
pub fn truncate_middle(s: &str, head: usize, tail: usize) -> String {
    let count = s.chars().count();
    if count <= head + tail {
        return s.to_string();
    }
    let start: String = s.chars().take(head).collect();
    let end: String = s.chars().skip(count - tail).collect();
    format!("{}...{}", start, end)
}

/// First `max` chars of `s`, with "..." appended when something was cut
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

/// Sum of the char codes of `s`; used for deterministic palette and balance picks
pub fn char_code_sum(s: &str) -> u64 {
    s.encode_utf16().map(u64::from).sum()
}
