//! Log sanitization utilities
//!
//! Keeps access keys and long record payloads (DKIM keys, ACME tokens) out of
//! debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of an access key ID left visible.
const KEY_VISIBLE_PREFIX: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Strings within `TRUNCATE_LIMIT` bytes are returned unchanged; longer ones
/// are cut on a char boundary and suffixed with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask an access key ID, keeping only a short prefix.
pub fn mask_key(key: &str) -> String {
    let visible = floor_char_boundary(key, KEY_VISIBLE_PREFIX);
    if visible >= key.len() {
        "****".to_string()
    } else {
        format!("{}****", &key[..visible])
    }
}
