//! Utility modules.

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;

/// Conversion between fully-qualified names and zone-relative RR values.
pub mod names;
