//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

pub(crate) mod alidns;
