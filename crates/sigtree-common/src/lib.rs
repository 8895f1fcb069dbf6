//! Common types and utilities shared by the sigtree crates.
//!
//! This crate provides foundational items used across all sigtree crates:
//! - Depth limits for descriptor parsing and tree construction
//! - The reserved sentinel name standing in for "no value"

// Centralized limits and thresholds
pub mod limits;

/// Reserved type name used by front ends when no real value is available.
///
/// The parser and comparator treat it as an ordinary name; it only carries
/// meaning for callers that turn values into descriptors.
pub const NULL_TYPE_NAME: &str = "null";

/// Returns `true` if `name` is the reserved "no value" sentinel.
#[inline]
pub fn is_null_type_name(name: &str) -> bool {
    name == NULL_TYPE_NAME
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_recognized() {
        assert!(is_null_type_name("null"));
        assert!(!is_null_type_name("Null"));
        assert!(!is_null_type_name("java.lang.Object"));
    }
}
