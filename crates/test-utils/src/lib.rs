//! # Relay Test Utilities
//!
//! Shared test infrastructure for the Relay authoring crates.
//!
//! - [`cursor`] - Cursor position extraction for refactor tests
//! - [`fixtures`] - The shared test schema
//! - [`squash`] - Whitespace-insensitive comparison of printed GraphQL

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_raw_string_hashes)]

pub mod cursor;
pub mod fixtures;

pub use cursor::{extract_cursor, extract_cursors};
pub use fixtures::{schema_from, test_schema, TEST_SCHEMA};

/// Strip whitespace and commas so printed GraphQL can be compared without
/// depending on the printer's line breaks.
///
/// ```
/// use relay_test_utils::squash;
///
/// assert_eq!(squash("query Q {\n  a, b\n}"), squash("query Q { a b }"));
/// ```
pub fn squash(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect()
}

/// Assert that `haystack` contains `needle`, ignoring whitespace and commas.
#[track_caller]
pub fn assert_contains_squashed(haystack: &str, needle: &str) {
    assert!(
        squash(haystack).contains(&squash(needle)),
        "expected to find\n{needle}\nin\n{haystack}"
    );
}
