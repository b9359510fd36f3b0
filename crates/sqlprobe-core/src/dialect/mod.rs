//! SQL dialect support.
//!
//! The tokenizer rules are shared by every Firebird version; what differs is
//! the set of reserved words. This module provides a trait for that set.

mod firebird;

use core::cmp::Ordering;

pub use firebird::{FirebirdReservedWords, UnknownVersionError};

/// Trait for the reserved words of a dialect version.
pub trait ReservedWords {
    /// Returns the name of the dialect version.
    fn name(&self) -> &'static str;

    /// Returns true if `word` is reserved (case-insensitive).
    fn is_reserved_word(&self, word: &str) -> bool;
}

/// Binary search of `word` in a table of upper case words sorted in byte order.
pub(crate) fn find_ignore_case(table: &[&str], word: &str) -> bool {
    table
        .binary_search_by(|probe| compare_upper(probe, word))
        .is_ok()
}

fn compare_upper(upper: &str, word: &str) -> Ordering {
    upper
        .bytes()
        .cmp(word.bytes().map(|b| b.to_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_ignore_case() {
        let table = ["AND", "CHAR", "CHARACTER", "CHAR_LENGTH", "RDB$DB_KEY"];
        assert!(find_ignore_case(&table, "char_length"));
        assert!(find_ignore_case(&table, "Character"));
        assert!(find_ignore_case(&table, "rdb$db_key"));
        assert!(!find_ignore_case(&table, "chars"));
        assert!(!find_ignore_case(&table, ""));
    }

    #[test]
    fn test_dialect_name() {
        assert_eq!(FirebirdReservedWords::Firebird40.name(), "firebird-4.0");
    }
}
