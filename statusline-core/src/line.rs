//! Index row families.
//!
//! Every index is the same shape (row key → ordered status ids); they differ
//! only in family name and how the row key is derived.

use std::fmt;

/// Column family holding canonical status records.
pub const STATUS_FAMILY: &str = "statuses";

/// One kind of index row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    /// Per-recipient aggregated feed, keyed by follower login
    Timeline,
    /// Per-author feed, keyed by author login
    Userline,
    /// Per-hashtag index, keyed by lowercased tag
    Tagline,
    /// Global per-day index, keyed by day bucket
    Dayline,
    /// Per-user favorites, keyed by favoriting login
    Favline,
}

impl Line {
    pub const ALL: [Line; 5] = [
        Line::Timeline,
        Line::Userline,
        Line::Tagline,
        Line::Dayline,
        Line::Favline,
    ];

    /// Column family name.
    pub fn family(self) -> &'static str {
        match self {
            Line::Timeline => "timeline",
            Line::Userline => "userline",
            Line::Tagline => "tagline",
            Line::Dayline => "dayline",
            Line::Favline => "favline",
        }
    }

    /// Normalize a caller-supplied row key. Tags are case-insensitive.
    pub fn row_key(self, key: &str) -> String {
        match self {
            Line::Tagline => key.to_lowercase(),
            _ => key.to_owned(),
        }
    }

    /// All index family names, for opening a store.
    pub fn families() -> [&'static str; 5] {
        Self::ALL.map(Line::family)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_keys_are_case_folded() {
        assert_eq!(Line::Tagline.row_key("RustLang"), "rustlang");
        assert_eq!(Line::Userline.row_key("Alice"), "Alice");
    }

    #[test]
    fn test_family_names_are_distinct() {
        let families = Line::families();
        for (i, a) in families.iter().enumerate() {
            assert_ne!(*a, STATUS_FAMILY);
            assert!(families[i + 1..].iter().all(|b| a != b));
        }
    }
}
