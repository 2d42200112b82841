//! Category-list parsing for project creation.
//!
//! Categories arrive as one comma-separated string from the creation form.
//! Policy: split on commas, trim surrounding whitespace, drop empty entries.
//! Duplicates and ordering are preserved as submitted.

/// Parse the comma-separated category field into an ordered label list.
pub fn parse_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_trim() {
        assert_eq!(parse_categories("A, B ,C"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty_entries_dropped() {
        assert_eq!(parse_categories(" A ,, B , "), vec!["A", "B"]);
        assert!(parse_categories("").is_empty());
        assert!(parse_categories(" , ,").is_empty());
    }

    #[test]
    fn test_duplicates_and_order_preserved() {
        assert_eq!(parse_categories("B,A,B"), vec!["B", "A", "B"]);
    }
}
