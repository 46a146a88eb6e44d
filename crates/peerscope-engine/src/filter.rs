//! Record filters.
//!
//! The ranking engine accepts any [`RecordFilter`]; closures qualify through
//! the blanket impl. [`SearchQuery`] is the case-insensitive substring search
//! used by the search boxes.

use peerscope_data::Record;

/// Predicate over records.
pub trait RecordFilter {
    /// Whether the record passes the filter.
    fn matches(&self, record: &Record) -> bool;
}

impl<F> RecordFilter for F
where
    F: Fn(&Record) -> bool,
{
    fn matches(&self, record: &Record) -> bool {
        self(record)
    }
}

/// Which text fields a search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Symbol, short name and long name
    Names,
    /// Names plus sector and industry
    #[default]
    All,
}

/// Case-insensitive substring search over a record's text fields.
///
/// A blank query matches every record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    needle: String,
    scope: SearchScope,
}

impl SearchQuery {
    /// Search symbol, names, sector and industry.
    pub fn new(text: &str) -> Self {
        Self::with_scope(text, SearchScope::All)
    }

    /// Search symbol and names only.
    pub fn names(text: &str) -> Self {
        Self::with_scope(text, SearchScope::Names)
    }

    /// Search with an explicit scope.
    pub fn with_scope(text: &str, scope: SearchScope) -> Self {
        Self {
            needle: text.trim().to_lowercase(),
            scope,
        }
    }

    /// Whether the query is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    /// The normalized (trimmed, lowercased) query text.
    pub fn text(&self) -> &str {
        &self.needle
    }

    fn contains(&self, haystack: Option<&str>) -> bool {
        haystack.is_some_and(|h| h.to_lowercase().contains(&self.needle))
    }
}

impl RecordFilter for SearchQuery {
    fn matches(&self, record: &Record) -> bool {
        if self.is_blank() {
            return true;
        }

        let by_name = self.contains(Some(&record.symbol))
            || self.contains(record.short_name.as_deref())
            || self.contains(record.long_name.as_deref());

        match self.scope {
            SearchScope::Names => by_name,
            SearchScope::All => {
                by_name
                    || self.contains(record.sector.as_deref())
                    || self.contains(record.industry.as_deref())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn apple() -> Record {
        Record::new("AAPL")
            .with_short_name("Apple Inc.")
            .with_long_name("Apple Inc.")
            .with_classification("Technology", "Consumer Electronics")
    }

    #[rstest]
    #[case("aapl", true)]
    #[case("AAP", true)]
    #[case("apple", true)]
    #[case("  INC. ", true)]
    #[case("technology", true)]
    #[case("electronics", true)]
    #[case("energy", false)]
    #[case("", true)]
    fn test_search_all_fields(#[case] query: &str, #[case] expected: bool) {
        assert_eq!(SearchQuery::new(query).matches(&apple()), expected);
    }

    #[test]
    fn test_names_scope_ignores_sector() {
        let query = SearchQuery::names("technology");
        assert!(!query.matches(&apple()));
        assert!(SearchQuery::names("apple").matches(&apple()));
    }

    #[test]
    fn test_missing_fields_do_not_match() {
        let record = Record::new("XYZ");
        assert!(!SearchQuery::new("tech").matches(&record));
    }

    #[test]
    fn test_closure_filter() {
        let only_tech = |r: &Record| r.sector.as_deref() == Some("Technology");
        assert!(only_tech.matches(&apple()));
        assert!(!only_tech.matches(&Record::new("XOM")));
    }
}
