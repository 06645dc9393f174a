//! Genre label resolution against the configured pattern table.

use std::collections::{BTreeMap, HashMap};

use regex::{Regex, RegexBuilder};

use super::QueryError;

/// Sentinel label meaning "no genre filter".
const ALL_GENRES: &str = "All";

/// Outcome of resolving a genre label.
#[derive(Debug, Clone)]
pub enum GenreFilter {
    /// No constraint (label "All").
    Any,
    /// Records must match the configured pattern.
    Pattern(Regex),
    /// Label not in the table; excludes every record.
    Unknown,
}

impl GenreFilter {
    /// Apply the filter to a stored genre string.
    pub fn matches(&self, genres: &str) -> bool {
        match self {
            GenreFilter::Any => true,
            GenreFilter::Pattern(pattern) => pattern.is_match(genres),
            GenreFilter::Unknown => false,
        }
    }
}

/// Genre patterns precompiled once at startup from the config table.
#[derive(Debug, Clone)]
pub struct GenreResolver {
    patterns: HashMap<String, Regex>,
}

impl GenreResolver {
    /// Compile the label -> pattern-source table.
    pub fn new(table: &BTreeMap<String, String>) -> Result<Self, QueryError> {
        let mut patterns = HashMap::with_capacity(table.len());
        for (label, source) in table {
            let pattern = RegexBuilder::new(source)
                .case_insensitive(true)
                .build()
                .map_err(|e| QueryError::GenrePattern {
                    label: label.clone(),
                    message: e.to_string(),
                })?;
            patterns.insert(label.clone(), pattern);
        }
        Ok(Self { patterns })
    }

    /// Resolve a label to its filter. "All" means no filter; a label that
    /// is not in the table yields a filter matching nothing.
    pub fn resolve(&self, label: &str) -> GenreFilter {
        if label == ALL_GENRES {
            return GenreFilter::Any;
        }
        match self.patterns.get(label) {
            Some(pattern) => GenreFilter::Pattern(pattern.clone()),
            None => GenreFilter::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> GenreResolver {
        let table = [
            ("Comedy".to_string(), "комеди".to_string()),
            ("Drama".to_string(), "драм".to_string()),
        ]
        .into_iter()
        .collect();
        GenreResolver::new(&table).unwrap()
    }

    #[test]
    fn test_all_is_unfiltered() {
        let filter = resolver().resolve("All");
        assert!(matches!(filter, GenreFilter::Any));
        assert!(filter.matches("что угодно"));
    }

    #[test]
    fn test_known_label_filters() {
        let filter = resolver().resolve("Comedy");
        assert!(filter.matches("комедия,драма"));
        assert!(!filter.matches("боевик"));
    }

    #[test]
    fn test_known_label_case_insensitive() {
        let filter = resolver().resolve("Comedy");
        assert!(filter.matches("КОМЕДИЯ"));
    }

    #[test]
    fn test_unknown_label_matches_nothing() {
        let filter = resolver().resolve("Western");
        assert!(matches!(filter, GenreFilter::Unknown));
        assert!(!filter.matches("вестерн"));
    }

    #[test]
    fn test_bad_pattern_is_error() {
        let table = [("Broken".to_string(), "[".to_string())].into_iter().collect();
        let result = GenreResolver::new(&table);
        assert!(matches!(result, Err(QueryError::GenrePattern { .. })));
    }
}
