//! Query assembly from raw request parameters.

use serde::Deserialize;

use super::{GenreFilter, GenreResolver, KeywordFilter, QueryError};

/// Page size used when `limit` is absent, zero or unparseable.
const DEFAULT_LIMIT: i64 = 20;
const DEFAULT_PAGE: i64 = 1;
const DEFAULT_GENRE: &str = "All";

/// List parameters exactly as they arrive on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListParams {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub query_term: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order_by: Option<String>,
}

/// Typed list parameters with the defaulting rules applied.
///
/// Empty strings count as absent, mirroring how the parameters behave in
/// query strings (`?genre=&sort_by=`).
#[derive(Debug, Clone)]
pub struct ListParams {
    pub limit: i64,
    pub page: i64,
    pub genre: String,
    pub query_term: Option<String>,
    pub sort_by: Option<String>,
    pub order_by: Option<String>,
}

impl From<RawListParams> for ListParams {
    fn from(raw: RawListParams) -> Self {
        let limit = raw
            .limit
            .as_deref()
            .and_then(parse_int)
            .filter(|n| *n != 0)
            .unwrap_or(DEFAULT_LIMIT);
        let page = raw
            .page
            .as_deref()
            .and_then(parse_int)
            .unwrap_or(DEFAULT_PAGE);
        Self {
            limit,
            page,
            genre: raw
                .genre
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_GENRE.to_string()),
            query_term: raw.query_term.filter(|s| !s.is_empty()),
            sort_by: raw.sort_by.filter(|s| !s.is_empty()),
            order_by: raw.order_by,
        }
    }
}

fn parse_int(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

/// Sortable record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Year,
    Title,
    Rating,
    /// Insertion timestamp; the target of `date_added` and of every
    /// unrecognized `sort_by` value.
    Created,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

fn sort_spec(sort_by: Option<&str>, order_by: Option<&str>) -> Option<SortSpec> {
    let field = match sort_by? {
        "year" => SortField::Year,
        "title" => SortField::Title,
        "rating" => SortField::Rating,
        // "date_added" and anything unrecognized
        _ => SortField::Created,
    };
    let order = if order_by == Some("asc") {
        SortOrder::Asc
    } else {
        SortOrder::Desc
    };
    Some(SortSpec { field, order })
}

/// Combined record predicate: genre pattern AND title keywords.
#[derive(Debug, Clone)]
pub struct MovieFilter {
    pub genre: GenreFilter,
    pub title: Option<KeywordFilter>,
}

impl MovieFilter {
    pub fn matches(&self, genres: &str, title: &str) -> bool {
        self.genre.matches(genres)
            && self
                .title
                .as_ref()
                .is_none_or(|keywords| keywords.matches(title))
    }
}

/// A complete storage query: filter, optional sort, skip and limit.
///
/// The store executes the stages in the literal order
/// `match -> skip -> limit -> sort`, so the sort orders the already-cut
/// page rather than the whole match set.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub filter: MovieFilter,
    pub sort: Option<SortSpec>,
    pub skip: i64,
    pub limit: i64,
}

impl QuerySpec {
    /// Assemble the storage query from typed parameters.
    pub fn build(params: &ListParams, genres: &GenreResolver) -> Result<Self, QueryError> {
        let title = match &params.query_term {
            Some(term) => Some(KeywordFilter::compile(term)?),
            None => None,
        };
        Ok(Self {
            filter: MovieFilter {
                genre: genres.resolve(&params.genre),
                title,
            },
            sort: sort_spec(params.sort_by.as_deref(), params.order_by.as_deref()),
            skip: params.limit * (params.page - 1),
            limit: params.limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawListParams {
        let mut params = RawListParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "limit" => params.limit = value,
                "page" => params.page = value,
                "genre" => params.genre = value,
                "query_term" => params.query_term = value,
                "sort_by" => params.sort_by = value,
                "order_by" => params.order_by = value,
                other => panic!("unknown param {}", other),
            }
        }
        params
    }

    fn resolver() -> GenreResolver {
        GenreResolver::new(&crate::config::Config::default().genres).unwrap()
    }

    #[test]
    fn test_limit_defaults_to_20() {
        let params = ListParams::from(raw(&[]));
        assert_eq!(params.limit, 20);
    }

    #[test]
    fn test_limit_zero_falls_back() {
        let params = ListParams::from(raw(&[("limit", "0")]));
        assert_eq!(params.limit, 20);
    }

    #[test]
    fn test_limit_unparseable_falls_back() {
        let params = ListParams::from(raw(&[("limit", "plenty")]));
        assert_eq!(params.limit, 20);
    }

    #[test]
    fn test_page_defaults_to_1() {
        let params = ListParams::from(raw(&[]));
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_skip_is_limit_times_page_minus_one() {
        let params = ListParams::from(raw(&[("page", "3"), ("limit", "10")]));
        let spec = QuerySpec::build(&params, &resolver()).unwrap();
        assert_eq!(spec.skip, 20);
        assert_eq!(spec.limit, 10);
    }

    #[test]
    fn test_first_page_has_zero_skip() {
        let params = ListParams::from(raw(&[("limit", "10")]));
        let spec = QuerySpec::build(&params, &resolver()).unwrap();
        assert_eq!(spec.skip, 0);
    }

    #[test]
    fn test_no_sort_when_sort_by_absent() {
        let params = ListParams::from(raw(&[]));
        let spec = QuerySpec::build(&params, &resolver()).unwrap();
        assert!(spec.sort.is_none());
    }

    #[test]
    fn test_known_sort_fields_map_to_themselves() {
        for (value, field) in [
            ("year", SortField::Year),
            ("title", SortField::Title),
            ("rating", SortField::Rating),
        ] {
            let params = ListParams::from(raw(&[("sort_by", value)]));
            let spec = QuerySpec::build(&params, &resolver()).unwrap();
            assert_eq!(spec.sort.unwrap().field, field);
        }
    }

    #[test]
    fn test_unrecognized_sort_field_maps_to_created() {
        for value in ["date_added", "director", "whatever"] {
            let params = ListParams::from(raw(&[("sort_by", value)]));
            let spec = QuerySpec::build(&params, &resolver()).unwrap();
            let sort = spec.sort.unwrap();
            assert_eq!(sort.field, SortField::Created);
            assert_eq!(sort.order, SortOrder::Desc);
        }
    }

    #[test]
    fn test_order_by_asc_flips_direction() {
        let params = ListParams::from(raw(&[("sort_by", "year"), ("order_by", "asc")]));
        let spec = QuerySpec::build(&params, &resolver()).unwrap();
        assert_eq!(spec.sort.unwrap().order, SortOrder::Asc);
    }

    #[test]
    fn test_order_by_other_values_stay_descending() {
        let params = ListParams::from(raw(&[("sort_by", "year"), ("order_by", "desc")]));
        let spec = QuerySpec::build(&params, &resolver()).unwrap();
        assert_eq!(spec.sort.unwrap().order, SortOrder::Desc);
    }

    #[test]
    fn test_genre_defaults_to_all() {
        let params = ListParams::from(raw(&[]));
        assert_eq!(params.genre, "All");
        let spec = QuerySpec::build(&params, &resolver()).unwrap();
        assert!(spec.filter.matches("боевик", "любой фильм"));
    }

    #[test]
    fn test_empty_query_term_means_no_title_filter() {
        let params = ListParams::from(raw(&[("query_term", "")]));
        assert!(params.query_term.is_none());
        let spec = QuerySpec::build(&params, &resolver()).unwrap();
        assert!(spec.filter.title.is_none());
    }

    #[test]
    fn test_query_term_compiles_into_title_filter() {
        let params = ListParams::from(raw(&[("query_term", "брат")]));
        let spec = QuerySpec::build(&params, &resolver()).unwrap();
        assert!(spec.filter.matches("драма", "Брат 2"));
        assert!(!spec.filter.matches("драма", "Сталкер"));
    }

    #[test]
    fn test_malformed_query_term_is_error() {
        let params = ListParams::from(raw(&[("query_term", "(")]));
        let result = QuerySpec::build(&params, &resolver());
        assert!(matches!(result, Err(QueryError::KeywordPattern(_))));
    }

    #[test]
    fn test_genre_and_title_filters_combine() {
        let params = ListParams::from(raw(&[("genre", "Comedy"), ("query_term", "брат")]));
        let spec = QuerySpec::build(&params, &resolver()).unwrap();
        assert!(spec.filter.matches("комедия", "Брат"));
        assert!(!spec.filter.matches("драма", "Брат"));
        assert!(!spec.filter.matches("комедия", "Сталкер"));
    }
}
