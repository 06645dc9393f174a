//! Query translation - turning loose request parameters into a storage
//! query specification.
//!
//! Parameters arrive as untyped strings; a dedicated parsing step applies
//! the defaulting rules, then the builder compiles genre and keyword
//! filters and the sort/pagination spec the store executes.

mod builder;
mod genres;
mod keywords;

pub use builder::{ListParams, MovieFilter, QuerySpec, RawListParams, SortField, SortOrder, SortSpec};
pub use genres::{GenreFilter, GenreResolver};
pub use keywords::KeywordFilter;

use thiserror::Error;

/// Errors from query compilation.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid keyword pattern: {0}")]
    KeywordPattern(String),

    #[error("Invalid genre pattern for '{label}': {message}")]
    GenrePattern { label: String, message: String },
}
