//! Movie document store.
//!
//! Records are owned by the store and read-only from the HTTP surface;
//! writes exist only for the seeding path and tests.

mod sqlite;
mod types;

pub use sqlite::SqliteMovieStore;
pub use types::*;

use std::path::Path;

use crate::query::{QuerySpec, SortField, SortOrder, SortSpec};

/// Trait for movie record storage.
pub trait MovieStore: Send + Sync {
    /// Count all stored records.
    fn count(&self) -> Result<u64, StoreError>;

    /// Fetch a single record by identifier equality.
    fn find_by_id(&self, id: i64) -> Result<Option<StoredMovie>, StoreError>;

    /// Execute a list query over records in storage order.
    fn query(&self, spec: &QuerySpec) -> Result<Vec<StoredMovie>, StoreError>;

    /// Insert records, skipping identifiers already present. Returns the
    /// number added. Not reachable over HTTP.
    fn insert(&self, movies: &[StoredMovie]) -> Result<u32, StoreError>;
}

/// Run the `match -> skip -> limit -> sort` pipeline over records in
/// storage order. Stages execute in exactly that order, so the sort
/// orders the already-cut page rather than the whole match set.
///
/// Shared by store implementations so they agree on query semantics.
pub fn run_query<I>(spec: &QuerySpec, records: I) -> Result<Vec<StoredMovie>, StoreError>
where
    I: IntoIterator<Item = Result<StoredMovie, StoreError>>,
{
    if spec.skip < 0 {
        return Err(StoreError::Query(format!("negative skip: {}", spec.skip)));
    }
    if spec.limit < 0 {
        return Err(StoreError::Query(format!("negative limit: {}", spec.limit)));
    }

    let mut page = Vec::new();
    let mut to_skip = spec.skip;
    for record in records {
        let movie = record?;
        if !spec.filter.matches(&movie.genres, &movie.title) {
            continue;
        }
        if to_skip > 0 {
            to_skip -= 1;
            continue;
        }
        if page.len() as i64 >= spec.limit {
            break;
        }
        page.push(movie);
    }

    if let Some(sort) = spec.sort {
        sort_page(&mut page, sort);
    }

    Ok(page)
}

fn sort_page(page: &mut [StoredMovie], sort: SortSpec) {
    page.sort_by(|a, b| {
        let ordering = match sort.field {
            SortField::Year => a.year.cmp(&b.year),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Rating => a.rating.total_cmp(&b.rating),
            SortField::Created => a.created.cmp(&b.created),
        };
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Load records from a JSON seed file into an empty store. A store that
/// already has records is left untouched.
pub fn seed_from_file(store: &dyn MovieStore, path: &Path) -> Result<u32, StoreError> {
    if store.count()? > 0 {
        return Ok(0);
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;
    let movies: Vec<StoredMovie> =
        serde_json::from_str(&raw).map_err(|e| StoreError::Seed(e.to_string()))?;
    store.insert(&movies)
}
