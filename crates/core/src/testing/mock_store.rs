//! Mock movie store for testing.

use std::sync::Mutex;

use crate::query::QuerySpec;
use crate::store::{run_query, MovieStore, StoreError, StoredMovie};

/// Mock implementation of [`MovieStore`].
///
/// Serves records from memory with the same pipeline semantics as the
/// SQLite store, and supports one-shot error injection: a configured
/// error fails the next store call, whichever it is, then clears.
#[derive(Debug, Default)]
pub struct MockMovieStore {
    movies: Mutex<Vec<StoredMovie>>,
    next_error: Mutex<Option<StoreError>>,
}

impl MockMovieStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock store with predefined records.
    pub fn with_movies(movies: Vec<StoredMovie>) -> Self {
        Self {
            movies: Mutex::new(movies),
            next_error: Mutex::new(None),
        }
    }

    /// Replace all records.
    pub fn set_movies(&self, movies: Vec<StoredMovie>) {
        *self.movies.lock().unwrap() = movies;
    }

    /// Configure the next store call to fail with the given error.
    pub fn set_next_error(&self, error: StoreError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    fn take_error(&self) -> Option<StoreError> {
        self.next_error.lock().unwrap().take()
    }
}

impl MovieStore for MockMovieStore {
    fn count(&self) -> Result<u64, StoreError> {
        if let Some(error) = self.take_error() {
            return Err(error);
        }
        Ok(self.movies.lock().unwrap().len() as u64)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<StoredMovie>, StoreError> {
        if let Some(error) = self.take_error() {
            return Err(error);
        }
        let movies = self.movies.lock().unwrap();
        Ok(movies.iter().find(|movie| movie.id == id).cloned())
    }

    fn query(&self, spec: &QuerySpec) -> Result<Vec<StoredMovie>, StoreError> {
        if let Some(error) = self.take_error() {
            return Err(error);
        }
        let movies = self.movies.lock().unwrap();
        run_query(spec, movies.iter().cloned().map(Ok))
    }

    fn insert(&self, movies: &[StoredMovie]) -> Result<u32, StoreError> {
        if let Some(error) = self.take_error() {
            return Err(error);
        }
        let mut stored = self.movies.lock().unwrap();
        let mut added = 0;
        for movie in movies {
            if stored.iter().any(|existing| existing.id == movie.id) {
                continue;
            }
            stored.push(movie.clone());
            added += 1;
        }
        Ok(added)
    }
}
