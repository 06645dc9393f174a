use std::sync::Arc;

use filmoteka_core::{GenreResolver, MovieStore};

/// Shared application state
pub struct AppState {
    store: Arc<dyn MovieStore>,
    genres: GenreResolver,
}

impl AppState {
    pub fn new(store: Arc<dyn MovieStore>, genres: GenreResolver) -> Self {
        Self { store, genres }
    }

    pub fn store(&self) -> &dyn MovieStore {
        self.store.as_ref()
    }

    pub fn genres(&self) -> &GenreResolver {
        &self.genres
    }
}
