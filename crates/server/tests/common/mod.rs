//! Common test utilities for driving the API in-process.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use filmoteka_core::{Config, GenreResolver, MovieStore, SqliteMovieStore, StoredMovie};
use filmoteka_server::api::create_router;
use filmoteka_server::state::AppState;

/// Re-export fixtures for test convenience
pub use filmoteka_core::testing::fixtures;

/// Test fixture: an in-process router over a seeded in-memory store.
pub struct TestFixture {
    pub router: Router,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// Parsed JSON body, Null for non-JSON responses.
    pub body: Value,
    /// Raw body text, for HTML and metrics responses.
    pub text: String,
}

impl TestFixture {
    /// Create a fixture backed by an in-memory SQLite store seeded with
    /// the given records.
    pub fn new(movies: Vec<StoredMovie>) -> Self {
        let store = SqliteMovieStore::in_memory().expect("Failed to create in-memory store");
        store.insert(&movies).expect("Failed to seed movies");
        Self::with_store(Arc::new(store))
    }

    /// Create a fixture over an arbitrary store (e.g. a mock with error
    /// injection).
    pub fn with_store(store: Arc<dyn MovieStore>) -> Self {
        let genres =
            GenreResolver::new(&Config::default().genres).expect("Failed to compile genre table");
        let state = Arc::new(AppState::new(store, genres));
        Self {
            router: create_router(state),
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body, text }
    }
}

/// Seed list of `n` movies titled "Movie 1".."Movie n".
pub fn seed_movies(n: i64) -> Vec<StoredMovie> {
    (1..=n)
        .map(|id| fixtures::movie(id, &format!("Movie {}", id)))
        .collect()
}
