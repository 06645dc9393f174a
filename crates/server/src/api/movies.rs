//! Movie catalog API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;

use filmoteka_core::{normalize, ListParams, MovieRecord, QuerySpec, RawListParams};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct OneParams {
    #[serde(default)]
    pub movie_id: Option<String>,
    #[serde(default)]
    pub with_images: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data: ListData,
}

#[derive(Debug, Serialize)]
pub struct ListData {
    /// Size of the returned page, not the total match count.
    pub movie_count: usize,
    pub limit: i64,
    pub page_number: i64,
    pub movies: Vec<MovieRecord>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /one?movie_id=<id>&with_images=<flag>
///
/// Fetch a single movie. Not-found and storage failure are reported the
/// same way, `{"status":"error"}` with HTTP 200. Unlike the list
/// endpoint, the normalized torrents are nested under a `torrent` key.
pub async fn one(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OneParams>,
) -> Json<Value> {
    let movie_id = params
        .movie_id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok());
    // Any non-empty value enables images, including "false" and "0".
    let with_images = params
        .with_images
        .as_deref()
        .is_some_and(|flag| !flag.is_empty());

    let found = match movie_id {
        Some(id) => state.store().find_by_id(id),
        // An unparseable identifier matches nothing.
        None => Ok(None),
    };

    let movie = match found {
        Ok(Some(movie)) => movie,
        Ok(None) => return error_status(),
        Err(e) => {
            error!("Failed to fetch movie {:?}: {}", params.movie_id, e);
            return error_status();
        }
    };

    let record = normalize(&movie, with_images);
    let Ok(mut data) = serde_json::to_value(&record) else {
        error!("Failed to serialize movie {}", movie.id);
        return error_status();
    };
    let torrents = data["torrents"].take();
    data["torrents"] = json!({ "torrent": torrents });

    Json(json!({
        "status": "ok",
        "status_message": "Query was successful",
        "data": data,
    }))
}

fn error_status() -> Json<Value> {
    Json(json!({ "status": "error" }))
}

/// GET /list?limit=&page=&genre=&query_term=&sort_by=&order_by=
///
/// Filtered, sorted, paginated movie list. Results are normalized without
/// images.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<RawListParams>,
) -> Result<Json<ListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let params = ListParams::from(raw);

    let spec = QuerySpec::build(&params, state.genres()).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    let movies = state.store().query(&spec).map_err(|e| {
        error!("Movie list query failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    let movies: Vec<MovieRecord> = movies.iter().map(|movie| normalize(movie, false)).collect();

    Ok(Json(ListResponse {
        data: ListData {
            movie_count: movies.len(),
            limit: params.limit,
            page_number: params.page,
            movies,
        },
    }))
}
