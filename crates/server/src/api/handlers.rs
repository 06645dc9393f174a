use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Html, Json};
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /
///
/// Index page showing the catalog size.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, StatusCode> {
    match state.store().count() {
        Ok(count) => Ok(Html(render_index(count))),
        Err(e) => {
            error!("Failed to count catalog records: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn render_index(count: u64) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>Filmoteka</title></head>\n\
         <body>\n\
         <h1>Filmoteka</h1>\n\
         <p>{count} movies in the catalog</p>\n\
         </body>\n\
         </html>\n"
    )
}

/// GET /metrics
pub async fn metrics(State(state): State<Arc<AppState>>) -> String {
    crate::metrics::collect_dynamic_metrics(state.as_ref());
    crate::metrics::encode_metrics()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_index_shows_count() {
        let page = render_index(17);
        assert!(page.contains("17 movies"));
        assert!(page.starts_with("<!DOCTYPE html>"));
    }
}
