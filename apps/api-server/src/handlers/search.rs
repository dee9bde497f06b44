//! Free-text movie search.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::middleware::error::{AppResult, UpstreamContext};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// GET /search - upstream payload is passed through untouched.
pub async fn search_movies(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let payload = state
        .catalog
        .search(&query.query)
        .await
        .upstream("Error searching for movies")?;

    Ok(HttpResponse::Ok().json(payload))
}
