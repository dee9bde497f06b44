//! Genre table handler.

use actix_web::{HttpResponse, web};

use crate::middleware::error::{AppResult, UpstreamContext};
use crate::state::AppState;

/// GET /genres
pub async fn list_genres(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let genres = state
        .catalog
        .genres()
        .await
        .upstream("Error fetching genres")?;

    Ok(HttpResponse::Ok().json(genres))
}
