//! Liveness endpoints.

use actix_web::{HttpResponse, http::header::ContentType, web};

use muse_shared::{CacheStatus, HealthResponse};

use crate::state::AppState;

/// GET /
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("Server is running")
}

/// Health check endpoint - returns server status and cache backend.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        cache: CacheStatus {
            backend: state.cache.backend().to_string(),
            swallowed_errors: state.cache.swallowed_errors(),
        },
    };

    HttpResponse::Ok().json(response)
}
