//! # MovieMuse API Server
//!
//! Actix-web proxy in front of the TMDB API, with optional response caching.

use actix_web::middleware::{DefaultHeaders, from_fn};
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    tracing::debug!(
        tmdb = ?config.tmdb,
        movies_cache_ttl_secs = config.movies_cache_ttl.as_secs(),
        "Loaded configuration"
    );

    let state = AppState::new(&config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    tracing::info!("Server is running on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(observability::propagate_request_id))
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*")))
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
