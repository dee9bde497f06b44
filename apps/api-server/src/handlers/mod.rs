//! HTTP handlers and route configuration.

mod genres;
mod health;
mod movies;
mod recommendations;
mod search;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health_check))
        .route("/movies", web::get().to(movies::list_movies))
        .route(
            "/opening-backgrounds",
            web::get().to(movies::opening_backgrounds),
        )
        .route("/sort-movies", web::get().to(movies::sort_movies))
        .route("/movie/{id}", web::get().to(movies::movie_details))
        .route("/genres", web::get().to(genres::list_genres))
        .route("/search", web::get().to(search::search_movies))
        .route(
            "/recommendations",
            web::get().to(recommendations::recommendations),
        );
}
