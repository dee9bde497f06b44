use actix_web::{HttpResponse, web};
use futures::future::try_join_all;

use muse_core::domain::{merge_recommendations, sample_distinct};
use muse_core::ports::DiscoverQuery;
use muse_shared::{RandomMovie, RecommendationsResponse};

use crate::middleware::error::{AppResult, UpstreamContext};
use crate::state::AppState;

const RECOMMENDATIONS_ERROR: &str = "Error fetching recommendations";

/// Popular movies the recommendations are seeded from.
const SEED_COUNT: usize = 2;

/// GET /recommendations
///
/// Samples two distinct popular movies and returns the first ten of their
/// combined recommendations, in sampling order.
pub async fn recommendations(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let popular = state
        .catalog
        .discover(&DiscoverQuery::popular())
        .await
        .upstream(RECOMMENDATIONS_ERROR)?;

    let seeds = sample_distinct(&popular.results, SEED_COUNT, state.random.as_ref());

    let pages = try_join_all(seeds.iter().map(|movie| state.catalog.recommendations(movie.id)))
        .await
        .upstream(RECOMMENDATIONS_ERROR)?;

    Ok(HttpResponse::Ok().json(RecommendationsResponse {
        random_movies: seeds.into_iter().map(RandomMovie::from).collect(),
        recommendations: merge_recommendations(pages),
    }))
}
