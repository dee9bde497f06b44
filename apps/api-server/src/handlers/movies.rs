//! Movie listing and detail handlers.

use std::str::FromStr;

use actix_web::{HttpResponse, web};
use futures::future::{try_join, try_join_all};
use serde::Deserialize;

use muse_core::CatalogError;
use muse_core::domain::{CategorizedPage, Genre, with_backdrops};
use muse_core::ports::{DiscoverQuery, MovieCatalog};
use muse_shared::{Background, MoviesResponse};

use crate::middleware::error::{AppError, AppResult, UpstreamContext};
use crate::state::AppState;

/// Listing pages folded into one `/movies` response unless `limit` says otherwise.
const DEFAULT_PAGES_PER_REQUEST: u32 = 5;

/// Cap on the upstream fan-out of a single `/movies` request.
pub const MAX_PAGES_PER_REQUEST: u32 = 20;

const DEFAULT_BACKGROUNDS: usize = 10;

const BACKGROUNDS_ERROR: &str = "Error fetching background images";
const SORT_ERROR: &str = "Error fetching sorted movies";
const DETAILS_ERROR: &str = "Error fetching movie details";

// Numeric parameters are kept raw and parsed by `numeric` in the handlers.

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BackgroundsQuery {
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    pub sort_by: Option<String>,
    #[serde(default)]
    pub genre: String,
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsQuery {
    pub append_to_response: Option<String>,
}

/// GET /movies
///
/// Movies from `limit` consecutive listing pages starting at `page`, grouped
/// by genre. Cached per page and limit.
pub async fn list_movies(
    state: web::Data<AppState>,
    query: web::Query<MoviesQuery>,
) -> AppResult<HttpResponse> {
    let page = numeric(query.page.as_deref(), 1).map_err(|value| {
        AppError::InvalidMoviesParameter {
            page: 0,
            parameter: "page",
            value,
        }
    })?;
    let limit = numeric(query.limit.as_deref(), DEFAULT_PAGES_PER_REQUEST)
        .map_err(|value| AppError::InvalidMoviesParameter {
            page,
            parameter: "limit",
            value,
        })?
        .min(MAX_PAGES_PER_REQUEST);

    let key = format!("movies_page_{page}_limit_{limit}");
    let catalog = state.catalog.as_ref();

    let payload: MoviesResponse = state
        .cache
        .get_or_compute(&key, state.movies_cache_ttl, || {
            build_movies_page(catalog, page, limit)
        })
        .await
        .map_err(|source| AppError::MoviesUnavailable { page, source })?;

    Ok(HttpResponse::Ok().json(payload))
}

/// Absent or blank means `default`; anything unparsable is returned as-is.
fn numeric<T: FromStr>(raw: Option<&str>, default: T) -> Result<T, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| s.to_string()),
    }
}

fn invalid(context: &'static str, parameter: &'static str) -> impl FnOnce(String) -> AppError {
    move |value| AppError::InvalidParameter {
        context,
        parameter,
        value,
    }
}

async fn build_movies_page(
    catalog: &dyn MovieCatalog,
    page: u32,
    limit: u32,
) -> Result<CategorizedPage, CatalogError> {
    let queries: Vec<DiscoverQuery> = (0..limit)
        .map(|offset| DiscoverQuery::page(page.saturating_add(offset)))
        .collect();

    let (genres, pages) = try_join(
        catalog.genres(),
        try_join_all(queries.iter().map(|q| catalog.discover(q))),
    )
    .await?;

    Ok(CategorizedPage::build(page, &pages, &genres))
}

/// GET /opening-backgrounds
pub async fn opening_backgrounds(
    state: web::Data<AppState>,
    query: web::Query<BackgroundsQuery>,
) -> AppResult<HttpResponse> {
    let limit = numeric(query.limit.as_deref(), DEFAULT_BACKGROUNDS)
        .map_err(invalid(BACKGROUNDS_ERROR, "limit"))?;

    let popular = state
        .catalog
        .discover(&DiscoverQuery::popular())
        .await
        .upstream(BACKGROUNDS_ERROR)?;

    let backgrounds: Vec<Background> = with_backdrops(&popular.results, limit)
        .map(Background::from)
        .collect();

    Ok(HttpResponse::Ok().json(backgrounds))
}

/// GET /sort-movies
///
/// One listing page restricted to a genre (matched by name, ignoring case).
pub async fn sort_movies(
    state: web::Data<AppState>,
    query: web::Query<SortQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = numeric(query.page.as_deref(), 1).map_err(invalid(SORT_ERROR, "page"))?;
    let genres = state.catalog.genres().await.upstream(SORT_ERROR)?;

    let genre = Genre::find_by_name(&genres, &query.genre)
        .ok_or_else(|| AppError::InvalidGenre(query.genre.clone()))?;

    let listing = DiscoverQuery::page(page)
        .sorted_by(query.sort_by.unwrap_or_else(|| "popularity.desc".to_string()))
        .with_genre(genre.id);

    let found = state
        .catalog
        .discover(&listing)
        .await
        .upstream(SORT_ERROR)?;

    Ok(HttpResponse::Ok().json(found.results))
}

/// GET /movie/{id}
///
/// A non-numeric id is answered like an upstream rejection.
pub async fn movie_details(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<DetailsQuery>,
) -> AppResult<HttpResponse> {
    let raw = path.into_inner();
    let id: u64 = raw
        .parse()
        .map_err(|_| raw.clone())
        .map_err(invalid(DETAILS_ERROR, "id"))?;

    let details = state
        .catalog
        .movie_details(id, query.append_to_response.as_deref())
        .await
        .upstream(DETAILS_ERROR)?;

    Ok(HttpResponse::Ok().json(details))
}
