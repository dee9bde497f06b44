//! Data Transfer Objects - response types for the API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use muse_core::domain::{CategorizedPage, Movie, Pagination};

/// Body of `GET /movies`.
pub type MoviesResponse = CategorizedPage;

/// Body of a failed `GET /movies`: an empty listing plus the error message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviesErrorResponse {
    pub error: String,
    pub data: Map<String, Value>,
    pub pagination: Pagination,
}

impl MoviesErrorResponse {
    pub fn new(error: impl Into<String>, page: u32) -> Self {
        Self {
            error: error.into(),
            data: Map::new(),
            pagination: Pagination::unavailable(page),
        }
    }
}

/// Image set for the opening screen slideshow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub id: u64,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
}

impl From<&Movie> for Background {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            backdrop_path: movie.backdrop_path.clone(),
            poster_path: movie.poster_path.clone(),
        }
    }
}

/// Summary of a movie the recommendations were seeded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomMovie {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
}

impl From<&Movie> for RandomMovie {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
        }
    }
}

/// Body of `GET /recommendations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponse {
    pub random_movies: Vec<RandomMovie>,
    pub recommendations: Vec<Movie>,
}

/// Cache section of the health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStatus {
    pub backend: String,
    pub swallowed_errors: u64,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub cache: CacheStatus,
}
