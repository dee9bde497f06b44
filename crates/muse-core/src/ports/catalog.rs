//! Upstream movie catalog port.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Genre, MoviePage};
use crate::error::CatalogError;

/// Parameters for a discovery listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverQuery {
    pub page: u32,
    pub sort_by: Option<String>,
    pub with_genres: Option<u64>,
}

impl DiscoverQuery {
    /// Plain listing of the given page in upstream default order.
    pub fn page(page: u32) -> Self {
        Self {
            page,
            sort_by: None,
            with_genres: None,
        }
    }

    /// First page sorted by popularity, most popular first.
    pub fn popular() -> Self {
        Self::page(1).sorted_by("popularity.desc")
    }

    pub fn sorted_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    pub fn with_genre(mut self, genre_id: u64) -> Self {
        self.with_genres = Some(genre_id);
        self
    }
}

/// Read-only access to the movie metadata provider.
///
/// Each call is a single upstream request with its own timeout. Implementations
/// never retry.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// The full genre table.
    async fn genres(&self) -> Result<Vec<Genre>, CatalogError>;

    /// One page of the discovery listing.
    async fn discover(&self, query: &DiscoverQuery) -> Result<MoviePage, CatalogError>;

    /// Full detail object for a movie, optionally with appended sub-resources
    /// such as `credits,videos,similar`.
    async fn movie_details(
        &self,
        id: u64,
        append_to_response: Option<&str>,
    ) -> Result<Value, CatalogError>;

    /// Free-text search. The upstream payload is returned untouched.
    async fn search(&self, query: &str) -> Result<Value, CatalogError>;

    /// First page of recommendations for a movie.
    async fn recommendations(&self, id: u64) -> Result<MoviePage, CatalogError>;
}
