//! HTTP client for the TMDB v3 API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use muse_core::CatalogError;
use muse_core::domain::{Genre, MoviePage};
use muse_core::ports::{DiscoverQuery, MovieCatalog};

use super::TmdbConfig;

type Params = Vec<(&'static str, String)>;

#[derive(Deserialize)]
struct GenreList {
    genres: Vec<Genre>,
}

/// TMDB-backed movie catalog.
///
/// Every request carries the API key and language and is bounded by the
/// configured timeout. Nothing is retried.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
    ) -> Result<T, CatalogError> {
        let response = self
            .http
            .get(self.endpoint(path))
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .query(&params)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(path, status = status.as_u16(), "TMDB returned an error status");
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(e.without_url().to_string()))
    }
}

/// Request errors embed the URL, which carries the API key.
fn transport_error(e: reqwest::Error) -> CatalogError {
    if e.is_timeout() {
        CatalogError::Timeout
    } else {
        CatalogError::Request(e.without_url().to_string())
    }
}

fn discover_params(query: &DiscoverQuery) -> Params {
    let mut params = vec![("page", query.page.to_string())];
    if let Some(sort_by) = &query.sort_by {
        params.push(("sort_by", sort_by.clone()));
    }
    if let Some(genre) = query.with_genres {
        params.push(("with_genres", genre.to_string()));
    }
    params
}

fn details_params(append_to_response: Option<&str>) -> Params {
    append_to_response
        .filter(|a| !a.is_empty())
        .map(|a| vec![("append_to_response", a.to_string())])
        .unwrap_or_default()
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let list: GenreList = self.get_json("genre/movie/list", Vec::new()).await?;
        Ok(list.genres)
    }

    async fn discover(&self, query: &DiscoverQuery) -> Result<MoviePage, CatalogError> {
        self.get_json("discover/movie", discover_params(query)).await
    }

    async fn movie_details(
        &self,
        id: u64,
        append_to_response: Option<&str>,
    ) -> Result<Value, CatalogError> {
        self.get_json(&format!("movie/{id}"), details_params(append_to_response))
            .await
    }

    async fn search(&self, query: &str) -> Result<Value, CatalogError> {
        self.get_json("search/movie", vec![("query", query.to_string())])
            .await
    }

    async fn recommendations(&self, id: u64) -> Result<MoviePage, CatalogError> {
        self.get_json(
            &format!("movie/{id}/recommendations"),
            vec![("page", "1".to_string())],
        )
        .await
    }
}
