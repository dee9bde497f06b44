//! Error handling - maps handler failures to the fixed client responses.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};

use muse_core::CatalogError;
use muse_shared::MoviesErrorResponse;

pub const MOVIES_ERROR: &str = "Error fetching movies";
pub const INVALID_GENRE: &str = "Invalid genre name.";

/// Application-level error type.
///
/// Clients only ever see a status and a fixed message; the upstream cause is
/// logged.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An upstream call failed; answered with 500 and `context` as plain text.
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: CatalogError,
    },

    /// The `/movies` listing failed; answered with an empty JSON listing.
    #[error("Error fetching movies (page {page}): {source}")]
    MoviesUnavailable {
        page: u32,
        #[source]
        source: CatalogError,
    },

    /// A request parameter did not parse; answered like `Upstream`.
    #[error("{context}: invalid {parameter} {value:?}")]
    InvalidParameter {
        context: &'static str,
        parameter: &'static str,
        value: String,
    },

    /// A `/movies` parameter did not parse; answered like `MoviesUnavailable`.
    #[error("Error fetching movies: invalid {parameter} {value:?}")]
    InvalidMoviesParameter {
        page: u32,
        parameter: &'static str,
        value: String,
    },

    #[error("Unknown genre: {0:?}")]
    InvalidGenre(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Upstream { .. }
            | AppError::MoviesUnavailable { .. }
            | AppError::InvalidParameter { .. }
            | AppError::InvalidMoviesParameter { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidGenre(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Upstream { context, source } => {
                tracing::error!(error = %source, "{}", context);
                HttpResponse::build(self.status_code())
                    .content_type(ContentType::plaintext())
                    .body(*context)
            }
            AppError::MoviesUnavailable { page, source } => {
                tracing::error!(page, error = %source, "{}", MOVIES_ERROR);
                HttpResponse::build(self.status_code())
                    .json(MoviesErrorResponse::new(MOVIES_ERROR, *page))
            }
            AppError::InvalidParameter {
                context,
                parameter,
                value,
            } => {
                tracing::warn!(parameter, value = %value, "{}", context);
                HttpResponse::build(self.status_code())
                    .content_type(ContentType::plaintext())
                    .body(*context)
            }
            AppError::InvalidMoviesParameter {
                page,
                parameter,
                value,
            } => {
                tracing::warn!(parameter, value = %value, "{}", MOVIES_ERROR);
                HttpResponse::build(self.status_code())
                    .json(MoviesErrorResponse::new(MOVIES_ERROR, *page))
            }
            AppError::InvalidGenre(name) => {
                tracing::debug!(genre = %name, "Rejected unknown genre");
                HttpResponse::build(self.status_code())
                    .content_type(ContentType::plaintext())
                    .body(INVALID_GENRE)
            }
        }
    }
}

/// Attach the client-facing message to an upstream failure.
pub trait UpstreamContext<T> {
    fn upstream(self, context: &'static str) -> AppResult<T>;
}

impl<T> UpstreamContext<T> for Result<T, CatalogError> {
    fn upstream(self, context: &'static str) -> AppResult<T> {
        self.map_err(|source| AppError::Upstream { context, source })
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_upstream_error_is_plain_500() {
        let err = Err::<(), _>(CatalogError::Timeout).upstream("Error fetching genres");
        let response = err.unwrap_err().error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body, "Error fetching genres");
    }

    #[actix_web::test]
    async fn test_invalid_genre_is_400() {
        let response = AppError::InvalidGenre("Nope".to_string()).error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body, INVALID_GENRE);
    }

    #[actix_web::test]
    async fn test_movies_unavailable_keeps_listing_shape() {
        let response = AppError::MoviesUnavailable {
            page: 2,
            source: CatalogError::Status { status: 401 },
        }
        .error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], MOVIES_ERROR);
        assert_eq!(json["data"], serde_json::json!({}));
        assert_eq!(json["pagination"]["currentPage"], 2);
        assert_eq!(json["pagination"]["hasMore"], false);
        assert_eq!(json["pagination"]["totalPages"], 0);
    }
}
