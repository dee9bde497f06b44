use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB client configuration.
#[derive(Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    /// API root, without trailing slash
    pub base_url: String,
    pub language: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "en-US".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let api_key = std::env::var("TMDB_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("TMDB_API_KEY not set. Upstream calls will be rejected.");
        }

        Self {
            api_key,
            base_url: std::env::var("TMDB_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            language: std::env::var("TMDB_LANGUAGE").unwrap_or_else(|_| "en-US".to_string()),
            timeout: Duration::from_secs(
                std::env::var("TMDB_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .finish()
    }
}
