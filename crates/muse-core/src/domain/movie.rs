use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A movie record as listed by the upstream catalog.
///
/// Only the fields the backend reads are typed; everything else the upstream
/// sends is kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Movie {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            genre_ids: Vec::new(),
            backdrop_path: None,
            poster_path: None,
            extra: Map::new(),
        }
    }

    pub fn with_genres(mut self, genre_ids: impl IntoIterator<Item = u64>) -> Self {
        self.genre_ids = genre_ids.into_iter().collect();
        self
    }

    pub fn with_backdrop(mut self, path: impl Into<String>) -> Self {
        self.backdrop_path = Some(path.into());
        self
    }

    pub fn with_poster(mut self, path: impl Into<String>) -> Self {
        self.poster_path = Some(path.into());
        self
    }
}

/// Genre entry from the upstream genre table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

impl Genre {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name<'a>(genres: &'a [Genre], name: &str) -> Option<&'a Genre> {
        let wanted = name.to_lowercase();
        genres.iter().find(|g| g.name.to_lowercase() == wanted)
    }
}

/// One page of a listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl MoviePage {
    pub fn new(page: u32, results: Vec<Movie>) -> Self {
        Self {
            page,
            results,
            ..Self::default()
        }
    }
}
