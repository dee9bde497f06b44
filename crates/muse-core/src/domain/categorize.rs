//! Genre bucketing for the paged `/movies` listing.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::movie::{Genre, Movie, MoviePage};

/// Last page the listing advertises.
///
/// Placeholder horizon, not derived from the upstream `total_pages`.
pub const PAGE_HORIZON: u32 = 5;

/// Movies grouped by genre name. A movie appears at most once per bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorizedMovies(BTreeMap<String, Vec<Movie>>);

impl CategorizedMovies {
    pub fn get(&self, genre: &str) -> Option<&[Movie]> {
        self.0.get(genre).map(Vec::as_slice)
    }

    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Pagination block attached to a categorized listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub has_more: bool,
    pub total_pages: u32,
}

impl Pagination {
    /// Heuristic pagination for a requested page.
    pub fn for_page(page: u32) -> Self {
        Self {
            current_page: page,
            has_more: page < PAGE_HORIZON,
            total_pages: PAGE_HORIZON,
        }
    }

    /// Pagination reported alongside a failed listing.
    pub fn unavailable(page: u32) -> Self {
        Self {
            current_page: page,
            has_more: false,
            total_pages: 0,
        }
    }
}

/// Categorized movies plus pagination, the `/movies` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedPage {
    pub data: CategorizedMovies,
    pub pagination: Pagination,
}

impl CategorizedPage {
    pub fn build(page: u32, pages: &[MoviePage], genres: &[Genre]) -> Self {
        Self {
            data: categorize(pages, genres),
            pagination: Pagination::for_page(page),
        }
    }
}

/// Group the movies of `pages` into genre buckets.
///
/// Pages are walked in the given order, then movies, then each movie's genre
/// IDs. IDs missing from `genres` are skipped; a duplicate ID in `genres`
/// resolves to its first entry.
pub fn categorize(pages: &[MoviePage], genres: &[Genre]) -> CategorizedMovies {
    let mut names: HashMap<u64, &str> = HashMap::with_capacity(genres.len());
    for genre in genres {
        names.entry(genre.id).or_insert(genre.name.as_str());
    }

    let mut buckets: BTreeMap<String, Vec<Movie>> = BTreeMap::new();
    let mut seen: HashSet<(&str, u64)> = HashSet::new();

    for movie in pages.iter().flat_map(|page| page.results.iter()) {
        for genre_id in &movie.genre_ids {
            let Some(&name) = names.get(genre_id) else {
                continue;
            };

            if seen.insert((name, movie.id)) {
                buckets.entry(name.to_string()).or_default().push(movie.clone());
            }
        }
    }

    CategorizedMovies(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(movies: Option<&[Movie]>) -> Vec<u64> {
        movies.unwrap_or_default().iter().map(|m| m.id).collect()
    }

    fn genres() -> Vec<Genre> {
        vec![Genre::new(28, "Action"), Genre::new(12, "Adventure")]
    }

    #[test]
    fn test_movie_lands_in_every_matching_bucket() {
        let page = MoviePage::new(
            1,
            vec![
                Movie::new(1, "One").with_genres([28, 12]),
                Movie::new(2, "Two").with_genres([28]),
            ],
        );

        let categorized = categorize(&[page], &genres());

        assert_eq!(categorized.len(), 2);
        assert_eq!(ids(categorized.get("Action")), vec![1, 2]);
        assert_eq!(ids(categorized.get("Adventure")), vec![1]);
    }

    #[test]
    fn test_duplicates_across_pages_kept_once_in_order() {
        let pages = vec![
            MoviePage::new(1, vec![Movie::new(3, "Three").with_genres([12])]),
            MoviePage::new(
                2,
                vec![
                    Movie::new(4, "Four").with_genres([12]),
                    Movie::new(3, "Three again").with_genres([12, 12]),
                ],
            ),
        ];

        let categorized = categorize(&pages, &genres());

        assert_eq!(ids(categorized.get("Adventure")), vec![3, 4]);
        // First occurrence wins.
        assert_eq!(categorized.get("Adventure").unwrap()[0].title, "Three");
    }

    #[test]
    fn test_unknown_genre_ids_are_skipped() {
        let page = MoviePage::new(1, vec![Movie::new(9, "Nine").with_genres([99999, 28])]);

        let categorized = categorize(&[page], &genres());

        assert_eq!(categorized.genres().collect::<Vec<_>>(), vec!["Action"]);
        assert_eq!(ids(categorized.get("Action")), vec![9]);
    }

    #[test]
    fn test_first_genre_name_wins_for_duplicate_ids() {
        let table = vec![Genre::new(28, "Action"), Genre::new(28, "Shadowed")];
        let page = MoviePage::new(1, vec![Movie::new(1, "One").with_genres([28])]);

        let categorized = categorize(&[page], &table);

        assert!(categorized.get("Shadowed").is_none());
        assert_eq!(ids(categorized.get("Action")), vec![1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(categorize(&[], &genres()).is_empty());
        let page = MoviePage::new(1, vec![Movie::new(1, "One").with_genres([28])]);
        assert!(categorize(&[page], &[]).is_empty());
    }

    #[test]
    fn test_pagination_horizon() {
        assert!(Pagination::for_page(1).has_more);
        assert!(Pagination::for_page(4).has_more);
        assert!(!Pagination::for_page(5).has_more);
        assert!(!Pagination::for_page(6).has_more);
        assert_eq!(Pagination::for_page(6).total_pages, PAGE_HORIZON);
    }

    #[test]
    fn test_categorized_page_wire_shape() {
        let page = MoviePage::new(1, vec![Movie::new(1, "One").with_genres([12])]);
        let payload = CategorizedPage::build(2, &[page], &genres());

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["pagination"]["currentPage"], 2);
        assert_eq!(json["pagination"]["hasMore"], true);
        assert_eq!(json["pagination"]["totalPages"], 5);
        assert_eq!(json["data"]["Adventure"][0]["id"], 1);

        let back: CategorizedPage = serde_json::from_value(json).unwrap();
        assert_eq!(back, payload);
    }
}
