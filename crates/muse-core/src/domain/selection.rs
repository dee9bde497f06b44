//! Selection steps for the background and recommendation routes.

use std::collections::HashSet;

use super::movie::{Movie, MoviePage};
use crate::ports::RandomSource;

/// Maximum number of recommendations returned.
pub const RECOMMENDATION_LIMIT: usize = 10;

/// Movies that have a usable backdrop image, in listing order, at most `limit`.
pub fn with_backdrops(movies: &[Movie], limit: usize) -> impl Iterator<Item = &Movie> {
    movies
        .iter()
        .filter(|m| m.backdrop_path.as_deref().is_some_and(|p| !p.is_empty()))
        .take(limit)
}

/// Pick up to `count` movies with distinct IDs, in random order.
///
/// Candidates are de-duplicated by ID (first occurrence kept) and then drawn
/// with a partial Fisher-Yates shuffle, so every `RandomSource` terminates.
/// Returns fewer than `count` movies when there are not enough distinct ones.
pub fn sample_distinct<'a>(
    movies: &'a [Movie],
    count: usize,
    random: &dyn RandomSource,
) -> Vec<&'a Movie> {
    let mut seen = HashSet::new();
    let mut pool: Vec<&Movie> = movies.iter().filter(|m| seen.insert(m.id)).collect();

    let picks = count.min(pool.len());
    for i in 0..picks {
        let offset = random.next_index(pool.len() - i) % (pool.len() - i);
        pool.swap(i, i + offset);
    }

    pool.truncate(picks);
    pool
}

/// Concatenate recommendation pages in order and cap at [`RECOMMENDATION_LIMIT`].
pub fn merge_recommendations(pages: impl IntoIterator<Item = MoviePage>) -> Vec<Movie> {
    pages
        .into_iter()
        .flat_map(|page| page.results)
        .take(RECOMMENDATION_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays a fixed list of indices.
    struct Scripted(Mutex<Vec<usize>>);

    impl Scripted {
        fn new(mut picks: Vec<usize>) -> Self {
            picks.reverse();
            Self(Mutex::new(picks))
        }
    }

    impl RandomSource for Scripted {
        fn next_index(&self, _upper: usize) -> usize {
            self.0.lock().unwrap().pop().unwrap_or(0)
        }
    }

    fn catalog(ids: &[u64]) -> Vec<Movie> {
        ids.iter().map(|&id| Movie::new(id, format!("m{id}"))).collect()
    }

    #[test]
    fn test_backdrops_skip_missing_and_empty() {
        let movies = vec![
            Movie::new(1, "a").with_backdrop("/a.jpg").with_poster("/pa.jpg"),
            Movie::new(2, "b"),
            Movie::new(3, "c").with_backdrop(""),
            Movie::new(4, "d").with_backdrop("/d.jpg"),
            Movie::new(5, "e").with_backdrop("/e.jpg"),
        ];

        let picked: Vec<u64> = with_backdrops(&movies, 2).map(|m| m.id).collect();
        assert_eq!(picked, vec![1, 4]);

        let all: Vec<u64> = with_backdrops(&movies, 10).map(|m| m.id).collect();
        assert_eq!(all, vec![1, 4, 5]);
    }

    #[test]
    fn test_sample_follows_random_source() {
        let movies = catalog(&[10, 20, 30, 40]);

        // index 2 of [10,20,30,40] -> 30, then index 0 of [20,10,40] -> 20
        let picks = sample_distinct(&movies, 2, &Scripted::new(vec![2, 0]));
        let ids: Vec<u64> = picks.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![30, 20]);
    }

    #[test]
    fn test_sample_never_repeats_an_id() {
        let movies = catalog(&[7, 7, 7, 8]);

        let picks = sample_distinct(&movies, 2, &Scripted::new(vec![0, 0]));
        let mut ids: Vec<u64> = picks.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![7, 8]);
    }

    #[test]
    fn test_sample_with_too_few_movies() {
        let one = catalog(&[1, 1]);
        assert_eq!(sample_distinct(&one, 2, &Scripted::new(vec![5, 5])).len(), 1);
        assert!(sample_distinct(&[], 2, &Scripted::new(vec![])).is_empty());
    }

    #[test]
    fn test_merge_keeps_order_and_caps() {
        let first = MoviePage::new(1, catalog(&[1, 2, 3, 4, 5, 6]));
        let second = MoviePage::new(1, catalog(&[7, 8, 9, 10, 11, 12]));

        let merged: Vec<u64> = merge_recommendations([first, second])
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(merged, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }
}
