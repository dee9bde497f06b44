//! Domain entities and the pure build steps the routes run over them.

mod categorize;
mod movie;
mod selection;

pub use categorize::{CategorizedMovies, CategorizedPage, PAGE_HORIZON, Pagination, categorize};
pub use movie::{Genre, Movie, MoviePage};
pub use selection::{RECOMMENDATION_LIMIT, merge_recommendations, sample_distinct, with_backdrops};
