//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod cache;
mod catalog;
mod random;

pub use cache::{Cache, CacheError};
pub use catalog::{DiscoverQuery, MovieCatalog};
pub use random::RandomSource;
