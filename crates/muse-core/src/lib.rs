//! # MovieMuse Core
//!
//! The domain layer of the MovieMuse backend.
//! Movie and genre types, the pure build steps the routes run, the ports that
//! infrastructure implements, and the cache-aside coordinator.

pub mod cache_aside;
pub mod domain;
pub mod error;
pub mod ports;

pub use cache_aside::{CacheAside, CacheOutcome, Cached};
pub use error::CatalogError;
