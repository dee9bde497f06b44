//! # MovieMuse Infrastructure
//!
//! Concrete implementations of the ports defined in `muse-core`:
//! cache backends, the TMDB catalog client and the random source.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external cache, in-memory only
//! - `redis` - Redis cache backend

pub mod cache;
pub mod random;
pub mod tmdb;

pub use cache::InMemoryCache;
pub use random::ThreadRandom;
pub use tmdb::{TmdbClient, TmdbConfig};

#[cfg(feature = "redis")]
pub use cache::{RedisCache, RedisConfig};
