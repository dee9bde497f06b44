//! TMDB adapter for the [`MovieCatalog`](muse_core::ports::MovieCatalog) port.

mod client;
mod config;

pub use client::TmdbClient;
pub use config::TmdbConfig;
