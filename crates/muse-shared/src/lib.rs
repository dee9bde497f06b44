//! # MovieMuse Shared
//!
//! Wire types exchanged with the mobile client.

pub mod dto;

pub use dto::{
    Background, CacheStatus, HealthResponse, MoviesErrorResponse, MoviesResponse, RandomMovie,
    RecommendationsResponse,
};
