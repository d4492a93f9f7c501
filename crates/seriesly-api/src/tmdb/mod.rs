//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB v3/v4 REST API, caches revalidating
//! GET responses in process and maps upstream payloads to view models.

mod api;
mod cache;
mod client;
mod params;
mod request;
pub mod types;
mod util;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use params::{
    AccountListKind, CURATED_GENRES_TO_IGNORE, DiscoverQuery, GLOBAL_GENRES_TO_IGNORE, ToggleArgs,
};
pub use request::{CachePolicy, DEFAULT_REVALIDATE, FetchOptions, TmdbStatusError};
pub use util::{
    fetch_apple_plus_tv_series, fetch_best_sports_documentaries_tv_series, fetch_favorites,
    fetch_most_anticipated_tv_series, fetch_popular_british_crime_tv_series, fetch_watchlist,
};
