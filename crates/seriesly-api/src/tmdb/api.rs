//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::params::{AccountListKind, DiscoverQuery, ToggleArgs};
use crate::models::{
    AccessToken, Account, CountryOrLanguage, Credits, DiscoverPage, Genre, Keyword,
    PagedTvSeries, Season, TvSeries, TvSeriesAccountStates, WatchProvider,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
/// Every method returns already-normalized view models; `None` means the
/// upstream resource does not exist (HTTP 404).
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    // --- Authentication ---

    /// Creates a v4 request token that redirects to `redirect_to` once approved.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn create_request_token(&self, redirect_to: &str) -> Result<String>;

    /// Exchanges an approved request token for a v4 access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn create_access_token(&self, request_token: &str) -> Result<AccessToken>;

    /// Converts a v4 access token into a v3 session ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn create_session_id(&self, access_token: &str) -> Result<String>;

    /// Invalidates a v3 session ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails.
    async fn delete_session_id(&self, session_id: &str) -> Result<()>;

    /// Invalidates a v4 access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails.
    async fn delete_access_token(&self, access_token: &str) -> Result<()>;

    // --- Account ---

    /// Fetches the account owning `session_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_account_details(&self, session_id: &str) -> Result<Option<Account>>;

    /// Fetches one page of the account's watchlist or favorites.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_account_list(
        &self,
        kind: AccountListKind,
        account_id: u64,
        session_id: &str,
        page: u32,
    ) -> Result<PagedTvSeries>;

    /// Adds a series to, or removes it from, the watchlist or favorites.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails.
    async fn update_account_list(&self, kind: AccountListKind, args: &ToggleArgs) -> Result<()>;

    /// Fetches whether the account favorited or watchlisted a series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_tv_series_account_states(
        &self,
        id: u64,
        session_id: &str,
    ) -> Result<TvSeriesAccountStates>;

    // --- Series ---

    /// Fetches series details with images, seasons and backdrop colour.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_tv_series(&self, id: u64) -> Result<Option<TvSeries>>;

    /// Fetches the content rating of a series in `region`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_tv_series_content_rating(&self, id: u64, region: &str)
    -> Result<Option<String>>;

    /// Fetches the subscription providers of a series in `region`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_tv_series_watch_providers(
        &self,
        id: u64,
        region: &str,
    ) -> Result<Vec<WatchProvider>>;

    /// Fetches aggregate cast and crew.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_tv_series_credits(&self, id: u64) -> Result<Credits>;

    /// Fetches recommended series that have a poster.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_tv_series_recommendations(&self, id: u64) -> Result<Vec<TvSeries>>;

    /// Fetches similar series that have a poster.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_tv_series_similar(&self, id: u64) -> Result<Vec<TvSeries>>;

    /// Fetches one season including its episodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_tv_series_season(&self, id: u64, season: u32) -> Result<Option<Season>>;

    // --- Discovery ---

    /// Fetches today's trending series, hydrated to full details.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the HTTP requests fail.
    async fn fetch_trending_tv_series(&self) -> Result<Vec<TvSeries>>;

    /// Runs a discover query merged with the default filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_discover_tv_series(&self, query: &DiscoverQuery) -> Result<DiscoverPage>;

    /// Fetches TV genres minus the globally ignored ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_genres_for_tv_series(&self) -> Result<Vec<Genre>>;

    /// Searches series by name, keeping results with a poster.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_tv_series(&self, query: &str) -> Result<Vec<TvSeries>>;

    /// Fetches all TV watch providers of `region`, in regional display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_watch_providers(&self, region: &str) -> Result<Vec<WatchProvider>>;

    /// Fetches the country list sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_countries(&self) -> Result<Vec<CountryOrLanguage>>;

    /// Fetches the language list sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_languages(&self) -> Result<Vec<CountryOrLanguage>>;

    /// Fetches a keyword by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_keyword(&self, id: u64) -> Result<Option<Keyword>>;

    /// Searches keywords by text.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_keywords(&self, query: &str) -> Result<Vec<Keyword>>;
}
