//! TMDB API response shapes.
//!
//! Upstream responses are partial depending on the endpoint (list results
//! carry `genre_ids`, detail responses carry `genres`, ...), so almost every
//! field defaults when absent.

use std::collections::HashMap;

use serde::Deserialize;

// --- Pagination ---

/// Paginated result envelope shared by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage<T> {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Results on this page.
    #[serde(default)]
    pub results: Vec<T>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

// --- TV series ---

/// TV series as returned by details, list and search endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbTvSeries {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: Option<String>,
    /// Original name.
    pub original_name: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Tagline (details only).
    pub tagline: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// First air date (`YYYY-MM-DD`, may be empty).
    pub first_air_date: Option<String>,
    /// Last air date (details only).
    pub last_air_date: Option<String>,
    /// Genres (details only).
    pub genres: Vec<TmdbGenre>,
    /// Genre IDs (list results only).
    pub genre_ids: Vec<u32>,
    /// Production countries.
    pub production_countries: Vec<TmdbProductionCountry>,
    /// Spoken languages.
    pub spoken_languages: Vec<TmdbSpokenLanguage>,
    /// Creators.
    pub created_by: Vec<TmdbCredit>,
    /// Most recently aired episode.
    pub last_episode_to_air: Option<TmdbEpisode>,
    /// Next scheduled episode.
    pub next_episode_to_air: Option<TmdbEpisode>,
    /// Total number of episodes.
    pub number_of_episodes: Option<u32>,
    /// Total number of seasons.
    pub number_of_seasons: Option<u32>,
    /// Typical episode runtimes.
    pub episode_run_time: Vec<u32>,
    /// Adult flag.
    pub adult: bool,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Season summaries (details only).
    pub seasons: Vec<TmdbSeasonSummary>,
    /// Appended `images` response.
    pub images: Option<TmdbImages>,
}

/// Genre entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Production country entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbProductionCountry {
    /// ISO 3166-1 code.
    pub iso_3166_1: String,
    /// English name.
    pub name: String,
}

/// Spoken language entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbSpokenLanguage {
    /// ISO 639-1 code.
    pub iso_639_1: String,
    /// English name.
    pub english_name: String,
    /// Native name.
    pub name: String,
}

/// Appended image lists.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbImages {
    /// Title treatment logos.
    pub logos: Vec<TmdbImage>,
    /// Backdrops.
    pub backdrops: Vec<TmdbImage>,
    /// Posters.
    pub posters: Vec<TmdbImage>,
}

/// Single image entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbImage {
    /// Image path.
    pub file_path: String,
    /// Image language, `None` for language-neutral images.
    pub iso_639_1: Option<String>,
    /// Vote average.
    pub vote_average: f64,
}

// --- Seasons & episodes ---

/// Season summary within TV details.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbSeasonSummary {
    /// TMDB season ID.
    pub id: u64,
    /// Season name.
    pub name: Option<String>,
    /// Season overview.
    pub overview: Option<String>,
    /// Air date.
    pub air_date: Option<String>,
    /// Season number (0 = specials).
    pub season_number: u32,
    /// Number of episodes in this season.
    pub episode_count: u32,
}

/// Response from `tv/{series_id}/season/{season_number}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbSeason {
    /// TMDB season ID.
    pub id: u64,
    /// Season name.
    pub name: Option<String>,
    /// Season overview.
    pub overview: Option<String>,
    /// Air date.
    pub air_date: Option<String>,
    /// Season number.
    pub season_number: u32,
    /// Episodes in this season.
    pub episodes: Vec<TmdbEpisode>,
}

/// A single episode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbEpisode {
    /// TMDB episode ID.
    pub id: u64,
    /// Episode name.
    pub name: Option<String>,
    /// Episode overview.
    pub overview: Option<String>,
    /// Air date.
    pub air_date: Option<String>,
    /// Episode number within the season.
    pub episode_number: u32,
    /// Season number.
    pub season_number: u32,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Still image path.
    pub still_path: Option<String>,
}

// --- Credits ---

/// Person entry used for creators, aggregate cast and aggregate crew.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbCredit {
    /// TMDB person ID.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Credit order (cast only).
    pub order: i64,
    /// Roles played (aggregate cast).
    pub roles: Vec<TmdbRole>,
    /// Jobs held (aggregate crew).
    pub jobs: Vec<TmdbJob>,
    /// Total number of episodes across roles or jobs.
    pub total_episode_count: Option<u32>,
}

/// Character role within aggregate credits.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbRole {
    /// Character name.
    pub character: String,
    /// Episodes with this role.
    pub episode_count: u32,
}

/// Crew job within aggregate credits.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbJob {
    /// Job title.
    pub job: String,
    /// Episodes with this job.
    pub episode_count: u32,
}

/// Response from `tv/{series_id}/aggregate_credits`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbAggregateCredits {
    /// Cast.
    pub cast: Vec<TmdbCredit>,
    /// Crew.
    pub crew: Vec<TmdbCredit>,
}

// --- Ratings & providers ---

/// Response from `tv/{series_id}/content_ratings`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbContentRatings {
    /// Ratings per region.
    pub results: Vec<TmdbContentRating>,
}

/// Content rating for one region.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbContentRating {
    /// ISO 3166-1 region code.
    pub iso_3166_1: String,
    /// Rating label.
    pub rating: String,
}

/// Response from `tv/{series_id}/watch/providers`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbSeriesWatchProviders {
    /// Providers keyed by ISO 3166-1 region.
    pub results: HashMap<String, TmdbRegionWatchProviders>,
}

/// Providers available in one region.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbRegionWatchProviders {
    /// JustWatch link.
    pub link: Option<String>,
    /// Subscription providers.
    pub flatrate: Vec<TmdbWatchProvider>,
}

/// Response from `watch/providers/tv`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbWatchProviderList {
    /// Providers.
    pub results: Vec<TmdbWatchProvider>,
}

/// Watch provider entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbWatchProvider {
    /// Provider ID.
    pub provider_id: u32,
    /// Provider name.
    pub provider_name: Option<String>,
    /// Logo path.
    pub logo_path: Option<String>,
    /// Global display priority.
    pub display_priority: i64,
    /// Display priority per region.
    pub display_priorities: HashMap<String, i64>,
}

// --- Reference data ---

/// Response from `genre/tv/list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbGenreList {
    /// Genres.
    pub genres: Vec<TmdbGenre>,
}

/// Entry of `configuration/countries`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbCountry {
    /// ISO 3166-1 code.
    pub iso_3166_1: String,
    /// English name.
    pub english_name: Option<String>,
    /// Native name.
    pub native_name: Option<String>,
}

/// Entry of `configuration/languages`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbLanguage {
    /// ISO 639-1 code.
    pub iso_639_1: String,
    /// English name.
    pub english_name: Option<String>,
    /// Native name.
    pub name: Option<String>,
}

/// Keyword entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbKeyword {
    /// Keyword ID.
    pub id: u64,
    /// Keyword text.
    pub name: String,
}

// --- Account ---

/// Response from `account`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbAccountDetails {
    /// v3 account ID.
    pub id: u64,
    /// Display name.
    pub name: Option<String>,
    /// Username.
    pub username: Option<String>,
    /// Avatar hashes.
    pub avatar: Option<TmdbAvatar>,
}

/// Avatar section of the account details.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbAvatar {
    /// Gravatar settings.
    pub gravatar: Option<TmdbGravatar>,
}

/// Gravatar hash.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbGravatar {
    /// MD5 hash of the account e-mail.
    pub hash: Option<String>,
}

/// Response from `tv/{series_id}/account_states`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbAccountStates {
    /// Favorited flag.
    pub favorite: bool,
    /// Watchlisted flag.
    pub watchlist: bool,
}

// --- Authentication ---

/// Response from `4/auth/request_token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbRequestToken {
    /// Request token to be approved by the user.
    pub request_token: String,
}

/// Response from `4/auth/access_token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbAccessToken {
    /// v4 account object ID.
    pub account_id: String,
    /// v4 user access token.
    pub access_token: String,
}

/// Response from `3/authentication/session/convert/4`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSession {
    /// v3 session ID.
    pub session_id: String,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}
