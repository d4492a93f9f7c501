//! View models returned by the client and served as JSON.
//!
//! Every record is an immutable snapshot built per request by the
//! functions in [`crate::normalize`]; identifiers are TMDB-assigned.

use serde::{Deserialize, Serialize};

/// A single episode of a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// TMDB episode ID.
    pub id: u64,
    /// Episode name (empty when upstream has none).
    pub title: String,
    /// Overview text.
    pub description: String,
    /// Episode number within the season.
    pub episode_number: u32,
    /// Season number.
    pub season_number: u32,
    /// ISO 8601 air date, or empty.
    pub air_date: String,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Absolute still image URL, or empty.
    pub still_image: String,
}

/// A season, with its episodes when fetched individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    /// TMDB season ID.
    pub id: u64,
    /// Season name.
    pub title: String,
    /// Overview text.
    pub description: String,
    /// ISO 8601 air date, or empty.
    pub air_date: String,
    /// Season number (0 = specials).
    pub season_number: u32,
    /// Episodes; empty for season summaries.
    pub episodes: Vec<Episode>,
    /// Episode count, only known for season summaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,
}

/// Genre reference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// TMDB genre ID.
    pub id: u32,
    /// Display name.
    pub name: String,
}

/// Cast, crew or creator entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// TMDB person ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Character(s) played, for cast members.
    pub character: Option<String>,
    /// Job(s), for crew members.
    pub job: Option<String>,
    /// Absolute profile image URL.
    pub profile_image: Option<String>,
    /// Number of episodes the person appears in.
    pub number_of_episodes: Option<u32>,
}

/// Production country of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 code.
    pub code: String,
    /// English name.
    pub name: String,
}

/// Spoken language of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    /// ISO 639-1 code.
    pub code: String,
    /// English name.
    pub english_name: String,
    /// Native name.
    pub name: String,
}

/// Entry of the TMDB country or language configuration lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryOrLanguage {
    /// ISO code.
    pub code: String,
    /// English name (may be empty).
    pub english_name: String,
    /// Native name.
    pub name: String,
}

/// TV series view model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvSeries {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub title: String,
    /// Original name.
    pub original_title: String,
    /// URL slug derived from the title.
    pub slug: String,
    /// Tagline.
    pub tagline: String,
    /// Overview text.
    pub description: String,
    /// Absolute poster URL.
    pub poster_image: Option<String>,
    /// Absolute backdrop URL.
    pub backdrop_image: Option<String>,
    /// Average backdrop colour as `#rrggbb`.
    pub backdrop_color: Option<String>,
    /// Absolute logo URL used in place of the title text.
    pub title_treatment_image: Option<String>,
    /// Genres.
    pub genres: Vec<Genre>,
    /// Production countries.
    pub countries: Vec<Country>,
    /// Spoken languages.
    pub languages: Vec<Language>,
    /// Creators.
    pub created_by: Vec<Person>,
    /// ISO 8601 first air date, or empty.
    pub first_air_date: String,
    /// ISO 8601 last air date, or empty.
    pub last_air_date: String,
    /// Year of the first air date, or empty.
    pub release_year: String,
    /// Most recently aired episode.
    pub last_episode_to_air: Option<Episode>,
    /// Next scheduled episode.
    pub next_episode_to_air: Option<Episode>,
    /// Total number of episodes.
    pub number_of_episodes: u32,
    /// Total number of seasons.
    pub number_of_seasons: u32,
    /// Typical episode runtime in minutes (0 when unknown).
    pub runtime: u32,
    /// Adult flag.
    pub is_adult: bool,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Seasons with at least one episode; only set on detail fetches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<Vec<Season>>,
}

/// Per-account state of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvSeriesAccountStates {
    /// Marked as favorite.
    pub is_favorited: bool,
    /// On the watchlist.
    pub is_watchlisted: bool,
}

/// Authenticated TMDB account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// TMDB v3 account ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Username.
    pub username: String,
    /// Gravatar URL.
    pub avatar: Option<String>,
}

/// Streaming provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchProvider {
    /// TMDB provider ID.
    pub id: u32,
    /// Provider name.
    pub name: String,
    /// Absolute logo URL, or empty.
    pub logo: String,
}

/// Keyword reference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    /// TMDB keyword ID.
    pub id: u64,
    /// Keyword text.
    pub name: String,
}

/// Aggregate credits of a series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credits {
    /// Cast ordered by credit order.
    pub cast: Vec<Person>,
    /// Crew in upstream order.
    pub crew: Vec<Person>,
}

/// One page of series from a paginated endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedTvSeries {
    /// Series on this page.
    pub items: Vec<TvSeries>,
    /// Total number of pages.
    pub total_number_of_pages: u32,
    /// Total number of items.
    pub total_number_of_items: u32,
}

/// One page of discover results plus the caller's query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverPage {
    /// Series on this page.
    pub items: Vec<TvSeries>,
    /// Total number of pages.
    pub total_number_of_pages: u32,
    /// Total number of items.
    pub total_number_of_items: u32,
    /// Encoded caller query (`?k=v&...`), empty when no query was given.
    pub query_string: String,
}

/// Result of exchanging an approved request token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// TMDB v4 account object ID.
    pub account_object_id: String,
    /// v4 user access token.
    pub access_token: String,
}
