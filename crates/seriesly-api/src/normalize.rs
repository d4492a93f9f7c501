//! Pure mappings from TMDB response shapes to view models.
//!
//! Nothing here performs I/O; every function builds new records from
//! borrowed upstream data.

use chrono::{Datelike, NaiveDate};

use crate::models::{
    Account, Country, CountryOrLanguage, Credits, Episode, Genre, Language, Person, Season,
    TvSeries, WatchProvider,
};
use crate::tmdb::types::{
    TmdbAccountDetails, TmdbAggregateCredits, TmdbCountry, TmdbCredit, TmdbEpisode, TmdbImages,
    TmdbLanguage, TmdbSeason, TmdbSeasonSummary, TmdbTvSeries, TmdbWatchProvider,
};

/// TMDB image CDN base.
pub const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Poster size token.
pub const POSTER_SIZE: &str = "w600_and_h900_bestv2";
/// Backdrop size token.
pub const BACKDROP_SIZE: &str = "w1920_and_h1080_multi_faces";
/// Reduced backdrop size token used for colour detection.
pub const BACKDROP_COLOUR_SIZE: &str = "w1280_and_h720_multi_faces";
/// Title treatment (logo) size token.
pub const TITLE_TREATMENT_SIZE: &str = "w500";
/// Episode still size token.
pub const STILL_SIZE: &str = "w454_and_h254_bestv2";
/// Provider logo size token.
pub const PROVIDER_LOGO_SIZE: &str = "w92";
/// Person profile size token.
pub const PROFILE_SIZE: &str = "w185";

/// Gravatar avatar base.
const GRAVATAR_BASE_URL: &str = "https://www.gravatar.com/avatar/";

/// Builds an absolute CDN URL from an image path and size token.
#[must_use]
pub fn tmdb_image_url(path: &str, size: &str) -> String {
    format!("{TMDB_IMAGE_BASE_URL}{size}{path}")
}

/// Like [`tmdb_image_url`] but skips missing or empty paths.
fn optional_image_url(path: Option<&str>, size: &str) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| tmdb_image_url(p, size))
}

/// Parses an upstream `YYYY-MM-DD` date; empty or malformed dates yield `None`.
fn parse_air_date(date: Option<&str>) -> Option<NaiveDate> {
    date.filter(|d| !d.is_empty())
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

/// Formats an upstream date as an ISO 8601 UTC timestamp at midnight.
///
/// Returns an empty string when the date is missing or malformed.
#[must_use]
pub fn format_air_date(date: Option<&str>) -> String {
    parse_air_date(date).map_or_else(String::new, |d| {
        d.format("%Y-%m-%dT00:00:00.000Z").to_string()
    })
}

/// Extracts the year of an upstream date, or an empty string.
#[must_use]
pub fn release_year(date: Option<&str>) -> String {
    parse_air_date(date).map_or_else(String::new, |d| d.year().to_string())
}

/// Lower-case ASCII slug with single dashes between words.
///
/// Characters outside `[a-z0-9]` act as separators, so titles written
/// entirely in other scripts produce an empty slug.
#[must_use]
pub fn slugify(title: &str) -> String {
    title
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Maps an episode.
#[must_use]
pub fn normalize_episode(episode: &TmdbEpisode) -> Episode {
    Episode {
        id: episode.id,
        title: episode.name.clone().unwrap_or_default(),
        description: episode.overview.clone().unwrap_or_default(),
        episode_number: episode.episode_number,
        season_number: episode.season_number,
        air_date: format_air_date(episode.air_date.as_deref()),
        runtime: episode.runtime,
        still_image: optional_image_url(episode.still_path.as_deref(), STILL_SIZE)
            .unwrap_or_default(),
    }
}

/// Maps a full season response including its episodes.
#[must_use]
pub fn normalize_season(season: &TmdbSeason) -> Season {
    Season {
        id: season.id,
        title: season.name.clone().unwrap_or_default(),
        description: season.overview.clone().unwrap_or_default(),
        air_date: format_air_date(season.air_date.as_deref()),
        season_number: season.season_number,
        episodes: season.episodes.iter().map(normalize_episode).collect(),
        episode_count: None,
    }
}

/// Maps the season summaries of a series, dropping seasons without episodes.
#[must_use]
pub fn normalize_season_summaries(seasons: &[TmdbSeasonSummary]) -> Vec<Season> {
    seasons
        .iter()
        .filter(|season| season.episode_count > 0)
        .map(|season| Season {
            id: season.id,
            title: season.name.clone().unwrap_or_default(),
            description: season.overview.clone().unwrap_or_default(),
            air_date: format_air_date(season.air_date.as_deref()),
            season_number: season.season_number,
            episodes: Vec::new(),
            episode_count: Some(season.episode_count),
        })
        .collect()
}

/// Picks the title treatment logo, preferring English artwork.
fn title_treatment(images: Option<&TmdbImages>) -> Option<String> {
    let logos = &images?.logos;
    let logo = logos
        .iter()
        .find(|logo| logo.iso_639_1.as_deref() == Some("en"))
        .or_else(|| logos.first())?;
    optional_image_url(Some(logo.file_path.as_str()), TITLE_TREATMENT_SIZE)
}

/// Maps a series from any endpoint (details, lists, search).
///
/// `seasons` and `backdrop_color` are left unset; detail fetches fill them.
#[must_use]
pub fn normalize_tv_series(series: &TmdbTvSeries) -> TvSeries {
    let title = series.name.clone().unwrap_or_default();
    let slug = match slugify(&title) {
        slug if slug.is_empty() => series.id.to_string(),
        slug => slug,
    };

    let genres = if series.genres.is_empty() {
        series
            .genre_ids
            .iter()
            .map(|&id| Genre {
                id,
                name: String::new(),
            })
            .collect()
    } else {
        series
            .genres
            .iter()
            .map(|g| Genre {
                id: g.id,
                name: g.name.clone(),
            })
            .collect()
    };

    let runtime = series
        .episode_run_time
        .first()
        .copied()
        .or_else(|| series.last_episode_to_air.as_ref().and_then(|e| e.runtime))
        .unwrap_or_default();

    TvSeries {
        id: series.id,
        original_title: series.original_name.clone().unwrap_or_else(|| title.clone()),
        slug,
        tagline: series.tagline.clone().unwrap_or_default(),
        description: series.overview.clone().unwrap_or_default(),
        poster_image: optional_image_url(series.poster_path.as_deref(), POSTER_SIZE),
        backdrop_image: optional_image_url(series.backdrop_path.as_deref(), BACKDROP_SIZE),
        backdrop_color: None,
        title_treatment_image: title_treatment(series.images.as_ref()),
        genres,
        countries: series
            .production_countries
            .iter()
            .map(|c| Country {
                code: c.iso_3166_1.clone(),
                name: c.name.clone(),
            })
            .collect(),
        languages: series
            .spoken_languages
            .iter()
            .map(|l| Language {
                code: l.iso_639_1.clone(),
                english_name: l.english_name.clone(),
                name: l.name.clone(),
            })
            .collect(),
        created_by: normalize_persons(&series.created_by),
        first_air_date: format_air_date(series.first_air_date.as_deref()),
        last_air_date: format_air_date(series.last_air_date.as_deref()),
        release_year: release_year(series.first_air_date.as_deref()),
        last_episode_to_air: series.last_episode_to_air.as_ref().map(normalize_episode),
        next_episode_to_air: series.next_episode_to_air.as_ref().map(normalize_episode),
        number_of_episodes: series.number_of_episodes.unwrap_or_default(),
        number_of_seasons: series.number_of_seasons.unwrap_or_default(),
        runtime,
        is_adult: series.adult,
        vote_average: series.vote_average,
        vote_count: series.vote_count,
        seasons: None,
        title,
    }
}

/// Joins non-empty labels with `", "`.
fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Option<String> {
    let joined = labels
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    (!joined.is_empty()).then_some(joined)
}

/// Maps creators or aggregate credits, keeping their order.
#[must_use]
pub fn normalize_persons(persons: &[TmdbCredit]) -> Vec<Person> {
    persons
        .iter()
        .map(|person| Person {
            id: person.id,
            name: person.name.clone(),
            character: join_labels(person.roles.iter().map(|r| r.character.as_str())),
            job: join_labels(person.jobs.iter().map(|j| j.job.as_str())),
            profile_image: optional_image_url(person.profile_path.as_deref(), PROFILE_SIZE),
            number_of_episodes: person.total_episode_count,
        })
        .collect()
}

/// Maps aggregate credits; cast is ordered by ascending credit order.
#[must_use]
pub fn normalize_credits(credits: &TmdbAggregateCredits) -> Credits {
    let mut cast: Vec<&TmdbCredit> = credits.cast.iter().collect();
    cast.sort_by_key(|c| c.order);
    let cast: Vec<TmdbCredit> = cast.into_iter().cloned().collect();

    Credits {
        cast: normalize_persons(&cast),
        crew: normalize_persons(&credits.crew),
    }
}

fn to_watch_provider(provider: &TmdbWatchProvider) -> WatchProvider {
    WatchProvider {
        id: provider.provider_id,
        name: provider.provider_name.clone().unwrap_or_default(),
        logo: optional_image_url(provider.logo_path.as_deref(), PROVIDER_LOGO_SIZE)
            .unwrap_or_default(),
    }
}

/// Maps providers sorted by ascending `display_priority` (stable).
#[must_use]
pub fn normalize_watch_providers(providers: &[TmdbWatchProvider]) -> Vec<WatchProvider> {
    let mut sorted: Vec<&TmdbWatchProvider> = providers.iter().collect();
    sorted.sort_by_key(|p| p.display_priority);
    sorted.into_iter().map(to_watch_provider).collect()
}

/// Maps providers sorted by their priority in `region`, falling back to
/// the global `display_priority` when the region has no entry.
#[must_use]
pub fn sort_watch_providers_for_region(
    providers: &[TmdbWatchProvider],
    region: &str,
) -> Vec<WatchProvider> {
    let mut sorted: Vec<&TmdbWatchProvider> = providers.iter().collect();
    sorted.sort_by_key(|p| {
        p.display_priorities
            .get(region)
            .copied()
            .unwrap_or(p.display_priority)
    });
    sorted.into_iter().map(to_watch_provider).collect()
}

/// Sorts case-insensitively by English name, or by native name for
/// entries whose English name is empty.
pub fn sort_countries_or_languages(entries: &mut [CountryOrLanguage]) {
    entries.sort_by_cached_key(|entry| {
        if entry.english_name.is_empty() {
            entry.name.to_lowercase()
        } else {
            entry.english_name.to_lowercase()
        }
    });
}

/// Maps and sorts the country configuration list.
#[must_use]
pub fn normalize_countries(countries: &[TmdbCountry]) -> Vec<CountryOrLanguage> {
    let mut entries: Vec<CountryOrLanguage> = countries
        .iter()
        .map(|c| CountryOrLanguage {
            code: c.iso_3166_1.clone(),
            english_name: c.english_name.clone().unwrap_or_default(),
            name: c.native_name.clone().unwrap_or_default(),
        })
        .collect();
    sort_countries_or_languages(&mut entries);
    entries
}

/// Maps and sorts the language configuration list.
#[must_use]
pub fn normalize_languages(languages: &[TmdbLanguage]) -> Vec<CountryOrLanguage> {
    let mut entries: Vec<CountryOrLanguage> = languages
        .iter()
        .map(|l| CountryOrLanguage {
            code: l.iso_639_1.clone(),
            english_name: l.english_name.clone().unwrap_or_default(),
            name: l.name.clone().unwrap_or_default(),
        })
        .collect();
    sort_countries_or_languages(&mut entries);
    entries
}

/// Maps account details; the avatar is a Gravatar URL when a hash exists.
#[must_use]
pub fn normalize_account(details: &TmdbAccountDetails) -> Account {
    let avatar = details
        .avatar
        .as_ref()
        .and_then(|a| a.gravatar.as_ref())
        .and_then(|g| g.hash.as_deref())
        .filter(|hash| !hash.is_empty())
        .map(|hash| format!("{GRAVATAR_BASE_URL}{hash}"));

    Account {
        id: details.id,
        name: details.name.clone().unwrap_or_default(),
        username: details.username.clone().unwrap_or_default(),
        avatar,
    }
}
