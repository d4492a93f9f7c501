//! Request parameters for account lists and discover queries.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::bail;

/// Genres hidden everywhere: News, Reality, Soap, Talk.
pub const GLOBAL_GENRES_TO_IGNORE: [u32; 4] = [10763, 10764, 10766, 10767];

/// Genres additionally hidden from trending and anticipated rows: Animation, Kids.
pub const CURATED_GENRES_TO_IGNORE: [u32; 2] = [16, 10762];

/// Per-account series list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountListKind {
    /// Series the user wants to watch.
    Watchlist,
    /// Series the user marked as favorite.
    Favorites,
}

impl AccountListKind {
    /// Account path segment (`watchlist` or `favorite`).
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Watchlist => "watchlist",
            Self::Favorites => "favorite",
        }
    }
}

impl fmt::Display for AccountListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Watchlist => f.write_str("watchlist"),
            Self::Favorites => f.write_str("favorites"),
        }
    }
}

impl FromStr for AccountListKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "watchlist" => Ok(Self::Watchlist),
            "favorites" => Ok(Self::Favorites),
            other => bail!("unknown account list: {other}"),
        }
    }
}

/// Arguments for adding a series to, or removing it from, an account list.
#[derive(Debug, Clone)]
pub struct ToggleArgs {
    /// TMDB series ID.
    pub id: u64,
    /// v3 account ID.
    pub account_id: u64,
    /// v3 session ID.
    pub session_id: String,
    /// `true` to add, `false` to remove.
    pub value: bool,
}

/// Discover query as ordered key/value pairs.
///
/// Keys follow the TMDB names verbatim (`vote_count.gte`, `with_genres`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverQuery {
    params: BTreeMap<String, String>,
}

impl DiscoverQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Returns `true` when no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Merges `self` over the discover defaults and then applies the
    /// parameters that callers can never override.
    ///
    /// Adult content is always excluded and the globally ignored genres are
    /// always part of `without_genres`; caller exclusions are kept after them.
    #[must_use]
    pub fn with_defaults(&self) -> Self {
        let mut merged = Self::new()
            .set("page", 1)
            .set("sort_by", "popularity.desc")
            .set("vote_count.gte", 1);
        merged
            .params
            .extend(self.params.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut without: Vec<String> = GLOBAL_GENRES_TO_IGNORE
            .iter()
            .map(u32::to_string)
            .collect();
        for id in self.get("without_genres").unwrap_or_default().split(',') {
            let id = id.trim();
            if !id.is_empty() && !without.iter().any(|w| w == id) {
                without.push(String::from(id));
            }
        }

        merged
            .set("include_adult", false)
            .set("include_null_first_air_dates", false)
            .set("without_genres", without.join(","))
    }

    /// Query pairs suitable for `reqwest::RequestBuilder::query`.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&str, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect()
    }

    /// Encodes the query as `?k=v&...`, or an empty string when empty.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        format!("?{encoded}")
    }
}

/// Joins genre IDs with commas.
pub(crate) fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
