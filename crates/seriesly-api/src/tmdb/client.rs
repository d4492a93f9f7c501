//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::cache::{DEFAULT_CAPACITY, FetchCache};
use super::params::{
    AccountListKind, CURATED_GENRES_TO_IGNORE, DiscoverQuery, GLOBAL_GENRES_TO_IGNORE, ToggleArgs,
};
use super::request::{FetchOptions, TmdbStatusError};
use super::types::{
    TmdbAccessToken, TmdbAccountDetails, TmdbAccountStates, TmdbAggregateCredits,
    TmdbContentRatings, TmdbCountry, TmdbErrorResponse, TmdbGenreList, TmdbKeyword, TmdbLanguage,
    TmdbPage, TmdbRequestToken, TmdbSeason, TmdbSeriesWatchProviders, TmdbSession, TmdbTvSeries,
    TmdbWatchProviderList,
};
use crate::colour::average_colour;
use crate::fanout::hydrate_in_order;
use crate::models::{
    AccessToken, Account, CountryOrLanguage, Credits, DiscoverPage, Genre, Keyword,
    PagedTvSeries, Season, TvSeries, TvSeriesAccountStates, WatchProvider,
};
use crate::normalize::{
    BACKDROP_COLOUR_SIZE, TMDB_IMAGE_BASE_URL, normalize_account, normalize_countries,
    normalize_credits, normalize_languages, normalize_season, normalize_season_summaries,
    normalize_tv_series, normalize_watch_providers, sort_watch_providers_for_region,
};

/// Default base URL for the TMDB API (paths carry the `/3/` or `/4/` version).
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/";

/// Number of trending series hydrated to full details.
const TRENDING_LIMIT: usize = 10;

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Base URL for image downloads (backdrop colour detection).
    image_base_url: Url,
    /// v3 API key.
    api_key: String,
    /// v4 API read access token.
    access_token: String,
    /// Fetch cache for revalidating GET requests.
    cache: FetchCache,
    /// Whether detail fetches compute the backdrop colour.
    detect_backdrop_colour: bool,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    image_base_url: Option<Url>,
    api_key: Option<String>,
    access_token: Option<String>,
    user_agent: Option<String>,
    cache_capacity: Option<u64>,
    detect_backdrop_colour: bool,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            image_base_url: None,
            api_key: None,
            access_token: None,
            user_agent: None,
            cache_capacity: None,
            detect_backdrop_colour: true,
        }
    }

    /// Overrides the API base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the image base URL used to download backdrops.
    #[must_use]
    pub fn image_base_url(mut self, url: Url) -> Self {
        self.image_base_url = Some(url);
        self
    }

    /// Sets the v3 API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the v4 read access token (required).
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the maximum number of cached responses (default: 10,000).
    #[must_use]
    pub const fn cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Enables or disables backdrop colour detection (default: enabled).
    #[must_use]
    pub const fn detect_backdrop_colour(mut self, enabled: bool) -> Self {
        self.detect_backdrop_colour = enabled;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set.
    /// - `access_token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_key = self.api_key.context("api_key is required")?;
        let access_token = self.access_token.context("access_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?,
        };
        let image_base_url = match self.image_base_url {
            Some(url) => url,
            None => Url::parse(TMDB_IMAGE_BASE_URL).context("invalid default image base URL")?,
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            image_base_url,
            api_key,
            access_token,
            cache: FetchCache::new(self.cache_capacity.unwrap_or(DEFAULT_CAPACITY)),
            detect_backdrop_colour: self.detect_backdrop_colour,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Resolves `path` against the base URL, appending query pairs and, for
    /// v3 paths, the API key.
    fn build_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let is_v3 = path.starts_with("/3/");
        if !query.is_empty() || is_v3 {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            if is_v3 {
                pairs.append_pair("api_key", &self.api_key);
            }
        }

        Ok(url)
    }

    /// Default headers for `path`, overridden by the caller's headers.
    fn build_headers(&self, path: &str, extra: &HeaderMap) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if path.starts_with("/4/") {
            let bearer = HeaderValue::from_str(&format!("Bearer {}", self.access_token))
                .context("access token is not a valid header value")?;
            headers.insert(AUTHORIZATION, bearer);
        }
        for (name, value) in extra {
            headers.insert(name.clone(), value.clone());
        }
        Ok(headers)
    }

    /// Sends a request to a `/3/...` or `/4/...` path.
    ///
    /// - HTTP 404 yields `Ok(None)`.
    /// - Any other non-success status yields a [`TmdbStatusError`].
    /// - GET requests with a revalidate policy are served from, and stored
    ///   in, the fetch cache.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or
    /// undecodable JSON.
    #[instrument(skip_all, fields(path = %path))]
    pub async fn fetch(
        &self,
        path: &str,
        query: &[(&str, String)],
        options: FetchOptions,
    ) -> Result<Option<Value>> {
        let url = self.build_url(path, query)?;
        let cache_ttl = if options.method == Method::GET {
            options.cache.ttl()
        } else {
            None
        };

        if cache_ttl.is_some()
            && let Some(cached) = self.cache.get(url.as_str()).await
        {
            tracing::debug!("TMDB fetch cache hit");
            return Ok(Some(cached));
        }

        let headers = self.build_headers(path, &options.headers)?;
        let mut request = self
            .http_client
            .request(options.method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = &options.body {
            let bytes = serde_json::to_vec(body).context("failed to encode request body")?;
            request = request.body(bytes);
        }

        tracing::debug!(method = %options.method, "TMDB API request");

        // Errors must not carry the URL; v3 query strings hold the API key.
        let response = request
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("request failed: {path}"))?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!("TMDB API returned 404");
            return Ok(None);
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let message = serde_json::from_str::<TmdbErrorResponse>(&body)
                .map(|error| error.status_message)
                .ok();
            return Err(TmdbStatusError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("failed to read response body: {path}"))?;
        let value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)
                .with_context(|| format!("failed to decode JSON response: {path}"))?
        };

        if let Some(ttl) = cache_ttl {
            self.cache.insert(url.to_string(), value.clone(), ttl).await;
        }

        Ok(Some(value))
    }

    /// [`Self::fetch`] followed by deserialization into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not match `T`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        options: FetchOptions,
    ) -> Result<Option<T>> {
        let Some(value) = self.fetch(path, query, options).await? else {
            return Ok(None);
        };
        let parsed = serde_json::from_value::<T>(value)
            .with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(Some(parsed))
    }

    /// Downloads a reduced backdrop rendition and averages its colour.
    async fn backdrop_colour(&self, backdrop_path: &str) -> Result<String> {
        let url = self
            .image_base_url
            .join(&format!(
                "{BACKDROP_COLOUR_SIZE}/{}",
                backdrop_path.trim_start_matches('/')
            ))
            .context("failed to build backdrop URL")?;

        let bytes = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("backdrop request failed")?
            .error_for_status()
            .map_err(reqwest::Error::without_url)
            .context("backdrop request returned an error status")?
            .bytes()
            .await
            .map_err(reqwest::Error::without_url)
            .context("failed to read backdrop body")?;

        tokio::task::spawn_blocking(move || average_colour(&bytes))
            .await
            .context("backdrop colour task panicked")?
    }

    /// Fetches a paginated series list and keeps only poster-bearing results.
    async fn fetch_series_with_posters(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<TvSeries>> {
        let page: TmdbPage<TmdbTvSeries> = self
            .fetch_json(path, query, FetchOptions::new())
            .await?
            .unwrap_or_else(empty_page);

        Ok(page
            .results
            .iter()
            .filter(|series| series.poster_path.as_deref().is_some_and(|p| !p.is_empty()))
            .map(normalize_tv_series)
            .collect())
    }
}

/// Empty result envelope used when a list endpoint returns 404.
const fn empty_page<T>() -> TmdbPage<T> {
    TmdbPage {
        page: 0,
        results: Vec::new(),
        total_pages: 0,
        total_results: 0,
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn create_request_token(&self, redirect_to: &str) -> Result<String> {
        let options = FetchOptions::no_store()
            .method(Method::POST)
            .json(json!({ "redirect_to": redirect_to }));
        let response: TmdbRequestToken = self
            .fetch_json("/4/auth/request_token", &[], options)
            .await?
            .context("TMDB request token endpoint returned 404")?;
        Ok(response.request_token)
    }

    #[instrument(skip_all)]
    async fn create_access_token(&self, request_token: &str) -> Result<AccessToken> {
        let options = FetchOptions::no_store()
            .method(Method::POST)
            .json(json!({ "request_token": request_token }));
        let response: TmdbAccessToken = self
            .fetch_json("/4/auth/access_token", &[], options)
            .await?
            .context("TMDB access token endpoint returned 404")?;
        Ok(AccessToken {
            account_object_id: response.account_id,
            access_token: response.access_token,
        })
    }

    #[instrument(skip_all)]
    async fn create_session_id(&self, access_token: &str) -> Result<String> {
        let options = FetchOptions::no_store()
            .method(Method::POST)
            .json(json!({ "access_token": access_token }));
        let response: TmdbSession = self
            .fetch_json("/3/authentication/session/convert/4", &[], options)
            .await?
            .context("TMDB session endpoint returned 404")?;
        Ok(response.session_id)
    }

    #[instrument(skip_all)]
    async fn delete_session_id(&self, session_id: &str) -> Result<()> {
        let options = FetchOptions::no_store()
            .method(Method::DELETE)
            .json(json!({ "session_id": session_id }));
        self.fetch("/3/authentication/session", &[], options).await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn delete_access_token(&self, access_token: &str) -> Result<()> {
        let options = FetchOptions::no_store()
            .method(Method::DELETE)
            .json(json!({ "access_token": access_token }));
        self.fetch("/4/auth/access_token", &[], options).await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn fetch_account_details(&self, session_id: &str) -> Result<Option<Account>> {
        let query = [("session_id", String::from(session_id))];
        let details: Option<TmdbAccountDetails> = self
            .fetch_json("/3/account", &query, FetchOptions::new())
            .await?;
        Ok(details.as_ref().map(normalize_account))
    }

    #[instrument(skip_all, fields(list = %kind, page = page))]
    async fn fetch_account_list(
        &self,
        kind: AccountListKind,
        account_id: u64,
        session_id: &str,
        page: u32,
    ) -> Result<PagedTvSeries> {
        let path = format!("/3/account/{account_id}/{}/tv", kind.path_segment());
        let query = [
            ("session_id", String::from(session_id)),
            ("sort_by", String::from("created_at.desc")),
            ("page", page.to_string()),
        ];
        let response: TmdbPage<TmdbTvSeries> = self
            .fetch_json(&path, &query, FetchOptions::no_store())
            .await?
            .unwrap_or_else(empty_page);

        Ok(PagedTvSeries {
            items: response.results.iter().map(normalize_tv_series).collect(),
            total_number_of_pages: response.total_pages,
            total_number_of_items: response.total_results,
        })
    }

    #[instrument(skip_all, fields(list = %kind, id = args.id))]
    async fn update_account_list(&self, kind: AccountListKind, args: &ToggleArgs) -> Result<()> {
        let segment = kind.path_segment();
        let path = format!("/3/account/{}/{segment}", args.account_id);
        let query = [("session_id", args.session_id.clone())];
        let options = FetchOptions::no_store().method(Method::POST).json(json!({
            "media_type": "tv",
            "media_id": args.id,
            segment: args.value,
        }));
        self.fetch(&path, &query, options).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(id = id))]
    async fn fetch_tv_series_account_states(
        &self,
        id: u64,
        session_id: &str,
    ) -> Result<TvSeriesAccountStates> {
        let path = format!("/3/tv/{id}/account_states");
        let query = [("session_id", String::from(session_id))];
        let states: Option<TmdbAccountStates> = self
            .fetch_json(&path, &query, FetchOptions::no_store())
            .await?;
        Ok(states.map_or_else(TvSeriesAccountStates::default, |s| {
            TvSeriesAccountStates {
                is_favorited: s.favorite,
                is_watchlisted: s.watchlist,
            }
        }))
    }

    #[instrument(skip_all, fields(id = id))]
    async fn fetch_tv_series(&self, id: u64) -> Result<Option<TvSeries>> {
        let path = format!("/3/tv/{id}");
        let query = [
            ("append_to_response", String::from("images")),
            ("include_image_language", String::from("en,null")),
        ];
        let Some(series): Option<TmdbTvSeries> =
            self.fetch_json(&path, &query, FetchOptions::new()).await?
        else {
            return Ok(None);
        };

        let mut normalized = normalize_tv_series(&series);
        normalized.seasons = Some(normalize_season_summaries(&series.seasons));

        if self.detect_backdrop_colour
            && let Some(backdrop_path) = series.backdrop_path.as_deref().filter(|p| !p.is_empty())
        {
            match self.backdrop_colour(backdrop_path).await {
                Ok(colour) => normalized.backdrop_color = Some(colour),
                Err(e) => tracing::warn!(id, "failed to detect backdrop colour: {e:#}"),
            }
        }

        Ok(Some(normalized))
    }

    #[instrument(skip_all, fields(id = id, region = %region))]
    async fn fetch_tv_series_content_rating(
        &self,
        id: u64,
        region: &str,
    ) -> Result<Option<String>> {
        let path = format!("/3/tv/{id}/content_ratings");
        let ratings: Option<TmdbContentRatings> =
            self.fetch_json(&path, &[], FetchOptions::new()).await?;
        Ok(ratings.and_then(|r| {
            r.results
                .into_iter()
                .find(|rating| rating.iso_3166_1 == region)
                .map(|rating| rating.rating)
        }))
    }

    #[instrument(skip_all, fields(id = id, region = %region))]
    async fn fetch_tv_series_watch_providers(
        &self,
        id: u64,
        region: &str,
    ) -> Result<Vec<WatchProvider>> {
        let path = format!("/3/tv/{id}/watch/providers");
        let providers: Option<TmdbSeriesWatchProviders> =
            self.fetch_json(&path, &[], FetchOptions::new()).await?;
        Ok(providers
            .and_then(|p| p.results.get(region).map(|r| normalize_watch_providers(&r.flatrate)))
            .unwrap_or_default())
    }

    #[instrument(skip_all, fields(id = id))]
    async fn fetch_tv_series_credits(&self, id: u64) -> Result<Credits> {
        let path = format!("/3/tv/{id}/aggregate_credits");
        let credits: TmdbAggregateCredits = self
            .fetch_json(&path, &[], FetchOptions::new())
            .await?
            .unwrap_or_default();
        Ok(normalize_credits(&credits))
    }

    #[instrument(skip_all, fields(id = id))]
    async fn fetch_tv_series_recommendations(&self, id: u64) -> Result<Vec<TvSeries>> {
        self.fetch_series_with_posters(&format!("/3/tv/{id}/recommendations"), &[])
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn fetch_tv_series_similar(&self, id: u64) -> Result<Vec<TvSeries>> {
        self.fetch_series_with_posters(&format!("/3/tv/{id}/similar"), &[])
            .await
    }

    #[instrument(skip_all, fields(id = id, season = season))]
    async fn fetch_tv_series_season(&self, id: u64, season: u32) -> Result<Option<Season>> {
        let path = format!("/3/tv/{id}/season/{season}");
        let response: Option<TmdbSeason> =
            self.fetch_json(&path, &[], FetchOptions::new()).await?;
        Ok(response.as_ref().map(normalize_season))
    }

    #[instrument(skip_all)]
    async fn fetch_trending_tv_series(&self) -> Result<Vec<TvSeries>> {
        let response: TmdbPage<TmdbTvSeries> = self
            .fetch_json("/3/trending/tv/day", &[], FetchOptions::new())
            .await?
            .unwrap_or_else(empty_page);

        let ids: Vec<u64> = response
            .results
            .iter()
            .filter(|series| {
                series.vote_count > 0
                    && !series.genre_ids.iter().any(|genre| {
                        GLOBAL_GENRES_TO_IGNORE.contains(genre)
                            || CURATED_GENRES_TO_IGNORE.contains(genre)
                    })
            })
            .map(|series| series.id)
            .take(TRENDING_LIMIT)
            .collect();

        tracing::debug!(count = ids.len(), "hydrating trending series");
        hydrate_in_order(ids, |id| self.fetch_tv_series(id)).await
    }

    #[instrument(skip_all)]
    async fn fetch_discover_tv_series(&self, query: &DiscoverQuery) -> Result<DiscoverPage> {
        let merged = query.with_defaults();
        let response: TmdbPage<TmdbTvSeries> = self
            .fetch_json("/3/discover/tv", &merged.pairs(), FetchOptions::new())
            .await?
            .unwrap_or_else(empty_page);

        Ok(DiscoverPage {
            items: response.results.iter().map(normalize_tv_series).collect(),
            total_number_of_pages: response.total_pages,
            total_number_of_items: response.total_results,
            query_string: query.to_query_string(),
        })
    }

    #[instrument(skip_all)]
    async fn fetch_genres_for_tv_series(&self) -> Result<Vec<Genre>> {
        let response: TmdbGenreList = self
            .fetch_json("/3/genre/tv/list", &[], FetchOptions::new())
            .await?
            .unwrap_or_default();
        Ok(response
            .genres
            .into_iter()
            .filter(|genre| !GLOBAL_GENRES_TO_IGNORE.contains(&genre.id))
            .map(|genre| Genre {
                id: genre.id,
                name: genre.name,
            })
            .collect())
    }

    #[instrument(skip_all)]
    async fn search_tv_series(&self, query: &str) -> Result<Vec<TvSeries>> {
        let params = [
            ("include_adult", String::from("false")),
            ("page", String::from("1")),
            ("query", String::from(query)),
        ];
        self.fetch_series_with_posters("/3/search/tv", &params).await
    }

    #[instrument(skip_all, fields(region = %region))]
    async fn fetch_watch_providers(&self, region: &str) -> Result<Vec<WatchProvider>> {
        let query = [("watch_region", String::from(region))];
        let response: TmdbWatchProviderList = self
            .fetch_json("/3/watch/providers/tv", &query, FetchOptions::new())
            .await?
            .unwrap_or_default();
        Ok(sort_watch_providers_for_region(&response.results, region))
    }

    #[instrument(skip_all)]
    async fn fetch_countries(&self) -> Result<Vec<CountryOrLanguage>> {
        let response: Vec<TmdbCountry> = self
            .fetch_json("/3/configuration/countries", &[], FetchOptions::new())
            .await?
            .unwrap_or_default();
        Ok(normalize_countries(&response))
    }

    #[instrument(skip_all)]
    async fn fetch_languages(&self) -> Result<Vec<CountryOrLanguage>> {
        let response: Vec<TmdbLanguage> = self
            .fetch_json("/3/configuration/languages", &[], FetchOptions::new())
            .await?
            .unwrap_or_default();
        Ok(normalize_languages(&response))
    }

    #[instrument(skip_all, fields(id = id))]
    async fn fetch_keyword(&self, id: u64) -> Result<Option<Keyword>> {
        let path = format!("/3/keyword/{id}");
        let keyword: Option<TmdbKeyword> =
            self.fetch_json(&path, &[], FetchOptions::new()).await?;
        Ok(keyword.map(|k| Keyword {
            id: k.id,
            name: k.name,
        }))
    }

    #[instrument(skip_all)]
    async fn search_keywords(&self, query: &str) -> Result<Vec<Keyword>> {
        let params = [("query", String::from(query))];
        let response: TmdbPage<TmdbKeyword> = self
            .fetch_json("/3/search/keyword", &params, FetchOptions::new())
            .await?
            .unwrap_or_else(empty_page);
        Ok(response
            .results
            .into_iter()
            .map(|k| Keyword {
                id: k.id,
                name: k.name,
            })
            .collect())
    }
}
