//! TMDB API utility functions built on top of [`TmdbApi`].

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::instrument;

use super::api::TmdbApi;
use super::params::{
    AccountListKind, CURATED_GENRES_TO_IGNORE, DiscoverQuery, GLOBAL_GENRES_TO_IGNORE, join_ids,
};
use crate::models::{PagedTvSeries, TvSeries};

/// Apple TV+ watch provider ID.
const APPLE_TV_PLUS_PROVIDER_ID: u32 = 350;

/// Returns `true` when the series carries both a poster and a backdrop.
fn has_artwork(series: &TvSeries) -> bool {
    series.poster_image.is_some() && series.backdrop_image.is_some()
}

/// Fetches one page of the account's watchlist, most recently added first.
///
/// # Errors
///
/// Returns an error if the underlying API request fails.
pub async fn fetch_watchlist(
    api: &(impl TmdbApi + Sync),
    account_id: u64,
    session_id: &str,
    page: u32,
) -> Result<PagedTvSeries> {
    api.fetch_account_list(AccountListKind::Watchlist, account_id, session_id, page)
        .await
        .with_context(|| format!("failed to fetch watchlist page {page}"))
}

/// Fetches one page of the account's favorites, most recently added first.
///
/// # Errors
///
/// Returns an error if the underlying API request fails.
pub async fn fetch_favorites(
    api: &(impl TmdbApi + Sync),
    account_id: u64,
    session_id: &str,
    page: u32,
) -> Result<PagedTvSeries> {
    api.fetch_account_list(AccountListKind::Favorites, account_id, session_id, page)
        .await
        .with_context(|| format!("failed to fetch favorites page {page}"))
}

/// Popular British crime dramas with full artwork.
///
/// # Errors
///
/// Returns an error if the discover request fails.
#[instrument(skip_all)]
pub async fn fetch_popular_british_crime_tv_series(
    api: &(impl TmdbApi + Sync),
) -> Result<Vec<TvSeries>> {
    let query = DiscoverQuery::new()
        .set("language", "en-GB")
        .set("sort_by", "popularity.desc")
        .set("vote_count.gte", 250)
        .set("watch_region", "GB")
        .set("with_genres", 80)
        .set("without_genres", 10766)
        .set("with_origin_country", "GB")
        .set("with_original_language", "en");

    let page = api.fetch_discover_tv_series(&query).await?;
    Ok(page.items.into_iter().filter(has_artwork).collect())
}

/// Highest rated sports documentaries with full artwork.
///
/// # Errors
///
/// Returns an error if the discover request fails.
#[instrument(skip_all)]
pub async fn fetch_best_sports_documentaries_tv_series(
    api: &(impl TmdbApi + Sync),
) -> Result<Vec<TvSeries>> {
    let query = DiscoverQuery::new()
        .set("sort_by", "vote_average.desc")
        .set("vote_count.gte", 7)
        .set("with_genres", 99)
        .set("without_genres", 35)
        // sport | sports documentary
        .set("with_keywords", "6075|2702")
        .set("without_keywords", "10596,293434,288928,11672");

    let page = api.fetch_discover_tv_series(&query).await?;
    Ok(page.items.into_iter().filter(has_artwork).collect())
}

/// Highest rated Apple TV+ series available in `region`.
///
/// # Errors
///
/// Returns an error if the discover request fails.
#[instrument(skip_all, fields(region = %region))]
pub async fn fetch_apple_plus_tv_series(
    api: &(impl TmdbApi + Sync),
    region: &str,
) -> Result<Vec<TvSeries>> {
    let query = DiscoverQuery::new()
        .set("sort_by", "vote_average.desc")
        .set("vote_count.gte", 250)
        .set("without_genres", 99)
        .set("watch_region", region)
        .set("with_watch_providers", APPLE_TV_PLUS_PROVIDER_ID);

    Ok(api.fetch_discover_tv_series(&query).await?.items)
}

/// Series premiering on or after `today`, with full artwork.
///
/// # Errors
///
/// Returns an error if the discover request fails.
#[instrument(skip_all, fields(today = %today))]
pub async fn fetch_most_anticipated_tv_series(
    api: &(impl TmdbApi + Sync),
    today: NaiveDate,
) -> Result<Vec<TvSeries>> {
    let without: Vec<u32> = GLOBAL_GENRES_TO_IGNORE
        .iter()
        .chain(CURATED_GENRES_TO_IGNORE.iter())
        .copied()
        .collect();
    let query = DiscoverQuery::new()
        .set("without_genres", join_ids(&without))
        .set("first_air_date.gte", today.format("%Y-%m-%d"))
        .set("vote_count.gte", 0);

    let page = api.fetch_discover_tv_series(&query).await?;
    Ok(page.items.into_iter().filter(has_artwork).collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::client::TmdbClient;
    use super::*;

    fn build_client(server: &MockServer) -> TmdbClient {
        TmdbClient::builder()
            .base_url(format!("{}/", server.uri()).parse().unwrap())
            .api_key("test-key")
            .access_token("test-token")
            .user_agent("test/0.0.0")
            .detect_backdrop_colour(false)
            .build()
            .unwrap()
    }

    async fn mount_discover(server: &MockServer, matchers: &[(&str, &str)]) {
        let json_body = include_str!("../../../../fixtures/tmdb/discover_tv.json");
        let mut mock = Mock::given(method("GET")).and(path("/3/discover/tv"));
        for (key, value) in matchers {
            mock = mock.and(query_param(*key, *value));
        }
        mock.respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_watchlist_and_favorites_use_their_lists() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/account_watchlist_tv.json");
        for segment in ["watchlist", "favorite"] {
            Mock::given(method("GET"))
                .and(path(format!("/3/account/548/{segment}/tv")))
                .and(query_param("page", "1"))
                .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
                .expect(1)
                .mount(&mock_server)
                .await;
        }
        let client = build_client(&mock_server);

        // Act
        let watchlist = fetch_watchlist(&client, 548, "session", 1).await.unwrap();
        let favorites = fetch_favorites(&client, 548, "session", 1).await.unwrap();

        // Assert
        assert_eq!(watchlist.items.len(), 2);
        assert_eq!(favorites.total_number_of_items, 42);
    }

    #[tokio::test]
    async fn test_british_crime_requires_artwork() {
        // Arrange
        let mock_server = MockServer::start().await;
        mount_discover(
            &mock_server,
            &[
                ("language", "en-GB"),
                ("vote_count.gte", "250"),
                ("watch_region", "GB"),
                ("with_genres", "80"),
                ("without_genres", "10763,10764,10766,10767"),
                ("with_origin_country", "GB"),
                ("with_original_language", "en"),
            ],
        )
        .await;
        let client = build_client(&mock_server);

        // Act
        let rows = fetch_popular_british_crime_tv_series(&client).await.unwrap();

        // Assert
        let ids: Vec<u64> = rows.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![201]);
    }

    #[tokio::test]
    async fn test_sports_documentaries_query() {
        // Arrange
        let mock_server = MockServer::start().await;
        mount_discover(
            &mock_server,
            &[
                ("sort_by", "vote_average.desc"),
                ("vote_count.gte", "7"),
                ("with_genres", "99"),
                ("without_genres", "10763,10764,10766,10767,35"),
                ("with_keywords", "6075|2702"),
                ("without_keywords", "10596,293434,288928,11672"),
            ],
        )
        .await;
        let client = build_client(&mock_server);

        // Act
        let rows = fetch_best_sports_documentaries_tv_series(&client)
            .await
            .unwrap();

        // Assert
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_apple_plus_keeps_all_items() {
        // Arrange
        let mock_server = MockServer::start().await;
        mount_discover(
            &mock_server,
            &[
                ("watch_region", "GB"),
                ("with_watch_providers", "350"),
                ("without_genres", "10763,10764,10766,10767,99"),
            ],
        )
        .await;
        let client = build_client(&mock_server);

        // Act
        let rows = fetch_apple_plus_tv_series(&client, "GB").await.unwrap();

        // Assert
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn test_most_anticipated_starts_today() {
        // Arrange
        let mock_server = MockServer::start().await;
        mount_discover(
            &mock_server,
            &[
                ("first_air_date.gte", "2026-10-19"),
                ("vote_count.gte", "0"),
                ("without_genres", "10763,10764,10766,10767,16,10762"),
            ],
        )
        .await;
        let client = build_client(&mock_server);
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        // Act
        let rows = fetch_most_anticipated_tv_series(&client, today)
            .await
            .unwrap();

        // Assert
        let ids: Vec<u64> = rows.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![201]);
    }
}
