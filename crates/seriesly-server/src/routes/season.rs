//! Season detail route.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::CACHE_CONTROL;
use axum::response::IntoResponse;
use seriesly_api::tmdb::TmdbApi;
use tracing::instrument;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// `Cache-Control` sent with season responses.
const SEASON_CACHE_CONTROL: &str = "public, max-age=3600, immutable";

/// `GET /api/tv/{id}/season/{season}`: one season with its episodes.
#[instrument(skip_all, fields(id = id, season = season))]
pub async fn get_season(
    State(state): State<AppState>,
    Path((id, season)): Path<(u64, u32)>,
) -> AppResult<impl IntoResponse> {
    let season = state
        .tmdb
        .fetch_tv_series_season(id, season)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(([(CACHE_CONTROL, SEASON_CACHE_CONTROL)], Json(season)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::http::StatusCode;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::routes::test_support::{get, json_body, send, state_for};

    #[tokio::test]
    async fn test_get_season_sets_cache_control() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/tv/95480/season/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(include_str!(
                "../../../../fixtures/tmdb/tv_season_95480_1.json"
            )))
            .mount(&mock_server)
            .await;
        let state = state_for(&mock_server);

        // Act
        let response = send(state, get("/api/tv/95480/season/1", None)).await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CACHE_CONTROL).unwrap(),
            SEASON_CACHE_CONTROL
        );
        let body = json_body(response).await;
        assert_eq!(body["seasonNumber"], 1);
        assert_eq!(body["episodes"][0]["title"], "Failure's Contagious");
        assert_eq!(
            body["episodes"][0]["stillImage"],
            "https://image.tmdb.org/t/p/w454_and_h254_bestv2/s1e1.jpg"
        );
    }

    #[tokio::test]
    async fn test_get_season_not_found() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/tv/95480/season/9"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        let state = state_for(&mock_server);

        // Act
        let response = send(state, get("/api/tv/95480/season/9", None)).await;

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_season_upstream_error_is_500() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/tv/95480/season/2"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;
        let state = state_for(&mock_server);

        // Act
        let response = send(state, get("/api/tv/95480/season/2", None)).await;

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
