//! Account routes: details, watchlist/favorites listing and toggling.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;
use seriesly_api::models::{Account, TvSeries};
use seriesly_api::tmdb::{AccountListKind, TmdbApi, ToggleArgs, fetch_favorites, fetch_watchlist};
use tracing::instrument;

use crate::cookies::SESSION_COOKIE;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query string of the list route.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    /// 1-based page number; anything unparsable falls back to 1.
    page: Option<String>,
}

impl PageParams {
    fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|&p| p >= 1)
            .unwrap_or(1)
    }
}

/// Body of the toggle route.
#[derive(Debug, Deserialize)]
pub struct ToggleBody {
    /// TMDB series ID.
    id: u64,
    /// `true` to add, `false` to remove.
    value: bool,
}

/// `GET /api/account`: the signed-in account, or `null`.
#[instrument(skip_all)]
pub async fn get_account(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<Option<Account>>> {
    let Some(session_id) = state.decrypt_cookie(&headers, SESSION_COOKIE) else {
        return Ok(Json(None));
    };
    let account = state.tmdb.fetch_account_details(&session_id).await?;
    Ok(Json(account))
}

/// `GET /api/account/{list}?page=N`: one page of the watchlist or favorites.
///
/// Unknown lists and anonymous requests get an empty array.
#[instrument(skip_all, fields(list = %list))]
pub async fn get_account_list(
    State(state): State<AppState>,
    Path(list): Path<String>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<TvSeries>>> {
    let Ok(kind) = list.parse::<AccountListKind>() else {
        return Ok(Json(Vec::new()));
    };
    let Some(session_id) = state.decrypt_cookie(&headers, SESSION_COOKIE) else {
        return Ok(Json(Vec::new()));
    };
    let Some(account) = state.tmdb.fetch_account_details(&session_id).await? else {
        return Ok(Json(Vec::new()));
    };

    let page = params.page();
    let tmdb = state.tmdb.as_ref();
    let response = match kind {
        AccountListKind::Watchlist => fetch_watchlist(tmdb, account.id, &session_id, page).await?,
        AccountListKind::Favorites => fetch_favorites(tmdb, account.id, &session_id, page).await?,
    };
    Ok(Json(response.items))
}

/// `POST /api/account/{list}`: adds a series to, or removes it from, a list.
#[instrument(skip_all, fields(list = %list, id = body.id))]
pub async fn toggle_account_list(
    State(state): State<AppState>,
    Path(list): Path<String>,
    headers: HeaderMap,
    Json(body): Json<ToggleBody>,
) -> AppResult<StatusCode> {
    let kind = list
        .parse::<AccountListKind>()
        .map_err(|_| AppError::NotFound)?;
    let session_id = state
        .decrypt_cookie(&headers, SESSION_COOKIE)
        .ok_or(AppError::Unauthorized)?;
    let account = state
        .tmdb
        .fetch_account_details(&session_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let args = ToggleArgs {
        id: body.id,
        account_id: account.id,
        session_id,
        value: body.value,
    };
    state.tmdb.update_account_list(kind, &args).await?;
    tracing::info!(value = body.value, "account list updated");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::body::Body;
    use axum::http::{Request, header};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::routes::test_support::{get, json_body, send, session_cookie_header, state_for};

    async fn mount_account(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/3/account"))
            .and(query_param("session_id", "session-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(include_str!(
                "../../../../fixtures/tmdb/account_details.json"
            )))
            .mount(server)
            .await;
    }

    #[test]
    fn test_page_params_fallback() {
        // Arrange
        let cases = [
            (None, 1),
            (Some("2"), 2),
            (Some("0"), 1),
            (Some("-3"), 1),
            (Some("abc"), 1),
        ];

        for (raw, expected) in cases {
            // Act
            let params = PageParams {
                page: raw.map(String::from),
            };

            // Assert
            assert_eq!(params.page(), expected, "page={raw:?}");
        }
    }

    #[tokio::test]
    async fn test_get_account_without_cookie_is_null() {
        // Arrange
        let mock_server = MockServer::start().await;
        let state = state_for(&mock_server);

        // Act
        let response = send(state, get("/api/account", None)).await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_get_account_with_undecryptable_cookie_is_null() {
        // Arrange
        let mock_server = MockServer::start().await;
        let state = state_for(&mock_server);

        // Act
        let response = send(state, get("/api/account", Some("sessionId=garbage"))).await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_get_account_with_session() {
        // Arrange
        let mock_server = MockServer::start().await;
        mount_account(&mock_server).await;
        let state = state_for(&mock_server);
        let cookie = session_cookie_header(&state, "session-1");

        // Act
        let response = send(state, get("/api/account", Some(&cookie))).await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["id"], 548);
        assert_eq!(body["username"], "travisbell");
        assert_eq!(
            body["avatar"],
            "https://www.gravatar.com/avatar/c9e9fc152ee756a900db85757c29815d"
        );
    }

    #[tokio::test]
    async fn test_get_account_upstream_failure_is_500() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/account"))
            .respond_with(ResponseTemplate::new(401).set_body_string(
                r#"{"success":false,"status_code":3,"status_message":"Authentication failed: You do not have permissions to access the service."}"#,
            ))
            .mount(&mock_server)
            .await;
        let state = state_for(&mock_server);
        let cookie = session_cookie_header(&state, "session-1");

        // Act
        let response = send(state, get("/api/account", Some(&cookie))).await;

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_get_favorites_forwards_page() {
        // Arrange
        let mock_server = MockServer::start().await;
        mount_account(&mock_server).await;
        Mock::given(method("GET"))
            .and(path("/3/account/548/favorite/tv"))
            .and(query_param("session_id", "session-1"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(include_str!(
                "../../../../fixtures/tmdb/account_watchlist_tv.json"
            )))
            .expect(1)
            .mount(&mock_server)
            .await;
        let state = state_for(&mock_server);
        let cookie = session_cookie_header(&state, "session-1");

        // Act
        let response = send(
            state,
            get("/api/account/favorites?page=2", Some(&cookie)),
        )
        .await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], 95_480);
        assert_eq!(items[0]["releaseYear"], "2022");
    }

    #[tokio::test]
    async fn test_get_watchlist_empty_upstream() {
        // Arrange
        let mock_server = MockServer::start().await;
        mount_account(&mock_server).await;
        Mock::given(method("GET"))
            .and(path("/3/account/548/watchlist/tv"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "total_pages": 0,
                "total_results": 0
            })))
            .mount(&mock_server)
            .await;
        let state = state_for(&mock_server);
        let cookie = session_cookie_header(&state, "session-1");

        // Act
        let response = send(state, get("/api/account/watchlist", Some(&cookie))).await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_get_list_without_cookie_is_empty() {
        // Arrange
        let mock_server = MockServer::start().await;
        let state = state_for(&mock_server);

        // Act
        let response = send(state, get("/api/account/watchlist?page=3", None)).await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_get_unknown_list_is_empty() {
        // Arrange
        let mock_server = MockServer::start().await;
        let state = state_for(&mock_server);
        let cookie = session_cookie_header(&state, "session-1");

        // Act
        let response = send(state, get("/api/account/rated", Some(&cookie))).await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_toggle_watchlist() {
        // Arrange
        let mock_server = MockServer::start().await;
        mount_account(&mock_server).await;
        Mock::given(method("POST"))
            .and(path("/3/account/548/watchlist"))
            .and(query_param("session_id", "session-1"))
            .and(body_json(json!({
                "media_type": "tv",
                "media_id": 95_480,
                "watchlist": false,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"success":true,"status_code":13,"status_message":"The item/record was deleted successfully."}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;
        let state = state_for(&mock_server);
        let cookie = session_cookie_header(&state, "session-1");
        let request = Request::builder()
            .method("POST")
            .uri("/api/account/watchlist")
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"id":95480,"value":false}"#))
            .unwrap();

        // Act
        let response = send(state, request).await;

        // Assert
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_toggle_without_cookie_is_unauthorized() {
        // Arrange
        let mock_server = MockServer::start().await;
        let state = state_for(&mock_server);
        let request = Request::builder()
            .method("POST")
            .uri("/api/account/favorites")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"id":95480,"value":true}"#))
            .unwrap();

        // Act
        let response = send(state, request).await;

        // Assert
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_toggle_unknown_list_is_not_found() {
        // Arrange
        let mock_server = MockServer::start().await;
        let state = state_for(&mock_server);
        let cookie = session_cookie_header(&state, "session-1");
        let request = Request::builder()
            .method("POST")
            .uri("/api/account/rated")
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"id":95480,"value":true}"#))
            .unwrap();

        // Act
        let response = send(state, request).await;

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
