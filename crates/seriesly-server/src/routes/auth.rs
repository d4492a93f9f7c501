//! Login, login callback and logout routes.
//!
//! Sign-in follows the TMDB v4 flow: a request token is approved by the
//! user on themoviedb.org, exchanged for an access token, and converted
//! into a v3 session ID. Both tokens are stored encrypted in cookies.

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Redirect};
use serde::Deserialize;
use seriesly_api::tmdb::TmdbApi;
use tracing::instrument;
use url::Url;

use crate::cookies::{ACCESS_TOKEN_COOKIE, SESSION_COOKIE, expired_cookie, session_cookie};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// TMDB page where users approve a request token.
const TMDB_APPROVE_URL: &str = "https://www.themoviedb.org/auth/access";

/// Query string of the login callback.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    /// Approved request token.
    request_token: Option<String>,
}

/// `GET /login`: starts the TMDB approval flow.
#[instrument(skip_all)]
pub async fn login(State(state): State<AppState>) -> AppResult<Redirect> {
    let callback = state
        .public_url
        .join("/login/callback")
        .context("invalid public URL")?;
    let request_token = state.tmdb.create_request_token(callback.as_str()).await?;

    let approve = Url::parse_with_params(TMDB_APPROVE_URL, [("request_token", &request_token)])
        .context("invalid approval URL")?;
    Ok(Redirect::to(approve.as_str()))
}

/// `GET /login/callback?request_token=...`: finishes sign-in and sets cookies.
#[instrument(skip_all)]
pub async fn login_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> AppResult<impl IntoResponse> {
    let request_token = params
        .request_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest(String::from("missing request_token")))?;

    let token = state.tmdb.create_access_token(&request_token).await?;
    let session_id = state.tmdb.create_session_id(&token.access_token).await?;

    let sealed_session = state.codec.encrypt(&session_id)?;
    let sealed_access = state.codec.encrypt(&token.access_token)?;
    tracing::info!("user signed in");

    Ok((
        AppendHeaders([
            (SET_COOKIE, session_cookie(SESSION_COOKIE, &sealed_session)),
            (SET_COOKIE, session_cookie(ACCESS_TOKEN_COOKIE, &sealed_access)),
        ]),
        Redirect::to("/"),
    ))
}

/// `GET /logout`: revokes the upstream session and clears cookies.
///
/// Upstream revocation is best effort; cookies are cleared regardless.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(session_id) = state.decrypt_cookie(&headers, SESSION_COOKIE)
        && let Err(e) = state.tmdb.delete_session_id(&session_id).await
    {
        tracing::warn!("failed to delete TMDB session: {e:#}");
    }
    if let Some(access_token) = state.decrypt_cookie(&headers, ACCESS_TOKEN_COOKIE)
        && let Err(e) = state.tmdb.delete_access_token(&access_token).await
    {
        tracing::warn!("failed to delete TMDB access token: {e:#}");
    }

    (
        AppendHeaders([
            (SET_COOKIE, expired_cookie(SESSION_COOKIE)),
            (SET_COOKIE, expired_cookie(ACCESS_TOKEN_COOKIE)),
        ]),
        Redirect::to("/"),
    )
}
