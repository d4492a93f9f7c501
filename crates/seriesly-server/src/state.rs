//! Shared handler state.

use std::sync::Arc;

use axum::http::HeaderMap;
use seriesly_api::tmdb::TmdbClient;
use seriesly_token::TokenCodec;
use url::Url;

use crate::cookies::get_cookie;

/// State shared by every route handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// TMDB API client.
    pub tmdb: Arc<TmdbClient>,
    /// Cookie token codec.
    pub codec: Arc<TokenCodec>,
    /// Region for content ratings and watch providers.
    pub region: Arc<str>,
    /// Externally visible base URL.
    pub public_url: Arc<Url>,
}

impl AppState {
    /// Decrypts cookie `name`.
    ///
    /// Missing cookies and tokens that fail to decrypt both yield `None`;
    /// the caller treats either as "not signed in".
    pub fn decrypt_cookie(&self, headers: &HeaderMap, name: &str) -> Option<String> {
        let sealed = get_cookie(headers, name)?;
        match self.codec.decrypt(&sealed) {
            Ok(plain) => Some(plain),
            Err(e) => {
                tracing::debug!(cookie = name, "ignoring undecryptable cookie: {e:#}");
                None
            }
        }
    }
}
