//! Cookie header parsing and `Set-Cookie` formatting.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Cookie holding the encrypted TMDB v3 session ID.
pub const SESSION_COOKIE: &str = "sessionId";

/// Cookie holding the encrypted TMDB v4 access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Lifetime of the session cookies (one year).
const MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

/// Returns the value of cookie `name` from the request headers.
pub fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| String::from(value))
        })
}

/// Formats a `Set-Cookie` value for a session cookie.
pub fn session_cookie(name: &str, value: &str) -> String {
    format!("{name}={value}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={MAX_AGE_SECS}")
}

/// Formats a `Set-Cookie` value that deletes cookie `name`.
pub fn expired_cookie(name: &str) -> String {
    format!("{name}=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0")
}
