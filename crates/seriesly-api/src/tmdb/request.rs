//! Per-request options for [`super::TmdbClient::fetch`].

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use thiserror::Error;

/// Default revalidate period applied to cacheable requests.
pub const DEFAULT_REVALIDATE: Duration = Duration::from_secs(3600);

/// Cache directive for a single upstream request.
///
/// Revalidation and no-store are exclusive: a request is either served
/// from the fetch cache for a bounded period or never cached at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Serve a cached response until it is older than the given period.
    Revalidate(Duration),
    /// Always hit upstream and never store the response.
    NoStore,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::Revalidate(DEFAULT_REVALIDATE)
    }
}

impl CachePolicy {
    /// Returns the revalidate period if the response may be cached.
    #[must_use]
    pub const fn ttl(self) -> Option<Duration> {
        match self {
            Self::Revalidate(ttl) if !ttl.is_zero() => Some(ttl),
            Self::Revalidate(_) | Self::NoStore => None,
        }
    }
}

/// Options for a single upstream request.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// HTTP method (default: GET).
    pub method: Method,
    /// JSON request body.
    pub body: Option<Value>,
    /// Cache directive (default: revalidate after one hour).
    pub cache: CachePolicy,
    /// Extra headers; these override the client defaults.
    pub headers: HeaderMap,
}

impl FetchOptions {
    /// GET with the default revalidate policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// GET that bypasses the fetch cache.
    #[must_use]
    pub fn no_store() -> Self {
        Self {
            cache: CachePolicy::NoStore,
            ..Self::default()
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Overrides the revalidate period.
    #[must_use]
    pub const fn revalidate(mut self, ttl: Duration) -> Self {
        self.cache = CachePolicy::Revalidate(ttl);
        self
    }

    /// Sets an extra header.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Non-success, non-404 upstream response.
///
/// Carried inside [`anyhow::Error`]; callers that need the status code
/// downcast to this type.
#[derive(Debug, Clone, Error)]
#[error("TMDB API error (HTTP {status}){}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct TmdbStatusError {
    /// HTTP status code.
    pub status: u16,
    /// Upstream `status_message`, when the body was a TMDB error document.
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_revalidates_hourly() {
        // Arrange & Act
        let options = FetchOptions::new();

        // Assert
        assert_eq!(options.method, Method::GET);
        assert_eq!(options.cache, CachePolicy::Revalidate(Duration::from_secs(3600)));
        assert_eq!(options.cache.ttl(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_no_store_has_no_ttl() {
        // Arrange & Act
        let options = FetchOptions::no_store().method(Method::POST);

        // Assert
        assert_eq!(options.cache, CachePolicy::NoStore);
        assert_eq!(options.cache.ttl(), None);
        assert_eq!(options.method, Method::POST);
    }

    #[test]
    fn test_zero_revalidate_is_not_cached() {
        // Arrange & Act
        let policy = FetchOptions::new().revalidate(Duration::ZERO).cache;

        // Assert
        assert_eq!(policy.ttl(), None);
    }

    #[test]
    fn test_status_error_display() {
        // Arrange
        let bare = TmdbStatusError {
            status: 500,
            message: None,
        };
        let with_message = TmdbStatusError {
            status: 401,
            message: Some(String::from("Invalid API key")),
        };

        // Act & Assert
        assert_eq!(bare.to_string(), "TMDB API error (HTTP 500)");
        assert_eq!(
            with_message.to_string(),
            "TMDB API error (HTTP 401): Invalid API key"
        );
    }
}
