//! Secrets read from the process environment.

use anyhow::{Context, Result};

/// Environment variable holding the TMDB v3 API key.
const API_KEY_VAR: &str = "TMDB_API_KEY";
/// Environment variable holding the TMDB v4 read access token.
const ACCESS_TOKEN_VAR: &str = "TMDB_API_ACCESS_TOKEN";
/// Environment variable holding the cookie encryption secret.
const TOKEN_SECRET_VAR: &str = "TOKEN_SECRET";

/// Credentials that never live in the config file.
pub struct Secrets {
    /// TMDB v3 API key.
    pub api_key: String,
    /// TMDB v4 read access token.
    pub access_token: String,
    /// Cookie encryption secret.
    pub token_secret: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets").finish_non_exhaustive()
    }
}

impl Secrets {
    /// Reads all secrets from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first variable that is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads all secrets through `lookup`.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .with_context(|| format!("{name} environment variable is required"))
        };
        Ok(Self {
            api_key: read(API_KEY_VAR)?,
            access_token: read(ACCESS_TOKEN_VAR)?,
            token_secret: read(TOKEN_SECRET_VAR)?,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_all_present() {
        // Arrange
        let lookup = lookup_from(&[
            ("TMDB_API_KEY", "key"),
            ("TMDB_API_ACCESS_TOKEN", "token"),
            ("TOKEN_SECRET", "secret"),
        ]);

        // Act
        let secrets = Secrets::from_lookup(lookup).unwrap();

        // Assert
        assert_eq!(secrets.api_key, "key");
        assert_eq!(secrets.access_token, "token");
        assert_eq!(secrets.token_secret, "secret");
    }

    #[test]
    fn test_from_lookup_missing_variable() {
        // Arrange
        let lookup = lookup_from(&[("TMDB_API_KEY", "key"), ("TOKEN_SECRET", "secret")]);

        // Act
        let err = Secrets::from_lookup(lookup).unwrap_err();

        // Assert
        assert!(err.to_string().contains("TMDB_API_ACCESS_TOKEN"));
    }

    #[test]
    fn test_from_lookup_empty_variable() {
        // Arrange
        let lookup = lookup_from(&[
            ("TMDB_API_KEY", ""),
            ("TMDB_API_ACCESS_TOKEN", "token"),
            ("TOKEN_SECRET", "secret"),
        ]);

        // Act
        let err = Secrets::from_lookup(lookup).unwrap_err();

        // Assert
        assert!(err.to_string().contains("TMDB_API_KEY"));
    }
}
