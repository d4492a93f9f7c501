//! `AppConfig` struct and TOML loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// TMDB client settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub bind: String,
    /// Externally visible base URL, used for the login callback.
    pub public_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: String::from("127.0.0.1:3000"),
            public_url: String::from("http://localhost:3000"),
        }
    }
}

/// TMDB client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// API base URL (default: `https://api.themoviedb.org/`).
    pub base_url: Option<String>,
    /// Image CDN base URL used to download backdrops.
    pub image_base_url: Option<String>,
    /// ISO 3166-1 region for content ratings and watch providers.
    pub region: String,
    /// Maximum number of cached upstream responses.
    pub cache_capacity: u64,
    /// Whether series details compute a backdrop colour.
    pub detect_backdrop_colour: bool,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            image_base_url: None,
            region: String::from("US"),
            cache_capacity: 10_000,
            detect_backdrop_colour: true,
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.server.public_url, "http://localhost:3000");
        assert_eq!(config.tmdb.region, "US");
        assert!(config.tmdb.base_url.is_none());
        assert!(config.tmdb.detect_backdrop_colour);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let path = Path::new("/tmp/seriesly_test_nonexistent_config.toml");

        // Act
        let config = AppConfig::load(path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb]\nregion = \"GB\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.tmdb.region, "GB");
        assert_eq!(config.tmdb.cache_capacity, 10_000);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_load_full_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[server]
bind = "0.0.0.0:8080"
public_url = "https://seriesly.example"

[tmdb]
base_url = "http://127.0.0.1:9000/"
region = "DE"
cache_capacity = 50
detect_backdrop_colour = false
"#,
        )
        .unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.server.public_url, "https://seriesly.example");
        assert_eq!(config.tmdb.base_url.as_deref(), Some("http://127.0.0.1:9000/"));
        assert_eq!(config.tmdb.cache_capacity, 50);
        assert!(!config.tmdb.detect_backdrop_colour);
    }

    #[test]
    fn test_load_malformed_config_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server = 3").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }
}
