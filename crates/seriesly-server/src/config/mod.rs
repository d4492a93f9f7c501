//! Application configuration module.
//!
//! Manages the TOML config file holding listen address, public URL and
//! TMDB client settings. Secrets are read from the environment only.

#[allow(clippy::module_inception)]
mod config;
mod paths;
mod secrets;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
pub use secrets::Secrets;
