//! seriesly - TV series browsing web server backed by TMDB.

/// Application configuration (TOML + environment).
mod config;
/// Cookie helpers.
mod cookies;
/// HTTP error responses.
mod error;
/// HTTP routes.
mod routes;
/// Shared handler state.
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
#[cfg(feature = "otel")]
use opentelemetry_sdk::trace::SdkTracerProvider;
use seriesly_api::tmdb::TmdbClient;
use seriesly_token::TokenCodec;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, Secrets, resolve_config_path};
use crate::state::AppState;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Config file path (takes precedence over --dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override config directory.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Listen address, overriding `server.bind` (e.g. "0.0.0.0:3000").
    #[arg(long)]
    bind: Option<String>,
}

/// Builds a `TmdbClient` from config and secrets.
///
/// # Errors
///
/// Returns an error if a configured URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig, secrets: &Secrets) -> Result<TmdbClient> {
    let mut builder = TmdbClient::builder()
        .api_key(secrets.api_key.clone())
        .access_token(secrets.access_token.clone())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .cache_capacity(config.tmdb.cache_capacity)
        .detect_backdrop_colour(config.tmdb.detect_backdrop_colour);

    if let Some(base_url) = &config.tmdb.base_url {
        let url = Url::parse(base_url).with_context(|| format!("invalid tmdb.base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }
    if let Some(image_base_url) = &config.tmdb.image_base_url {
        let url = Url::parse(image_base_url)
            .with_context(|| format!("invalid tmdb.image_base_url: {image_base_url}"))?;
        builder = builder.image_base_url(url);
    }

    builder.build().context("failed to build TMDB client")
}

/// Builds the handler state.
///
/// # Errors
///
/// Returns an error if the public URL is invalid, the token secret is
/// unusable, or the TMDB client fails to build.
fn build_state(config: &AppConfig, secrets: &Secrets) -> Result<AppState> {
    let public_url = Url::parse(&config.server.public_url)
        .with_context(|| format!("invalid server.public_url: {}", config.server.public_url))?;
    let codec = TokenCodec::from_secret(&secrets.token_secret)?;
    let tmdb = build_tmdb_client(config, secrets)?;

    Ok(AppState {
        tmdb: Arc::new(tmdb),
        codec: Arc::new(codec),
        region: Arc::from(config.tmdb.region.as_str()),
        public_url: Arc::new(public_url),
    })
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    tracing::info!("shutting down");
}

/// Loads configuration and serves HTTP until shutdown.
///
/// # Errors
///
/// Returns an error if configuration, secrets, or binding the listener fails.
async fn run(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.config.as_ref(), cli.dir.as_ref())?;
    let mut config = AppConfig::load(&config_path)?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    let secrets = Secrets::from_env()?;
    let state = build_state(&config, &secrets)?;
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    tracing::info!(
        bind = %config.server.bind,
        public_url = %config.server.public_url,
        region = %config.tmdb.region,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if startup or serving fails.
#[tokio::main]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    let tracer_provider = init_otel_tracing();

    let result = run(Cli::parse()).await;

    #[cfg(feature = "otel")]
    shutdown_tracer_provider(tracer_provider);

    result
}

/// Installs the fmt subscriber and, when `OTEL_EXPORTER_OTLP_ENDPOINT` is
/// set, an OTLP span exporter.
///
/// Returns the tracer provider so buffered spans can be flushed on exit.
#[cfg(feature = "otel")]
fn init_otel_tracing() -> Option<SdkTracerProvider> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    let tracer_provider = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .ok()
        .and_then(|_| {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_http()
                .build()
                .ok()?;

            Some(
                SdkTracerProvider::builder()
                    .with_batch_exporter(exporter)
                    .build(),
            )
        });

    let otel_layer = tracer_provider.as_ref().map(|provider| {
        let tracer =
            opentelemetry::trace::TracerProvider::tracer(provider, env!("CARGO_PKG_NAME"));
        opentelemetry::global::set_tracer_provider(provider.clone());
        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .init();

    tracer_provider
}

/// Flushes buffered spans and stops the exporter.
#[cfg(feature = "otel")]
fn shutdown_tracer_provider(provider: Option<SdkTracerProvider>) {
    if let Some(provider) = provider
        && let Err(e) = provider.shutdown()
    {
        tracing::warn!("failed to shut down tracer provider: {e}");
    }
}

#[cfg(all(test, feature = "otel"))]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_tracer_provider_stops_provider() {
        // Arrange
        let provider = SdkTracerProvider::builder().build();
        let handle = provider.clone();

        // Act
        shutdown_tracer_provider(Some(provider));

        // Assert: a stopped provider rejects a second shutdown
        assert!(handle.shutdown().is_err());
    }

    #[test]
    fn test_shutdown_without_provider_is_noop() {
        // Arrange & Act & Assert
        shutdown_tracer_provider(None);
    }
}
