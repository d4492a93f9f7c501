//! TMDB client library for seriesly.
//!
//! Wraps the TMDB v3/v4 REST API and reshapes its responses into the
//! view models served by the web application.

/// Backdrop colour detection.
pub mod colour;

/// Concurrent hydration helpers.
pub mod fanout;

/// Application view models.
pub mod models;

/// Upstream JSON to view-model mapping.
pub mod normalize;

/// TMDB API client.
pub mod tmdb;
