//! Server-rendered TV series page.

use std::fmt::{self, Write as _};

use anyhow::Context;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use seriesly_api::models::{TvSeries, WatchProvider};
use seriesly_api::tmdb::TmdbApi;
use tracing::instrument;

use crate::error::AppResult;
use crate::state::AppState;

/// `GET /tv/{id}/{slug}`: series details page.
///
/// Missing and adult series are 404; a stale or wrong slug redirects to
/// the canonical URL.
#[instrument(skip_all, fields(id = id))]
pub async fn tv_series_page(
    State(state): State<AppState>,
    Path((id, slug)): Path<(u64, String)>,
) -> AppResult<Response> {
    let Some(series) = state.tmdb.fetch_tv_series(id).await? else {
        return Ok(not_found());
    };
    if series.is_adult {
        return Ok(not_found());
    }
    if series.slug != slug {
        let canonical = canonical_path(&series);
        tracing::debug!(%canonical, "redirecting to canonical slug");
        return Ok(Redirect::permanent(&canonical).into_response());
    }

    let (rating, providers) = tokio::try_join!(
        state.tmdb.fetch_tv_series_content_rating(id, &state.region),
        state.tmdb.fetch_tv_series_watch_providers(id, &state.region),
    )?;

    let html = render(&series, rating.as_deref(), &providers)
        .context("failed to render series page")?;
    Ok(Html(html).into_response())
}

fn canonical_path(series: &TvSeries) -> String {
    format!("/tv/{}/{}", series.id, series.slug)
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(String::from(
            "<!doctype html><html><head><title>Not found</title></head>\
             <body><h1>Not found</h1></body></html>",
        )),
    )
        .into_response()
}

/// Escapes text for HTML element and attribute content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Formats a runtime in minutes as `1h 5m`, `45m` or `2h`.
fn format_runtime(minutes: u32) -> String {
    let (hours, mins) = (minutes / 60, minutes % 60);
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

fn render(
    series: &TvSeries,
    rating: Option<&str>,
    providers: &[WatchProvider],
) -> Result<String, fmt::Error> {
    let title = escape(&series.title);
    let canonical = canonical_path(series);

    let mut facts = vec![
        series.release_year.clone(),
        format!(
            "{} {}",
            series.number_of_seasons,
            if series.number_of_seasons == 1 {
                "Season"
            } else {
                "Seasons"
            }
        ),
    ];
    if series.runtime > 0 {
        facts.push(format_runtime(series.runtime));
    }
    let genres = series
        .genres
        .iter()
        .map(|g| g.name.as_str())
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if !genres.is_empty() {
        facts.push(genres);
    }
    if let Some(rating) = rating.filter(|r| !r.is_empty()) {
        facts.push(String::from(rating));
    }
    let facts = facts
        .iter()
        .filter(|f| !f.is_empty())
        .map(|f| escape(f))
        .collect::<Vec<_>>()
        .join(" · ");

    let mut html = String::new();
    write!(
        html,
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <meta name=\"description\" content=\"{description}\">\n\
         <link rel=\"canonical\" href=\"{canonical}\">\n</head>\n",
        description = escape(&series.description),
    )?;

    let style = series
        .backdrop_color
        .as_deref()
        .map(|colour| format!(" style=\"background-color: {}\"", escape(colour)))
        .unwrap_or_default();
    write!(html, "<body{style}>\n<main>\n")?;

    match series.title_treatment_image.as_deref() {
        Some(src) => writeln!(
            html,
            "<h1><img src=\"{}\" alt=\"{title}\"></h1>",
            escape(src)
        )?,
        None => writeln!(html, "<h1>{title}</h1>")?,
    }
    writeln!(html, "<p class=\"facts\">{facts}</p>")?;

    if !providers.is_empty() {
        writeln!(html, "<ul class=\"providers\">")?;
        for provider in providers {
            writeln!(
                html,
                "<li><img src=\"{}\" alt=\"{}\"></li>",
                escape(&provider.logo),
                escape(&provider.name)
            )?;
        }
        writeln!(html, "</ul>")?;
    }

    writeln!(html, "<p>{}</p>", escape(&series.description))?;
    if !series.created_by.is_empty() {
        let creators = series
            .created_by
            .iter()
            .map(|p| escape(&p.name))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(html, "<p>Created by: {creators}</p>")?;
    }
    html.push_str("</main>\n</body>\n</html>\n");
    Ok(html)
}
