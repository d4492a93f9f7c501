//! HTTP routes.

mod account;
mod auth;
mod season;
mod tv_page;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/account", get(account::get_account))
        .route(
            "/api/account/{list}",
            get(account::get_account_list).post(account::toggle_account_list),
        )
        .route("/api/tv/{id}/season/{season}", get(season::get_season))
        .route("/login", get(auth::login))
        .route("/login/callback", get(auth::login_callback))
        .route("/logout", get(auth::logout))
        .route("/tv/{id}/{slug}", get(tv_page::tv_series_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
