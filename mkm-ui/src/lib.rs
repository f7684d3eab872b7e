//! mkm-ui library - MusikkMeta UI shell
//!
//! Serves the single-page catalog browser and the JSON endpoints it calls. The
//! `/api` routes follow the same search/OAuth contract as the remote API, so one
//! instance can act as another instance's remote data source.

use std::sync::Arc;

use axum::Router;
use mkm_common::DataSource;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cli;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The data source chosen at startup; never replaced while running
    pub source: Arc<dyn DataSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    // Remote-API contract plus catalog helpers for the page
    let api = Router::new()
        .route("/api/_healthz", get(api::source_health))
        .route("/api/search", get(api::search_tracks))
        .route("/api/tracks", get(api::all_tracks))
        .route("/api/palette", get(api::palette))
        .route("/api/facets", get(api::catalog_facets))
        .route("/api/source", get(api::source_status))
        .route("/api/refresh", post(api::refresh))
        .route("/api/login", get(api::login))
        .route("/api/callback", get(api::callback))
        .route("/api/create-playlist", post(api::create_playlist));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/static/app.css", get(api::serve_app_css))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
