//! HTTP API handlers for mkm-ui

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mkm_common::ApiResponse;
use serde::Serialize;

pub mod catalog;
pub mod error;
pub mod health;
pub mod playlist;
pub mod search;
pub mod source;
pub mod ui;

pub use catalog::{all_tracks, catalog_facets, palette};
pub use error::ApiError;
pub use health::health_routes;
pub use playlist::{callback, create_playlist, login};
pub use search::search_tracks;
pub use source::{refresh, source_health, source_status};
pub use ui::{serve_app_css, serve_app_js, serve_index};

/// Data-source reply sent as-is: status from the envelope, payload or `{detail}` body
pub struct ContractReply<T>(pub ApiResponse<T>);

impl<T: Serialize> IntoResponse for ContractReply<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, Json(self.0.json())).into_response()
    }
}
