//! OAuth and playlist pass-through
//!
//! These forward to the data source and return its reply unchanged. Sources
//! without the integration answer 501 with an explanatory `detail`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use mkm_common::models::{
    CallbackOutcome, CallbackParams, LoginResponse, PlaylistCreated, PlaylistRequest,
};
use tracing::info;

use super::{ApiError, ContractReply};
use crate::AppState;

/// GET /api/login
pub async fn login(State(state): State<AppState>) -> ContractReply<LoginResponse> {
    ContractReply(state.source.login().await)
}

/// GET /api/callback?code=..&state=..
pub async fn callback(
    State(state): State<AppState>,
    params: Result<Query<CallbackParams>, QueryRejection>,
) -> Result<ContractReply<CallbackOutcome>, ApiError> {
    let Query(params) = params?;
    Ok(ContractReply(state.source.callback(params).await))
}

/// POST /api/create-playlist
pub async fn create_playlist(
    State(state): State<AppState>,
    request: Result<Json<PlaylistRequest>, JsonRejection>,
) -> Result<ContractReply<PlaylistCreated>, ApiError> {
    let Json(request) = request?;

    info!(
        tracks = request.track_uris.len(),
        name = request.name(),
        "Creating playlist"
    );
    Ok(ContractReply(state.source.create_playlist(request).await))
}
