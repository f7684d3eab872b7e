//! Data-source status, health and refresh

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mkm_common::models::HealthResponse;
use mkm_common::source::SourceStatus;
use serde_json::json;
use tracing::info;

use super::{ApiError, ContractReply};
use crate::AppState;

/// GET /api/_healthz
pub async fn source_health(State(state): State<AppState>) -> ContractReply<HealthResponse> {
    ContractReply(state.source.check_health().await)
}

/// GET /api/source
pub async fn source_status(State(state): State<AppState>) -> Json<SourceStatus> {
    Json(state.source.status().await)
}

/// POST /api/refresh
///
/// Forces the catalog to be refetched. 501 for sources without a refreshable catalog.
pub async fn refresh(State(state): State<AppState>) -> Result<Response, ApiError> {
    if !state.source.refresh_data().await {
        return Err(ApiError::NotSupported(
            "Data refresh not supported by this data source.".to_string(),
        ));
    }

    let status = state.source.status().await;
    info!(kind = ?status.kind, "Catalog refresh completed");
    Ok(Json(json!({ "refreshed": true, "catalog": status.catalog })).into_response())
}
