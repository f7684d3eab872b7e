//! Sample-catalog data source (demo mode)

use std::time::Duration;

use async_trait::async_trait;

use super::{search_local, ApiResponse, DataSource, SourceKind};
use crate::catalog::{sample_catalog, Catalog};
use crate::models::{
    CallbackOutcome, CallbackParams, HealthResponse, LoginResponse, PlaylistCreated,
    PlaylistRequest, SearchParams, SearchResponse,
};

pub const STATIC_HEALTH_STATUS: &str = "OK - Static Demo Mode";

pub const STATIC_UNAVAILABLE: &str =
    "Spotify integration not available in static version. This is a demo with sample data.";

const STATIC_CALLBACK_UNAVAILABLE: &str = "Spotify integration not available in static version.";

/// Serves a fixed catalog through the search engine
pub struct StaticSource {
    catalog: Catalog,
    latency: Duration,
}

impl StaticSource {
    /// Bundled sample catalog
    pub fn new(latency: Duration) -> Self {
        Self::with_catalog(sample_catalog(), latency)
    }

    pub fn with_catalog(catalog: Catalog, latency: Duration) -> Self {
        Self { catalog, latency }
    }
}

#[async_trait]
impl DataSource for StaticSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Static
    }

    async fn search_tracks(&self, params: SearchParams) -> ApiResponse<SearchResponse> {
        search_local(&self.catalog, &params, self.latency).await
    }

    async fn get_all_tracks(&self) -> Option<Catalog> {
        Some(self.catalog.clone())
    }

    async fn check_health(&self) -> ApiResponse<HealthResponse> {
        ApiResponse::success(HealthResponse {
            status: STATIC_HEALTH_STATUS.to_string(),
        })
    }

    async fn login(&self) -> ApiResponse<LoginResponse> {
        ApiResponse::unavailable(STATIC_UNAVAILABLE)
    }

    async fn callback(&self, _params: CallbackParams) -> ApiResponse<CallbackOutcome> {
        ApiResponse::unavailable(STATIC_CALLBACK_UNAVAILABLE)
    }

    async fn create_playlist(&self, _request: PlaylistRequest) -> ApiResponse<PlaylistCreated> {
        ApiResponse::unavailable(STATIC_UNAVAILABLE)
    }
}
