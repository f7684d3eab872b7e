//! Spreadsheet-backed data source
//!
//! Searches run locally over the catalog cache. OAuth actions are not offered.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::{search_local, ApiResponse, DataSource, SourceKind, SourceStatus};
use crate::catalog::{CacheOrigin, Catalog, CatalogCache, ColumnLayout};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::models::{
    CallbackOutcome, CallbackParams, HealthResponse, LoginResponse, PlaylistCreated,
    PlaylistRequest, SearchParams, SearchResponse,
};
use crate::sheets::SheetsClient;

pub const SHEETS_UNAVAILABLE: &str = "Spotify integration not available with Google Sheets data source.";

pub struct SheetsSource {
    cache: CatalogCache,
    latency: Duration,
}

impl SheetsSource {
    pub fn new(cache: CatalogCache, latency: Duration) -> Self {
        Self { cache, latency }
    }

    /// Spreadsheet client plus cache built from the resolved config
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let (Some(sheet_id), Some(api_key)) = (&config.sheet_id, &config.sheets_api_key) else {
            return Err(Error::Config(
                "Sheets source needs both a sheet id and an API key".to_string(),
            ));
        };

        let client = SheetsClient::new(
            &config.sheets_base_url,
            sheet_id,
            api_key,
            &config.sheet_range,
        )?;
        let cache = CatalogCache::new(Arc::new(client), ColumnLayout::V1, config.cache_ttl);

        Ok(Self::new(cache, config.simulated_latency))
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }
}

#[async_trait]
impl DataSource for SheetsSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Sheets
    }

    async fn search_tracks(&self, params: SearchParams) -> ApiResponse<SearchResponse> {
        let catalog = self.cache.get().await;
        search_local(&catalog, &params, self.latency).await
    }

    async fn get_all_tracks(&self) -> Option<Catalog> {
        Some(self.cache.get().await)
    }

    async fn check_health(&self) -> ApiResponse<HealthResponse> {
        let tracks = self.cache.get().await.len();
        let fallback = self
            .cache
            .snapshot()
            .await
            .is_some_and(|s| s.origin == CacheOrigin::Sample);

        let mode = if fallback { "Fallback Mode" } else { "Google Sheets" };
        ApiResponse::success(HealthResponse {
            status: format!("OK - {} ({} tracks loaded)", mode, tracks),
        })
    }

    async fn login(&self) -> ApiResponse<LoginResponse> {
        ApiResponse::unavailable(SHEETS_UNAVAILABLE)
    }

    async fn callback(&self, _params: CallbackParams) -> ApiResponse<CallbackOutcome> {
        ApiResponse::unavailable(SHEETS_UNAVAILABLE)
    }

    async fn create_playlist(&self, _request: PlaylistRequest) -> ApiResponse<PlaylistCreated> {
        ApiResponse::unavailable(SHEETS_UNAVAILABLE)
    }

    async fn refresh_data(&self) -> bool {
        self.cache.force_refresh().await;
        let tracks = self.cache.get().await;
        info!(tracks = tracks.len(), "Catalog refreshed on request");
        true
    }

    async fn status(&self) -> SourceStatus {
        SourceStatus::new(self.kind(), self.cache.snapshot().await)
    }
}
