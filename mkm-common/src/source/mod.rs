//! Data-source contract and its implementations
//!
//! The UI talks to exactly one [`DataSource`], chosen once at startup by
//! [`select_data_source`]. All three implementations answer with the same
//! [`ApiResponse`] envelope, so callers never need to know which one is active.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use crate::catalog::{CacheStatus, Catalog};
use crate::models::{
    CallbackOutcome, CallbackParams, ErrorDetail, HealthResponse, LoginResponse, PlaylistCreated,
    PlaylistRequest, SearchParams, SearchResponse,
};
use crate::search;

pub mod remote;
pub mod selector;
pub mod sheets;
pub mod static_source;

pub use remote::RemoteApiSource;
pub use selector::{preferred_kind, select_data_source, HEALTH_PROBE_TIMEOUT};
pub use sheets::SheetsSource;
pub use static_source::StaticSource;

/// Reply envelope shared by every data-source operation
///
/// `status` mirrors an HTTP status code. A failure carries `{ "detail": ... }`
/// and is a value, not an error: unavailable features and upstream failures are
/// reported here rather than propagated.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub body: Result<T, ErrorDetail>,
}

impl<T> ApiResponse<T> {
    pub fn success(body: T) -> Self {
        Self {
            status: 200,
            body: Ok(body),
        }
    }

    pub fn failure(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status,
            body: Err(ErrorDetail::new(detail)),
        }
    }

    /// Feature not offered by this data source (501)
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::failure(501, detail)
    }

    pub fn ok(&self) -> bool {
        self.body.is_ok()
    }

    pub fn into_result(self) -> Result<T, ErrorDetail> {
        self.body
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            body: self.body.map(f),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// JSON body: the payload on success, `{ "detail": .. }` on failure
    pub fn json(&self) -> Value {
        let encoded = match &self.body {
            Ok(body) => serde_json::to_value(body),
            Err(detail) => serde_json::to_value(detail),
        };
        encoded.unwrap_or_else(|e| json!({ "detail": format!("Failed to encode response: {}", e) }))
    }
}

/// Which implementation is serving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Live spreadsheet through the catalog cache
    Sheets,
    /// Bundled sample catalog
    Static,
    /// Full remote API
    Remote,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Sheets => "Google Sheets",
            SourceKind::Static => "Static demo",
            SourceKind::Remote => "Remote API",
        }
    }

    /// Status banner text shown above the results (none for the remote API)
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            SourceKind::Sheets => Some("Live data - Via Google Sheets API."),
            SourceKind::Static => Some(
                "Demo Mode - Static demo with sample data. Full version has access to large music database.",
            ),
            SourceKind::Remote => None,
        }
    }
}

/// Description of the active source for the UI
#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    pub kind: SourceKind,
    pub label: &'static str,
    pub banner: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CacheStatus>,
}

impl SourceStatus {
    pub fn new(kind: SourceKind, catalog: Option<CacheStatus>) -> Self {
        Self {
            kind,
            label: kind.label(),
            banner: kind.banner(),
            catalog,
        }
    }
}

/// Operations the UI can request from the active data source
#[async_trait]
pub trait DataSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    async fn search_tracks(&self, params: SearchParams) -> ApiResponse<SearchResponse>;

    /// Whole catalog, for sources that hold one locally
    ///
    /// `None` means the capability is absent (the remote API), not an empty catalog.
    async fn get_all_tracks(&self) -> Option<Catalog> {
        None
    }

    async fn check_health(&self) -> ApiResponse<HealthResponse>;

    async fn login(&self) -> ApiResponse<LoginResponse>;

    async fn callback(&self, params: CallbackParams) -> ApiResponse<CallbackOutcome>;

    async fn create_playlist(&self, request: PlaylistRequest) -> ApiResponse<PlaylistCreated>;

    /// Force the catalog to be refetched; `false` when unsupported
    async fn refresh_data(&self) -> bool {
        false
    }

    async fn status(&self) -> SourceStatus {
        SourceStatus::new(self.kind(), None)
    }
}

/// Run the search engine over a local catalog, after the configured latency
pub(crate) async fn search_local(
    catalog: &Catalog,
    params: &SearchParams,
    latency: Duration,
) -> ApiResponse<SearchResponse> {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    ApiResponse::success(search::search(
        catalog,
        &params.query,
        params.page,
        params.page_size,
    ))
}
