//! Track search
//!
//! GET /api/search?query=..&page=..&page_size=..

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use mkm_common::models::{SearchParams, SearchResponse, DEFAULT_PAGE_SIZE};
use serde::Deserialize;
use tracing::debug;

use super::{ApiError, ContractReply};
use crate::AppState;

/// Largest page a client may request
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE as i64
}

/// GET /api/search
///
/// Bounds are checked here (422 on violation); the search itself is delegated
/// to the data source and its reply returned unchanged.
pub async fn search_tracks(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<ContractReply<SearchResponse>, ApiError> {
    let Query(query) = query?;

    if query.page < 1 {
        return Err(ApiError::Validation(format!(
            "page must be at least 1 (got {})",
            query.page
        )));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&query.page_size) {
        return Err(ApiError::Validation(format!(
            "page_size must be between 1 and {} (got {})",
            MAX_PAGE_SIZE, query.page_size
        )));
    }

    debug!(query = %query.query, page = query.page, page_size = query.page_size, "Search");

    let params = SearchParams::new(query.query).with_page(query.page as usize, query.page_size as usize);
    Ok(ContractReply(state.source.search_tracks(params).await))
}
