//! Whole-catalog views: listing, command palette, facets
//!
//! Only sources that hold a local catalog can answer these. The remote API has
//! none, so listing and facets return 404 and the palette comes back empty.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use mkm_common::catalog::{facets, Facets};
use mkm_common::search::{quick_jump, sort_tracks, SortConfig, SortDirection, SortField, PALETTE_LIMIT};
use mkm_common::Track;
use serde::Deserialize;

use super::ApiError;
use crate::AppState;

/// Upper bound for `limit` on the palette
const MAX_PALETTE_LIMIT: usize = 50;

const NO_CATALOG: &str = "This data source does not provide a local catalog.";

#[derive(Debug, Default, Deserialize)]
pub struct TracksQuery {
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaletteQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

/// GET /api/tracks?sort=field&order=asc|desc
///
/// Catalog order unless `sort` is given; `order` defaults to descending.
pub async fn all_tracks(
    State(state): State<AppState>,
    query: Result<Query<TracksQuery>, QueryRejection>,
) -> Result<Json<Vec<Track>>, ApiError> {
    let Query(query) = query?;

    let sort = match &query.sort {
        Some(field) => {
            let field = field
                .parse::<SortField>()
                .map_err(|e| ApiError::Validation(e.to_string()))?;
            let direction = match &query.order {
                Some(order) => order
                    .parse::<SortDirection>()
                    .map_err(|e| ApiError::Validation(e.to_string()))?,
                None => SortDirection::Desc,
            };
            Some(SortConfig::new(field, direction))
        }
        None => None,
    };

    let catalog = state
        .source
        .get_all_tracks()
        .await
        .ok_or_else(|| ApiError::NotFound(NO_CATALOG.to_string()))?;

    let mut tracks = catalog.as_ref().clone();
    if let Some(config) = sort {
        sort_tracks(&mut tracks, config);
    }
    Ok(Json(tracks))
}

/// GET /api/palette?q=..&limit=..
pub async fn palette(
    State(state): State<AppState>,
    query: Result<Query<PaletteQuery>, QueryRejection>,
) -> Result<Json<Vec<Track>>, ApiError> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(PALETTE_LIMIT).clamp(1, MAX_PALETTE_LIMIT);

    let hits = match state.source.get_all_tracks().await {
        Some(catalog) => quick_jump(&catalog, &query.q, limit),
        None => Vec::new(),
    };
    Ok(Json(hits))
}

/// GET /api/facets
pub async fn catalog_facets(State(state): State<AppState>) -> Result<Json<Facets>, ApiError> {
    let catalog = state
        .source
        .get_all_tracks()
        .await
        .ok_or_else(|| ApiError::NotFound(NO_CATALOG.to_string()))?;
    Ok(Json(facets(&catalog)))
}
