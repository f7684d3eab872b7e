//! Catalog: the full ordered track collection of one data-source snapshot

use std::sync::Arc;

use crate::models::Track;

pub mod cache;
pub mod facets;
pub mod normalizer;
pub mod sample;

pub use cache::{CacheOrigin, CacheStatus, CatalogCache, TabularSource, DEFAULT_TTL};
pub use facets::{facets, Facets};
pub use normalizer::{normalize_row, normalize_rows, ColumnLayout, LAYOUT_VERSION};
pub use sample::sample_catalog;

/// Shared, immutable track collection in source order (not deduplicated)
pub type Catalog = Arc<Vec<Track>>;
