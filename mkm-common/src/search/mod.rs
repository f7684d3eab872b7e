//! Search engine: case-insensitive substring filter with pagination
//!
//! Pure functions over a catalog slice. The same catalog, query, page and page
//! size always produce the same response.

use crate::models::{SearchResponse, Track};

pub mod pagination;
pub mod palette;
pub mod sort;

pub use pagination::{paginate, Pagination};
pub use palette::{quick_jump, PALETTE_LIMIT};
pub use sort::{sort_tracks, SortConfig, SortDirection, SortField};

/// True when `needle` (already lowercased) occurs in any searchable field
///
/// Searchable fields: track name, artist names, album name, genres, record label.
/// Absent fields never match.
pub fn matches(track: &Track, needle: &str) -> bool {
    [
        &track.track_name,
        &track.artist_names,
        &track.album_name,
        &track.genres,
        &track.record_label,
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Filter `catalog` by `query` and return page `page` (1-indexed)
///
/// An empty or whitespace-only query yields no results at all; it is not a
/// "match everything" query. Matches keep catalog order.
pub fn search(catalog: &[Track], query: &str, page: usize, page_size: usize) -> SearchResponse {
    if query.trim().is_empty() {
        return SearchResponse::empty();
    }

    let needle = query.to_lowercase();
    let matched: Vec<&Track> = catalog.iter().filter(|t| matches(t, &needle)).collect();

    let p = paginate(matched.len(), page, page_size);
    SearchResponse {
        tracks: matched[p.offset..p.end].iter().map(|t| (*t).clone()).collect(),
        pages: p.pages,
        total: matched.len(),
    }
}
