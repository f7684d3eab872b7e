//! Distinct genre, artist and label values of a catalog

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::Track;

/// Sorted, deduplicated browse values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub genres: Vec<String>,
    pub artists: Vec<String>,
    pub labels: Vec<String>,
}

/// Collect facets; genre and artist cells are comma-split, labels are taken whole
pub fn facets(tracks: &[Track]) -> Facets {
    Facets {
        genres: split_values(tracks.iter().filter_map(|t| t.genres.as_deref())),
        artists: split_values(tracks.iter().filter_map(|t| t.artist_names.as_deref())),
        labels: tracks
            .iter()
            .filter_map(|t| t.record_label.as_deref())
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    }
}

fn split_values<'a>(cells: impl Iterator<Item = &'a str>) -> Vec<String> {
    cells
        .flat_map(|cell| cell.split(','))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
