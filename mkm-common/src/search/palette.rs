//! Quick-jump lookup for the command palette

use crate::models::Track;

/// Most entries the palette shows at once
pub const PALETTE_LIMIT: usize = 10;

/// Up to `limit` tracks for the palette
///
/// A blank query lists the first `limit` catalog entries. Otherwise a track is
/// offered when the lowercased query occurs in its name, artists, album or genres.
/// Record labels are not considered here.
pub fn quick_jump(catalog: &[Track], query: &str, limit: usize) -> Vec<Track> {
    if query.trim().is_empty() {
        return catalog.iter().take(limit).cloned().collect();
    }

    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|track| {
            [
                &track.track_name,
                &track.artist_names,
                &track.album_name,
                &track.genres,
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_catalog;

    #[test]
    fn test_blank_query_lists_first_entries() {
        let catalog = sample_catalog();
        let hits = quick_jump(&catalog, "", PALETTE_LIMIT);
        assert_eq!(hits.len(), PALETTE_LIMIT);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn test_matches_artist() {
        let catalog = sample_catalog();
        let hits = quick_jump(&catalog, "sheeran", PALETTE_LIMIT);
        assert_eq!(hits.len(), 2);
        assert!(hits
            .iter()
            .all(|t| t.artist_names.as_deref() == Some("Ed Sheeran")));
    }

    #[test]
    fn test_ignores_record_label() {
        let track = Track {
            id: 1,
            track_name: Some("Song".to_string()),
            record_label: Some("Columbia".to_string()),
            ..Default::default()
        };
        assert!(quick_jump(&[track], "columbia", 5).is_empty());
    }

    #[test]
    fn test_respects_limit() {
        let catalog = sample_catalog();
        assert_eq!(quick_jump(&catalog, "e", 3).len(), 3);
    }
}
