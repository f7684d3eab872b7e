//! Column sorting for result tables
//!
//! Missing values always sort after present values, whichever direction is
//! requested. Text compares case-insensitively. Sorting is stable.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::Track;

/// Sortable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    TrackName,
    ArtistNames,
    AlbumName,
    ReleaseDate,
    DurationMs,
    Popularity,
    Explicit,
    Genres,
    RecordLabel,
    Danceability,
    Energy,
    KeyMode,
    Loudness,
    Speechiness,
    Acousticness,
    Instrumentalness,
    Liveness,
    Valence,
    Tempo,
}

impl SortField {
    pub const ALL: [SortField; 19] = [
        SortField::TrackName,
        SortField::ArtistNames,
        SortField::AlbumName,
        SortField::ReleaseDate,
        SortField::DurationMs,
        SortField::Popularity,
        SortField::Explicit,
        SortField::Genres,
        SortField::RecordLabel,
        SortField::Danceability,
        SortField::Energy,
        SortField::KeyMode,
        SortField::Loudness,
        SortField::Speechiness,
        SortField::Acousticness,
        SortField::Instrumentalness,
        SortField::Liveness,
        SortField::Valence,
        SortField::Tempo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::TrackName => "track_name",
            SortField::ArtistNames => "artist_names",
            SortField::AlbumName => "album_name",
            SortField::ReleaseDate => "release_date",
            SortField::DurationMs => "duration_ms",
            SortField::Popularity => "popularity",
            SortField::Explicit => "explicit",
            SortField::Genres => "genres",
            SortField::RecordLabel => "record_label",
            SortField::Danceability => "danceability",
            SortField::Energy => "energy",
            SortField::KeyMode => "key_mode",
            SortField::Loudness => "loudness",
            SortField::Speechiness => "speechiness",
            SortField::Acousticness => "acousticness",
            SortField::Instrumentalness => "instrumentalness",
            SortField::Liveness => "liveness",
            SortField::Valence => "valence",
            SortField::Tempo => "tempo",
        }
    }

    fn value<'a>(&self, track: &'a Track) -> SortValue<'a> {
        let text = |v: &'a Option<String>| v.as_deref().map_or(SortValue::Missing, SortValue::Text);
        let float = |v: Option<f64>| v.map_or(SortValue::Missing, SortValue::Number);
        let int = |v: Option<i64>| v.map_or(SortValue::Missing, |n| SortValue::Number(n as f64));

        match self {
            SortField::TrackName => text(&track.track_name),
            SortField::ArtistNames => text(&track.artist_names),
            SortField::AlbumName => text(&track.album_name),
            SortField::ReleaseDate => text(&track.release_date),
            SortField::Genres => text(&track.genres),
            SortField::RecordLabel => text(&track.record_label),
            SortField::DurationMs => int(track.duration_ms),
            SortField::Popularity => int(track.popularity),
            SortField::KeyMode => int(track.key_mode),
            SortField::Explicit => int(track.explicit.map(i64::from)),
            SortField::Danceability => float(track.danceability),
            SortField::Energy => float(track.energy),
            SortField::Loudness => float(track.loudness),
            SortField::Speechiness => float(track.speechiness),
            SortField::Acousticness => float(track.acousticness),
            SortField::Instrumentalness => float(track.instrumentalness),
            SortField::Liveness => float(track.liveness),
            SortField::Valence => float(track.valence),
            SortField::Tempo => float(track.tempo),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = Error;

    /// Accepts the JSON field name or the short table-header aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let alias = match key.as_str() {
            "track" | "name" | "title" => Some(SortField::TrackName),
            "artist" | "artists" => Some(SortField::ArtistNames),
            "album" => Some(SortField::AlbumName),
            "date" | "release" => Some(SortField::ReleaseDate),
            "duration" => Some(SortField::DurationMs),
            "genre" => Some(SortField::Genres),
            "label" => Some(SortField::RecordLabel),
            "key" => Some(SortField::KeyMode),
            _ => None,
        };

        alias
            .or_else(|| SortField::ALL.into_iter().find(|f| f.as_str() == key))
            .ok_or_else(|| Error::InvalidInput(format!("Unknown sort field: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(Error::InvalidInput(format!("Unknown sort direction: {}", other))),
        }
    }
}

/// Active sort of a result table
///
/// Defaults to popularity, most popular first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: SortField::Popularity,
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header-click behaviour: same column flips direction, new column starts descending
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            let direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
            Self { field, direction }
        } else {
            Self {
                field,
                direction: SortDirection::Desc,
            }
        }
    }

    /// Order two tracks under this configuration
    pub fn compare(&self, a: &Track, b: &Track) -> Ordering {
        match (self.field.value(a), self.field.value(b)) {
            (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
            (SortValue::Missing, _) => Ordering::Greater,
            (_, SortValue::Missing) => Ordering::Less,
            (x, y) => {
                let ordering = x.cmp_present(&y);
                match self.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
        }
    }
}

enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
    Missing,
}

impl SortValue<'_> {
    fn cmp_present(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
            // A field is either text or numeric; mixed pairs never occur
            _ => Ordering::Equal,
        }
    }
}

/// Sort in place (stable)
pub fn sort_tracks(tracks: &mut [Track], config: SortConfig) {
    tracks.sort_by(|a, b| config.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pop(id: u64, popularity: Option<i64>) -> Track {
        Track {
            id,
            popularity,
            ..Default::default()
        }
    }

    fn ids(tracks: &[Track]) -> Vec<u64> {
        tracks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_default_is_popularity_desc() {
        let mut tracks = vec![pop(1, Some(10)), pop(2, Some(90)), pop(3, Some(50))];
        sort_tracks(&mut tracks, SortConfig::default());
        assert_eq!(ids(&tracks), vec![2, 3, 1]);
    }

    #[test]
    fn test_missing_values_last_in_both_directions() {
        let base = vec![pop(1, None), pop(2, Some(5)), pop(3, None), pop(4, Some(1))];

        let mut asc = base.clone();
        sort_tracks(&mut asc, SortConfig::new(SortField::Popularity, SortDirection::Asc));
        assert_eq!(ids(&asc), vec![4, 2, 1, 3]);

        let mut desc = base;
        sort_tracks(&mut desc, SortConfig::new(SortField::Popularity, SortDirection::Desc));
        assert_eq!(ids(&desc), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let named = |id, name: &str| Track {
            id,
            track_name: Some(name.to_string()),
            ..Default::default()
        };
        let mut tracks = vec![named(1, "beta"), named(2, "Alpha"), named(3, "alpha2")];
        sort_tracks(&mut tracks, SortConfig::new(SortField::TrackName, SortDirection::Asc));
        assert_eq!(ids(&tracks), vec![2, 3, 1]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let mut tracks = vec![pop(1, Some(7)), pop(2, Some(7)), pop(3, Some(7))];
        sort_tracks(&mut tracks, SortConfig::default());
        assert_eq!(ids(&tracks), vec![1, 2, 3]);
    }

    #[test]
    fn test_explicit_sorts_as_number() {
        let flag = |id, explicit| Track {
            id,
            explicit,
            ..Default::default()
        };
        let mut tracks = vec![flag(1, None), flag(2, Some(true)), flag(3, Some(false))];
        sort_tracks(&mut tracks, SortConfig::new(SortField::Explicit, SortDirection::Asc));
        assert_eq!(ids(&tracks), vec![3, 2, 1]);
    }

    #[test]
    fn test_toggle() {
        let config = SortConfig::default();
        let flipped = config.toggle(SortField::Popularity);
        assert_eq!(flipped.direction, SortDirection::Asc);

        let other = flipped.toggle(SortField::Tempo);
        assert_eq!(other, SortConfig::new(SortField::Tempo, SortDirection::Desc));
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("popularity".parse::<SortField>().unwrap(), SortField::Popularity);
        assert_eq!("Artist".parse::<SortField>().unwrap(), SortField::ArtistNames);
        assert_eq!("key_mode".parse::<SortField>().unwrap(), SortField::KeyMode);
        assert!("bogus".parse::<SortField>().is_err());

        for field in SortField::ALL {
            assert_eq!(field.as_str().parse::<SortField>().unwrap(), field);
        }
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("descending".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("up".parse::<SortDirection>().is_err());
    }
}
