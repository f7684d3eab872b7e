//! Record normalizer: spreadsheet rows to typed [`Track`] records
//!
//! The spreadsheet carries no schema, only positional cells. The column layout is
//! therefore fixed configuration, versioned here, and never inferred from header
//! text. Every numeric and boolean cell goes through a try-parse helper that maps
//! failure to `None`; nothing is ever coerced to `0`, `false` or `NaN`.

use crate::models::Track;

/// Version of [`ColumnLayout::V1`], the authoritative spreadsheet layout
pub const LAYOUT_VERSION: u32 = 1;

/// Cell index of each Track attribute (`None` = attribute not in the sheet)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub track_uri: Option<usize>,
    pub track_name: Option<usize>,
    pub album_name: Option<usize>,
    pub artist_names: Option<usize>,
    pub release_date: Option<usize>,
    pub duration_ms: Option<usize>,
    pub popularity: Option<usize>,
    pub explicit: Option<usize>,
    pub genres: Option<usize>,
    pub record_label: Option<usize>,
    pub danceability: Option<usize>,
    pub energy: Option<usize>,
    pub key_mode: Option<usize>,
    pub loudness: Option<usize>,
    pub mode: Option<usize>,
    pub speechiness: Option<usize>,
    pub acousticness: Option<usize>,
    pub instrumentalness: Option<usize>,
    pub liveness: Option<usize>,
    pub valence: Option<usize>,
    pub tempo: Option<usize>,
}

impl ColumnLayout {
    /// Column order of the `tracks_new` export (22 columns, range `A:V`)
    ///
    /// Column 0 holds the exporting database's row id. It is not read: track ids
    /// are assigned from row position.
    pub const V1: ColumnLayout = ColumnLayout {
        track_uri: Some(1),
        track_name: Some(2),
        album_name: Some(3),
        artist_names: Some(4),
        release_date: Some(5),
        duration_ms: Some(6),
        popularity: Some(7),
        explicit: Some(8),
        genres: Some(9),
        record_label: Some(10),
        danceability: Some(11),
        energy: Some(12),
        key_mode: Some(13),
        loudness: Some(14),
        mode: Some(15),
        speechiness: Some(16),
        acousticness: Some(17),
        instrumentalness: Some(18),
        liveness: Some(19),
        valence: Some(20),
        tempo: Some(21),
    };

    /// Spreadsheet A1 range covering every column of this layout
    pub fn range(&self) -> String {
        let last = self.max_index().unwrap_or(0);
        format!("A:{}", column_letter(last))
    }

    fn max_index(&self) -> Option<usize> {
        [
            self.track_uri,
            self.track_name,
            self.album_name,
            self.artist_names,
            self.release_date,
            self.duration_ms,
            self.popularity,
            self.explicit,
            self.genres,
            self.record_label,
            self.danceability,
            self.energy,
            self.key_mode,
            self.loudness,
            self.mode,
            self.speechiness,
            self.acousticness,
            self.instrumentalness,
            self.liveness,
            self.valence,
            self.tempo,
        ]
        .into_iter()
        .flatten()
        .max()
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::V1
    }
}

/// Zero-based column index to spreadsheet letters (0 = A, 25 = Z, 26 = AA)
fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Trimmed text; empty or whitespace-only → `None`
pub fn parse_text(cell: Option<&str>) -> Option<String> {
    let trimmed = cell?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Integer, also accepting integral floats such as `"215000.0"`
pub fn parse_int(cell: Option<&str>) -> Option<i64> {
    let trimmed = cell?.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    let float = parse_float(Some(trimmed))?;
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    (float.fract() == 0.0 && in_range).then_some(float as i64)
}

/// Finite float; `NaN`, `inf` and non-numeric text → `None`
pub fn parse_float(cell: Option<&str>) -> Option<f64> {
    cell?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `Some(true)` only for a case-insensitive `"true"`; everything else is unknown
pub fn parse_bool(cell: Option<&str>) -> Option<bool> {
    cell?.trim().eq_ignore_ascii_case("true").then_some(true)
}

/// Map one raw row into a Track with `id = row_index`
///
/// Short rows are tolerated: absent cells behave like empty ones.
pub fn normalize_row(row: &[String], row_index: u64, layout: &ColumnLayout) -> Track {
    let cell = |index: Option<usize>| index.and_then(|i| row.get(i)).map(String::as_str);

    Track {
        id: row_index,
        track_uri: parse_text(cell(layout.track_uri)),
        track_name: parse_text(cell(layout.track_name)),
        album_name: parse_text(cell(layout.album_name)),
        artist_names: parse_text(cell(layout.artist_names)),
        release_date: parse_text(cell(layout.release_date)),
        duration_ms: parse_int(cell(layout.duration_ms)),
        popularity: parse_int(cell(layout.popularity)),
        explicit: parse_bool(cell(layout.explicit)),
        genres: parse_text(cell(layout.genres)),
        record_label: parse_text(cell(layout.record_label)),
        danceability: parse_float(cell(layout.danceability)),
        energy: parse_float(cell(layout.energy)),
        key_mode: parse_int(cell(layout.key_mode)),
        loudness: parse_float(cell(layout.loudness)),
        mode: parse_int(cell(layout.mode)),
        speechiness: parse_float(cell(layout.speechiness)),
        acousticness: parse_float(cell(layout.acousticness)),
        instrumentalness: parse_float(cell(layout.instrumentalness)),
        liveness: parse_float(cell(layout.liveness)),
        valence: parse_float(cell(layout.valence)),
        tempo: parse_float(cell(layout.tempo)),
    }
}

/// Normalize a full values payload (header row first)
///
/// Ids are 1-based positions among data rows and are assigned before filtering,
/// so a dropped row leaves a gap rather than renumbering later rows.
pub fn normalize_rows(values: &[Vec<String>], layout: &ColumnLayout) -> Vec<Track> {
    values
        .iter()
        .skip(1)
        .zip(1u64..)
        .map(|(row, index)| normalize_row(row, index, layout))
        .filter(|track| track.track_name.is_some())
        .collect()
}
