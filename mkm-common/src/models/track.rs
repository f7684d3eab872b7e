//! Track record and display formatting

use serde::{Deserialize, Serialize};

const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// One recording's metadata and audio-feature vector
///
/// Field names match the Remote-API JSON exactly. Every attribute except `id`
/// is nullable: `None` means "not present in the source", never a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Position in the source snapshot (1-based). Not stable across refetches.
    pub id: u64,
    pub track_uri: Option<String>,
    pub track_name: Option<String>,
    pub album_name: Option<String>,
    /// May hold several comma-separated artists
    pub artist_names: Option<String>,
    /// Free-text date as delivered by the source
    pub release_date: Option<String>,
    pub duration_ms: Option<i64>,
    /// 0-100
    pub popularity: Option<i64>,
    /// `None` means unknown, not "clean"
    pub explicit: Option<bool>,
    /// Comma-separated genre list
    pub genres: Option<String>,
    pub record_label: Option<String>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    /// Pitch class 0-11 (C..B)
    pub key_mode: Option<i64>,
    /// dB, typically -60..0
    pub loudness: Option<f64>,
    /// 0 = minor, 1 = major
    pub mode: Option<i64>,
    pub speechiness: Option<f64>,
    pub acousticness: Option<f64>,
    pub instrumentalness: Option<f64>,
    pub liveness: Option<f64>,
    pub valence: Option<f64>,
    /// BPM
    pub tempo: Option<f64>,
}

impl Track {
    /// `m:ss`, or `--` when the duration is unknown
    pub fn duration_display(&self) -> String {
        match self.duration_ms {
            Some(ms) if ms > 0 => {
                let total_secs = ms / 1000;
                format!("{}:{:02}", total_secs / 60, total_secs % 60)
            }
            _ => "--".to_string(),
        }
    }

    /// Musical key such as `C# Major`, or `-` when key or mode is missing
    pub fn key_display(&self) -> String {
        let (Some(key), Some(mode)) = (self.key_mode, self.mode) else {
            return "-".to_string();
        };
        let Some(name) = usize::try_from(key).ok().and_then(|k| PITCH_CLASSES.get(k)) else {
            return "-".to_string();
        };
        let scale = if mode == 1 { "Major" } else { "Minor" };
        format!("{} {}", name, scale)
    }

    pub fn tempo_display(&self) -> String {
        self.tempo
            .map(|t| format!("{} BPM", t.round() as i64))
            .unwrap_or_else(|| "--".to_string())
    }

    pub fn loudness_display(&self) -> String {
        self.loudness
            .map(|l| format!("{:.1} dB", l))
            .unwrap_or_else(|| "--".to_string())
    }

    pub fn explicit_display(&self) -> &'static str {
        match self.explicit {
            Some(true) => "Yes",
            Some(false) => "No",
            None => "-",
        }
    }

    /// Name used wherever a label is required
    pub fn display_name(&self) -> &str {
        self.track_name.as_deref().unwrap_or("Unknown Track")
    }

    pub fn display_artists(&self) -> &str {
        self.artist_names.as_deref().unwrap_or("Unknown Artist")
    }
}

/// Format a [0,1] audio feature as a whole percentage (`72%`), `--` when absent
pub fn percent(feature: Option<f64>) -> String {
    feature
        .map(|v| format!("{:.0}%", v * 100.0))
        .unwrap_or_else(|| "--".to_string())
}
