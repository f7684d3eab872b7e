//! Built-in sample catalog
//!
//! Served by the static-sample client and used by the catalog cache when the
//! remote source fails before any catalog was ever loaded.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::Catalog;
use crate::models::Track;

static SAMPLE: Lazy<Catalog> = Lazy::new(|| Arc::new(build_sample()));

/// The fixed sample catalog (shared; cloning the handle is cheap)
pub fn sample_catalog() -> Catalog {
    Arc::clone(&SAMPLE)
}

struct Features {
    danceability: f64,
    energy: f64,
    key: i64,
    loudness: f64,
    mode: i64,
    speechiness: f64,
    acousticness: f64,
    instrumentalness: f64,
    liveness: f64,
    valence: f64,
    tempo: f64,
}

#[allow(clippy::too_many_arguments)]
fn sample_track(
    id: u64,
    uri: &str,
    name: &str,
    album: &str,
    artists: &str,
    released: &str,
    duration_ms: i64,
    popularity: i64,
    explicit: bool,
    genres: &str,
    label: &str,
    f: Features,
) -> Track {
    Track {
        id,
        track_uri: Some(format!("spotify:track:{}", uri)),
        track_name: Some(name.to_string()),
        album_name: Some(album.to_string()),
        artist_names: Some(artists.to_string()),
        release_date: Some(released.to_string()),
        duration_ms: Some(duration_ms),
        popularity: Some(popularity),
        explicit: Some(explicit),
        genres: Some(genres.to_string()),
        record_label: Some(label.to_string()),
        danceability: Some(f.danceability),
        energy: Some(f.energy),
        key_mode: Some(f.key),
        loudness: Some(f.loudness),
        mode: Some(f.mode),
        speechiness: Some(f.speechiness),
        acousticness: Some(f.acousticness),
        instrumentalness: Some(f.instrumentalness),
        liveness: Some(f.liveness),
        valence: Some(f.valence),
        tempo: Some(f.tempo),
    }
}

fn build_sample() -> Vec<Track> {
    vec![
        sample_track(
            1,
            "0VjIjW4GlUZAMYd2vXMi3b",
            "Blinding Lights",
            "After Hours",
            "The Weeknd",
            "2020-03-20",
            200_040,
            87,
            false,
            "canadian contemporary r&b, canadian pop, pop",
            "Republic Records",
            Features {
                danceability: 0.514,
                energy: 0.73,
                key: 1,
                loudness: -5.934,
                mode: 1,
                speechiness: 0.0598,
                acousticness: 0.00146,
                instrumentalness: 0.0000954,
                liveness: 0.0897,
                valence: 0.334,
                tempo: 171.005,
            },
        ),
        sample_track(
            2,
            "6PQ88X9TkUIAUIZJHW2upE",
            "Bad Habits",
            "=",
            "Ed Sheeran",
            "2021-10-29",
            231_041,
            82,
            false,
            "pop, singer-songwriter pop, uk pop",
            "Asylum Records UK",
            Features {
                danceability: 0.808,
                energy: 0.897,
                key: 11,
                loudness: -3.712,
                mode: 0,
                speechiness: 0.0348,
                acousticness: 0.0469,
                instrumentalness: 0.0000316,
                liveness: 0.364,
                valence: 0.591,
                tempo: 126.026,
            },
        ),
        sample_track(
            3,
            "39LLxExYz6ewLAcYrzQQyP",
            "Levitating",
            "Future Nostalgia",
            "Dua Lipa",
            "2020-03-27",
            203_064,
            80,
            false,
            "dance pop, pop, uk pop",
            "Warner Records",
            Features {
                danceability: 0.702,
                energy: 0.825,
                key: 6,
                loudness: -3.787,
                mode: 0,
                speechiness: 0.0601,
                acousticness: 0.00883,
                instrumentalness: 0.0,
                liveness: 0.0674,
                valence: 0.915,
                tempo: 102.977,
            },
        ),
        sample_track(
            4,
            "2WfaOiMkCvy7F5fcp2zZ8L",
            "Take On Me",
            "Hunting High and Low",
            "a-ha",
            "1985-06-01",
            225_280,
            84,
            false,
            "new wave pop, norwegian pop, synthpop",
            "Rhino",
            Features {
                danceability: 0.573,
                energy: 0.902,
                key: 6,
                loudness: -7.638,
                mode: 0,
                speechiness: 0.054,
                acousticness: 0.018,
                instrumentalness: 0.00125,
                liveness: 0.0928,
                valence: 0.876,
                tempo: 84.412,
            },
        ),
        sample_track(
            5,
            "7qiZfU4dY1lWllzX7mPBI3",
            "Shape of You",
            "÷ (Deluxe)",
            "Ed Sheeran",
            "2017-03-03",
            233_712,
            86,
            false,
            "pop, singer-songwriter pop, uk pop",
            "Atlantic Records UK",
            Features {
                danceability: 0.825,
                energy: 0.652,
                key: 1,
                loudness: -3.183,
                mode: 0,
                speechiness: 0.0802,
                acousticness: 0.581,
                instrumentalness: 0.0,
                liveness: 0.0931,
                valence: 0.931,
                tempo: 95.977,
            },
        ),
        sample_track(
            6,
            "4u7EnebtmKWzUH433cf5Qv",
            "Bohemian Rhapsody",
            "A Night At The Opera",
            "Queen",
            "1975-11-21",
            354_320,
            79,
            false,
            "classic rock, glam rock, rock",
            "EMI",
            Features {
                danceability: 0.392,
                energy: 0.402,
                key: 0,
                loudness: -9.961,
                mode: 0,
                speechiness: 0.0536,
                acousticness: 0.288,
                instrumentalness: 0.0,
                liveness: 0.243,
                valence: 0.228,
                tempo: 71.105,
            },
        ),
        sample_track(
            7,
            "5Z01UMMf7V1o0MzF86s6WJ",
            "Lose Yourself",
            "8 Mile",
            "Eminem",
            "2002-10-28",
            326_466,
            83,
            true,
            "detroit hip hop, hip hop, rap",
            "Interscope",
            Features {
                danceability: 0.686,
                energy: 0.735,
                key: 2,
                loudness: -4.616,
                mode: 1,
                speechiness: 0.264,
                acousticness: 0.00921,
                instrumentalness: 0.00066,
                liveness: 0.342,
                valence: 0.0596,
                tempo: 171.355,
            },
        ),
        sample_track(
            8,
            "0GjEhVFGZW8afUYGChu3Rr",
            "Dancing Queen",
            "Arrival",
            "ABBA",
            "1976-10-11",
            230_400,
            81,
            false,
            "europop, swedish pop",
            "Polar Music",
            Features {
                danceability: 0.543,
                energy: 0.87,
                key: 9,
                loudness: -6.514,
                mode: 1,
                speechiness: 0.0428,
                acousticness: 0.358,
                instrumentalness: 0.000939,
                liveness: 0.79,
                valence: 0.754,
                tempo: 100.804,
            },
        ),
        sample_track(
            9,
            "1I8tHoNBFTuoJAlh4hfVVE",
            "Firestone",
            "Cloud Nine",
            "Kygo, Conrad Sewell",
            "2016-05-13",
            271_946,
            70,
            false,
            "edm, norwegian pop, tropical house",
            "Sony Music Entertainment",
            Features {
                danceability: 0.616,
                energy: 0.676,
                key: 5,
                loudness: -6.693,
                mode: 0,
                speechiness: 0.0448,
                acousticness: 0.423,
                instrumentalness: 0.0000035,
                liveness: 0.107,
                valence: 0.409,
                tempo: 113.95,
            },
        ),
        sample_track(
            10,
            "75FEaRjZTKLhTrFGsfMUXR",
            "Running Up That Hill (A Deal With God)",
            "Hounds of Love",
            "Kate Bush",
            "1985-09-16",
            298_933,
            85,
            false,
            "art pop, art rock, baroque pop",
            "Parlophone UK",
            Features {
                danceability: 0.629,
                energy: 0.547,
                key: 10,
                loudness: -13.123,
                mode: 0,
                speechiness: 0.055,
                acousticness: 0.72,
                instrumentalness: 0.00314,
                liveness: 0.0604,
                valence: 0.197,
                tempo: 108.375,
            },
        ),
    ]
}
