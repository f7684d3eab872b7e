//! Request/response payloads of the Remote-API contract
//!
//! These shapes are shared by every data source so the UI sees identical JSON
//! whichever client the selector constructed.

use serde::{Deserialize, Serialize};

use super::Track;

/// Page size used when a caller does not specify one
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Playlist name used when a caller does not specify one
pub const DEFAULT_PLAYLIST_NAME: &str = "VibeCraft Playlist";

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_playlist_name() -> Option<String> {
    Some(DEFAULT_PLAYLIST_NAME.to_string())
}

/// Parameters of `search_tracks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: usize,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }
}

/// One page of search matches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The requested page slice
    pub tracks: Vec<Track>,
    /// `ceil(total / page_size)`
    pub pages: usize,
    /// Matches before pagination
    pub total: usize,
}

impl SearchResponse {
    /// The "no query, no results" reply
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Body of `check_health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error body of every non-2xx reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.detail)
    }
}

/// Body of `create_playlist`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRequest {
    pub track_uris: Vec<String>,

    #[serde(default = "default_playlist_name")]
    pub playlist_name: Option<String>,
}

impl PlaylistRequest {
    /// Name to use, falling back to the default playlist name
    pub fn name(&self) -> &str {
        self.playlist_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_PLAYLIST_NAME)
    }
}

/// Query of the OAuth callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

/// Successful `login` reply: where to send the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub authorization_url: String,
}

/// Result of the OAuth callback as reported by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Successful `create_playlist` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistCreated {
    pub message: String,
    pub playlist_url: String,
}

/// Spreadsheet values payload: first row is the header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetValues {
    /// Absent when the requested range is empty
    #[serde(default, deserialize_with = "deserialize_cells")]
    pub values: Vec<Vec<String>>,
}

/// Accepts unformatted cells (numbers, booleans, null) as well as strings
fn deserialize_cells<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde_json::Value;

    let rows: Vec<Vec<Value>> = Vec::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| match cell {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_defaults() {
        let params: SearchParams = serde_json::from_str(r#"{"query": "ed"}"#).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_playlist_request_default_name() {
        let req: PlaylistRequest =
            serde_json::from_str(r#"{"track_uris": ["spotify:track:1"]}"#).unwrap();
        assert_eq!(req.name(), DEFAULT_PLAYLIST_NAME);

        let blank = PlaylistRequest {
            track_uris: vec![],
            playlist_name: Some("   ".to_string()),
        };
        assert_eq!(blank.name(), DEFAULT_PLAYLIST_NAME);
    }

    #[test]
    fn test_sheet_values_without_values_key() {
        let payload: SheetValues =
            serde_json::from_str(r#"{"range": "Sheet1!A1:V1", "majorDimension": "ROWS"}"#)
                .unwrap();
        assert!(payload.values.is_empty());
    }

    #[test]
    fn test_sheet_values_unformatted_cells() {
        let payload: SheetValues =
            serde_json::from_str(r#"{"values": [["id", "tempo"], [1, 120.5, true, null]]}"#)
                .unwrap();
        assert_eq!(payload.values[1], vec!["1", "120.5", "true", ""]);
    }

    #[test]
    fn test_error_detail_serialization() {
        let json = serde_json::to_string(&ErrorDetail::new("Search failed")).unwrap();
        assert_eq!(json, r#"{"detail":"Search failed"}"#);
    }
}
