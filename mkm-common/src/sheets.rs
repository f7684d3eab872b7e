//! Google Sheets values client
//!
//! Fetches the raw value grid of one range (`GET {base}/spreadsheets/{id}/values/{range}?key=..`).
//! The grid is handed to the catalog cache, which owns normalization and the
//! failure policy; this client only reports what went wrong.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::catalog::TabularSource;
use crate::config::mask_secret;
use crate::error::{Error, Result};
use crate::models::SheetValues;

/// Public Sheets API v4 endpoint
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";

const USER_AGENT: &str = concat!("MusikkMeta/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upstream error bodies are truncated to this many characters
const MAX_ERROR_BODY: usize = 512;

pub struct SheetsClient {
    http_client: reqwest::Client,
    values_url: Url,
    sheet_id: String,
    api_key: String,
}

impl SheetsClient {
    /// Build a client for one spreadsheet range
    ///
    /// Sheet id and range are percent-encoded as path segments, so ranges such as
    /// `Tracks 2024!A:V` are safe.
    pub fn new(base_url: &str, sheet_id: &str, api_key: &str, range: &str) -> Result<Self> {
        let mut values_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid sheets base URL '{}': {}", base_url, e)))?;
        values_url
            .path_segments_mut()
            .map_err(|_| Error::Config(format!("Sheets base URL cannot carry a path: {}", base_url)))?
            .pop_if_empty()
            .extend(["spreadsheets", sheet_id, "values", range]);

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            values_url,
            sheet_id: sheet_id.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Values URL without the credential
    pub fn values_url(&self) -> &Url {
        &self.values_url
    }
}

#[async_trait]
impl TabularSource for SheetsClient {
    fn describe(&self) -> String {
        format!(
            "Google Sheets {} (key {})",
            self.sheet_id,
            mask_secret(&self.api_key)
        )
    }

    async fn fetch_values(&self) -> Result<SheetValues> {
        debug!(url = %self.values_url, "Requesting sheet values");

        let response = self
            .http_client
            .get(self.values_url.clone())
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        serde_json::from_str(&text).map_err(|e| Error::MalformedPayload(e.to_string()))
    }
}
