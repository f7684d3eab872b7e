//! Remote-API data source
//!
//! Forwards every operation to a server implementing the search/OAuth contract
//! (`/search`, `/_healthz`, `/login`, `/callback`, `/create-playlist`). Nothing is
//! cached locally. Transport and decode failures become `ApiResponse` failures
//! with status 502.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ApiResponse, DataSource, SourceKind};
use crate::error::{Error, Result};
use crate::models::{
    CallbackOutcome, CallbackParams, HealthResponse, LoginResponse, PlaylistCreated,
    PlaylistRequest, SearchParams, SearchResponse,
};

const USER_AGENT: &str = concat!("MusikkMeta/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Status reported when the remote could not be reached or answered garbage
const BAD_GATEWAY: u16 = 502;

pub struct RemoteApiSource {
    http_client: reqwest::Client,
    base_url: Url,
}

impl RemoteApiSource {
    pub fn new(base_url: &str) -> Result<Self> {
        // Trailing slash so that `join` appends instead of replacing the last segment
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;

        // OAuth endpoints answer with redirects that must be reported, not followed
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Internal(format!("Bad endpoint path '{}': {}", path, e)))
    }

    async fn send(&self, request: Result<RequestBuilder>) -> std::result::Result<Response, String> {
        let request = request.map_err(|e| e.to_string())?;
        request.send().await.map_err(|e| {
            warn!(error = %e, "Remote API request failed");
            format!("Remote API unreachable: {}", e)
        })
    }

    async fn call<T: DeserializeOwned>(&self, request: Result<RequestBuilder>) -> ApiResponse<T> {
        match self.send(request).await {
            Ok(response) => decode(response).await,
            Err(detail) => ApiResponse::failure(BAD_GATEWAY, detail),
        }
    }

    fn get(&self, path: &str) -> Result<RequestBuilder> {
        Ok(self.http_client.get(self.endpoint(path)?))
    }
}

/// Turn a remote reply into the envelope, keeping its status code
async fn decode<T: DeserializeOwned>(response: Response) -> ApiResponse<T> {
    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            return ApiResponse::failure(BAD_GATEWAY, format!("Failed to read remote response: {}", e))
        }
    };

    if status.is_success() {
        return match serde_json::from_str(&text) {
            Ok(body) => ApiResponse {
                status: status.as_u16(),
                body: Ok(body),
            },
            Err(e) => {
                ApiResponse::failure(BAD_GATEWAY, format!("Malformed response from remote API: {}", e))
            }
        };
    }

    ApiResponse::failure(status.as_u16(), error_detail(status, &text))
}

/// Human-readable reason from an error body
///
/// Understands `{ "detail": "..." }`, validation-style `{ "detail": [..] }` and
/// `{ "error": "..." }`; anything else falls back to the raw text or the status.
fn error_detail(status: StatusCode, text: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        for key in ["detail", "error"] {
            match value.get(key) {
                Some(Value::String(s)) => return s.clone(),
                Some(Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    } else {
        trimmed.to_string()
    }
}

fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[async_trait]
impl DataSource for RemoteApiSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    async fn search_tracks(&self, params: SearchParams) -> ApiResponse<SearchResponse> {
        debug!(query = %params.query, page = params.page, "Forwarding search");
        let request = self.get("search").map(|r| {
            r.query(&[
                ("query", params.query.clone()),
                ("page", params.page.to_string()),
                ("page_size", params.page_size.to_string()),
            ])
        });
        self.call(request).await
    }

    async fn check_health(&self) -> ApiResponse<HealthResponse> {
        self.call(self.get("_healthz")).await
    }

    async fn login(&self) -> ApiResponse<LoginResponse> {
        let response = match self.send(self.get("login")).await {
            Ok(response) => response,
            Err(detail) => return ApiResponse::failure(BAD_GATEWAY, detail),
        };

        if response.status().is_redirection() {
            return match location(&response) {
                Some(url) => ApiResponse::success(LoginResponse {
                    authorization_url: url,
                }),
                None => ApiResponse::failure(BAD_GATEWAY, "Login redirect without a Location header"),
            };
        }

        decode(response).await
    }

    async fn callback(&self, params: CallbackParams) -> ApiResponse<CallbackOutcome> {
        let request = self
            .get("callback")
            .map(|r| r.query(&[("code", &params.code), ("state", &params.state)]));
        let response = match self.send(request).await {
            Ok(response) => response,
            Err(detail) => return ApiResponse::failure(BAD_GATEWAY, detail),
        };

        if !response.status().is_redirection() {
            return decode(response).await;
        }

        // The OAuth server redirects back to `/?spotify_auth=success|error&error=..`
        let Some(target) = location(&response).and_then(|l| self.base_url.join(&l).ok()) else {
            return ApiResponse::failure(BAD_GATEWAY, "Callback redirect without a usable Location header");
        };

        let mut auth = None;
        let mut error = None;
        for (key, value) in target.query_pairs() {
            match key.as_ref() {
                "spotify_auth" => auth = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                _ => {}
            }
        }

        let success = auth.as_deref() == Some("success");
        ApiResponse::success(CallbackOutcome {
            success,
            error: if success { None } else { error.or(auth) },
        })
    }

    async fn create_playlist(&self, request: PlaylistRequest) -> ApiResponse<PlaylistCreated> {
        let builder = self
            .endpoint("create-playlist")
            .map(|url| self.http_client.post(url).json(&request));
        self.call(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let source = RemoteApiSource::new("http://localhost:8000/routes/api").unwrap();
        assert_eq!(
            source.endpoint("search").unwrap().as_str(),
            "http://localhost:8000/routes/api/search"
        );

        let source = RemoteApiSource::new("http://localhost:8000/").unwrap();
        assert_eq!(
            source.endpoint("_healthz").unwrap().as_str(),
            "http://localhost:8000/_healthz"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            RemoteApiSource::new("::nope").err().unwrap(),
            Error::Config(_)
        ));
    }

    #[test]
    fn test_error_detail_shapes() {
        let bad = StatusCode::BAD_REQUEST;
        assert_eq!(error_detail(bad, r#"{"detail":"Not logged in"}"#), "Not logged in");
        assert_eq!(error_detail(bad, r#"{"error":"Spotify down"}"#), "Spotify down");
        assert_eq!(
            error_detail(bad, r#"{"detail":[{"msg":"field required"}]}"#),
            r#"[{"msg":"field required"}]"#
        );
        assert_eq!(error_detail(bad, "plain text"), "plain text");
        assert_eq!(error_detail(StatusCode::NOT_FOUND, ""), "Not Found");
    }
}
