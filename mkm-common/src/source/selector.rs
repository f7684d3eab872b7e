//! Data-source selection
//!
//! Decided once per process, in this order:
//! 1. spreadsheet id and key both configured: Sheets
//! 2. published on a static host, no API base URL, or the remote health probe
//!    fails: Static
//! 3. otherwise: Remote

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::{DataSource, RemoteApiSource, SheetsSource, SourceKind, StaticSource};
use crate::config::AppConfig;
use crate::error::Result;

/// Upper bound on the remote `/_healthz` probe
pub const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Source the configuration asks for, before probing the remote API
pub fn preferred_kind(config: &AppConfig) -> SourceKind {
    if config.has_sheets() {
        SourceKind::Sheets
    } else if config.is_static_host() || config.api_base_url.is_none() {
        SourceKind::Static
    } else {
        SourceKind::Remote
    }
}

/// Construct the data source for this process
///
/// Errors only for unusable configuration (e.g. an unparseable URL). An
/// unreachable remote API degrades to the static source.
pub async fn select_data_source(config: &AppConfig) -> Result<Arc<dyn DataSource>> {
    let source: Arc<dyn DataSource> = match preferred_kind(config) {
        SourceKind::Sheets => Arc::new(SheetsSource::from_config(config)?),
        SourceKind::Static => Arc::new(StaticSource::new(config.simulated_latency)),
        SourceKind::Remote => {
            let base_url = config.api_base_url.as_deref().unwrap_or_default();
            let remote = RemoteApiSource::new(base_url)?;
            if probe(&remote).await {
                Arc::new(remote)
            } else {
                Arc::new(StaticSource::new(config.simulated_latency))
            }
        }
    };

    info!(
        kind = ?source.kind(),
        label = source.kind().label(),
        "Data source selected"
    );
    Ok(source)
}

async fn probe(remote: &RemoteApiSource) -> bool {
    match tokio::time::timeout(HEALTH_PROBE_TIMEOUT, remote.check_health()).await {
        Ok(reply) if reply.ok() => true,
        Ok(reply) => {
            warn!(
                url = %remote.base_url(),
                status = reply.status,
                "Remote API health check failed, using sample data"
            );
            false
        }
        Err(_) => {
            warn!(url = %remote.base_url(), "Remote API health check timed out, using sample data");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig::default()
    }

    #[test]
    fn test_sheets_wins_when_fully_configured() {
        let config = AppConfig {
            sheet_id: Some("id".to_string()),
            sheets_api_key: Some("key".to_string()),
            api_base_url: Some("http://api".to_string()),
            public_host: Some("me.github.io".to_string()),
            ..config()
        };
        assert_eq!(preferred_kind(&config), SourceKind::Sheets);
    }

    #[test]
    fn test_partial_sheets_config_is_ignored() {
        let config = AppConfig {
            sheet_id: Some("id".to_string()),
            api_base_url: Some("http://api".to_string()),
            ..config()
        };
        assert_eq!(preferred_kind(&config), SourceKind::Remote);
    }

    #[test]
    fn test_static_host_or_no_api_is_static() {
        assert_eq!(preferred_kind(&config()), SourceKind::Static);

        let config = AppConfig {
            api_base_url: Some("http://api".to_string()),
            public_host: Some("me.github.io".to_string()),
            ..config()
        };
        assert_eq!(preferred_kind(&config), SourceKind::Static);
    }

    #[tokio::test]
    async fn test_unreachable_remote_falls_back_to_static() {
        // Reserve a port, then close it so the probe is refused
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = AppConfig {
            api_base_url: Some(format!("http://{}", addr)),
            ..config()
        };
        let source = select_data_source(&config).await.unwrap();
        assert_eq!(source.kind(), SourceKind::Static);
    }

    #[tokio::test]
    async fn test_sheets_source_constructed_without_network() {
        let config = AppConfig {
            sheet_id: Some("id".to_string()),
            sheets_api_key: Some("key".to_string()),
            ..config()
        };
        let source = select_data_source(&config).await.unwrap();
        assert_eq!(source.kind(), SourceKind::Sheets);
    }
}
