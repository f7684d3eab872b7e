//! Configuration loading
//!
//! Every setting resolves in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Blank values count as absent at every level. The environment is read here and
//! nowhere else; the resulting [`AppConfig`] is passed explicitly to whatever
//! needs it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::{ColumnLayout, DEFAULT_TTL};
use crate::error::{Error, Result};
use crate::sheets::DEFAULT_SHEETS_BASE_URL;

pub const ENV_CONFIG: &str = "MKM_CONFIG";
pub const ENV_SHEET_ID: &str = "MKM_SHEET_ID";
pub const ENV_SHEETS_API_KEY: &str = "MKM_SHEETS_API_KEY";
pub const ENV_SHEETS_BASE_URL: &str = "MKM_SHEETS_BASE_URL";
pub const ENV_SHEET_RANGE: &str = "MKM_SHEET_RANGE";
pub const ENV_API_BASE_URL: &str = "MKM_API_BASE_URL";
pub const ENV_PUBLIC_HOST: &str = "MKM_PUBLIC_HOST";
pub const ENV_CACHE_TTL_SECS: &str = "MKM_CACHE_TTL_SECS";
pub const ENV_SIMULATED_LATENCY_MS: &str = "MKM_SIMULATED_LATENCY_MS";
pub const ENV_HOST: &str = "MKM_UI_HOST";
pub const ENV_PORT: &str = "MKM_UI_PORT";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5780;

/// Settings as read from the TOML file (all optional)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub sheet_id: Option<String>,
    pub sheets_api_key: Option<String>,
    pub sheets_base_url: Option<String>,
    pub sheet_range: Option<String>,
    pub api_base_url: Option<String>,
    pub public_host: Option<String>,
    pub cache_ttl_secs: Option<u64>,
    pub simulated_latency_ms: Option<u64>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Settings given on the command line (all optional)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub sheet_id: Option<String>,
    pub sheets_api_key: Option<String>,
    pub sheets_base_url: Option<String>,
    pub sheet_range: Option<String>,
    pub api_base_url: Option<String>,
    pub public_host: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Resolved configuration
#[derive(Clone, PartialEq)]
pub struct AppConfig {
    pub sheet_id: Option<String>,
    pub sheets_api_key: Option<String>,
    pub sheets_base_url: String,
    pub sheet_range: String,
    pub api_base_url: Option<String>,
    /// Host name the UI is published under (static-hosting detection)
    pub public_host: Option<String>,
    pub cache_ttl: Duration,
    /// Artificial delay before local searches answer
    pub simulated_latency: Duration,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sheet_id: None,
            sheets_api_key: None,
            sheets_base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            sheet_range: ColumnLayout::V1.range(),
            api_base_url: None,
            public_host: None,
            cache_ttl: DEFAULT_TTL,
            simulated_latency: Duration::ZERO,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

// Hand-written so the credential never reaches a log line
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("sheet_id", &self.sheet_id)
            .field("sheets_api_key", &self.sheets_api_key.as_deref().map(mask_secret))
            .field("sheets_base_url", &self.sheets_base_url)
            .field("sheet_range", &self.sheet_range)
            .field("api_base_url", &self.api_base_url)
            .field("public_host", &self.public_host)
            .field("cache_ttl", &self.cache_ttl)
            .field("simulated_latency", &self.simulated_latency)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    /// Resolve from CLI overrides, environment and the TOML file at `config_path`
    ///
    /// `config_path` falls back to `MKM_CONFIG`, then [`default_config_path`].
    pub fn load(cli: &ConfigOverrides, config_path: Option<&Path>) -> Result<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(|| env_value(ENV_CONFIG).map(PathBuf::from))
            .or_else(default_config_path);

        let toml = match path {
            Some(path) => load_toml_config(&path)?,
            None => {
                warn!("Could not determine config directory, using defaults");
                TomlConfig::default()
            }
        };

        Self::resolve(cli, &toml)
    }

    /// Apply CLI > ENV > TOML > default to every field
    pub fn resolve(cli: &ConfigOverrides, toml: &TomlConfig) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            sheet_id: pick(&cli.sheet_id, ENV_SHEET_ID, &toml.sheet_id),
            sheets_api_key: pick(&cli.sheets_api_key, ENV_SHEETS_API_KEY, &toml.sheets_api_key),
            sheets_base_url: pick(&cli.sheets_base_url, ENV_SHEETS_BASE_URL, &toml.sheets_base_url)
                .unwrap_or(defaults.sheets_base_url),
            sheet_range: pick(&cli.sheet_range, ENV_SHEET_RANGE, &toml.sheet_range)
                .unwrap_or(defaults.sheet_range),
            api_base_url: pick(&cli.api_base_url, ENV_API_BASE_URL, &toml.api_base_url)
                .map(|url| url.trim_end_matches('/').to_string()),
            public_host: pick(&cli.public_host, ENV_PUBLIC_HOST, &toml.public_host),
            cache_ttl: pick_number(None, ENV_CACHE_TTL_SECS, toml.cache_ttl_secs)?
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            simulated_latency: pick_number(None, ENV_SIMULATED_LATENCY_MS, toml.simulated_latency_ms)?
                .map(Duration::from_millis)
                .unwrap_or(defaults.simulated_latency),
            host: pick(&cli.host, ENV_HOST, &toml.host).unwrap_or(defaults.host),
            port: pick_number(cli.port, ENV_PORT, toml.port)?.unwrap_or(defaults.port),
        })
    }

    /// Both spreadsheet settings are present
    pub fn has_sheets(&self) -> bool {
        self.sheet_id.is_some() && self.sheets_api_key.is_some()
    }

    /// UI is published on a static host (GitHub Pages)
    pub fn is_static_host(&self) -> bool {
        self.public_host
            .as_deref()
            .is_some_and(|host| host.to_ascii_lowercase().contains("github.io"))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// One-line summary for the startup log
    pub fn log_summary(&self) {
        info!(
            sheets = self.has_sheets(),
            sheet_id = self.sheet_id.as_deref().unwrap_or("-"),
            sheets_api_key = %self.sheets_api_key.as_deref().map(mask_secret).unwrap_or_else(|| "-".to_string()),
            api_base_url = self.api_base_url.as_deref().unwrap_or("-"),
            public_host = self.public_host.as_deref().unwrap_or("-"),
            cache_ttl_secs = self.cache_ttl.as_secs(),
            "Configuration resolved"
        );
    }
}

/// `<config_dir>/musikkmeta/mkm-ui.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("musikkmeta").join("mkm-ui.toml"))
}

/// Read a TOML config file
///
/// A missing file yields the empty config with a warning. A file that exists
/// but cannot be read or parsed is an error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!("Config file not found at {}, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

    info!("Loaded config file {}", path.display());
    Ok(config)
}

/// First four characters followed by an ellipsis
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    format!("{}…", prefix)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|v| non_blank(&v))
}

fn pick(cli: &Option<String>, env_name: &str, toml: &Option<String>) -> Option<String> {
    cli.as_deref()
        .and_then(non_blank)
        .or_else(|| env_value(env_name))
        .or_else(|| toml.as_deref().and_then(non_blank))
}

fn pick_number<T>(cli: Option<T>, env_name: &str, toml: Option<T>) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if cli.is_some() {
        return Ok(cli);
    }

    if let Some(raw) = env_value(env_name) {
        return raw
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid {} '{}': {}", env_name, raw, e)));
    }

    Ok(toml)
}
