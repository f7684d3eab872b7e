//! Command-line interface
//!
//! `mkm-ui [serve]` runs the server; `mkm-ui search <query>` runs one search
//! through the selected data source and prints a table.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mkm_common::config::ConfigOverrides;
use mkm_common::models::track::percent;
use mkm_common::models::{SearchParams, SearchResponse, DEFAULT_PAGE_SIZE};
use mkm_common::search::{sort_tracks, SortConfig, SortDirection, SortField};
use mkm_common::{DataSource, Track};

#[derive(Parser, Debug)]
#[command(name = "mkm-ui")]
#[command(about = "MusikkMeta music catalog browser")]
#[command(version)]
pub struct Cli {
    /// TOML config file (default: <config dir>/musikkmeta/mkm-ui.toml)
    #[arg(long, env = "MKM_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Per-run overrides of config-file and environment settings
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Spreadsheet id of the catalog sheet
    #[arg(long, global = true)]
    pub sheet_id: Option<String>,

    /// Sheets API key
    #[arg(long, global = true)]
    pub sheets_api_key: Option<String>,

    /// Sheets API base URL
    #[arg(long, global = true)]
    pub sheets_base_url: Option<String>,

    /// Cell range holding the catalog
    #[arg(long, global = true)]
    pub sheet_range: Option<String>,

    /// Remote API base URL
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// Public host name the UI is served under
    #[arg(long, global = true)]
    pub public_host: Option<String>,

    /// Address to listen on
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, global = true)]
    pub port: Option<u16>,
}

impl SettingsArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            sheet_id: self.sheet_id.clone(),
            sheets_api_key: self.sheets_api_key.clone(),
            sheets_base_url: self.sheets_base_url.clone(),
            sheet_range: self.sheet_range.clone(),
            api_base_url: self.api_base_url.clone(),
            public_host: self.public_host.clone(),
            host: self.host.clone(),
            port: self.port,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web UI (default)
    Serve,
    /// Search the catalog and print one page of results
    Search(SearchArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    pub query: String,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Column to sort the page by (e.g. popularity, tempo, track_name)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,
}

/// Run one search; `Err` carries the failure detail
pub async fn run_search(source: &dyn DataSource, args: &SearchArgs) -> Result<String, String> {
    let sort = match &args.sort {
        Some(field) => {
            let field = field.parse::<SortField>().map_err(|e| e.to_string())?;
            let direction = if args.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            Some(SortConfig::new(field, direction))
        }
        None => None,
    };

    let params = SearchParams::new(args.query.clone()).with_page(args.page, args.page_size);
    let mut response = source
        .search_tracks(params)
        .await
        .into_result()
        .map_err(|e| e.detail)?;

    if let Some(config) = sort {
        sort_tracks(&mut response.tracks, config);
    }
    Ok(render_table(&response, args.page.max(1)))
}

const COLUMNS: [(&str, usize); 7] = [
    ("Track", 32),
    ("Artists", 24),
    ("Time", 6),
    ("Key", 9),
    ("Tempo", 8),
    ("Energy", 6),
    ("Dance", 6),
];

/// Fixed-width results table followed by `page X/Y, N matches`
pub fn render_table(response: &SearchResponse, page: usize) -> String {
    let mut out = String::new();

    let header: Vec<String> = COLUMNS.iter().map(|(name, width)| cell(name, *width)).collect();
    out.push_str(header.join(" ").trim_end());
    out.push('\n');
    let rule: Vec<String> = COLUMNS.iter().map(|(_, width)| "-".repeat(*width)).collect();
    out.push_str(&rule.join(" "));
    out.push('\n');

    for track in &response.tracks {
        let values = row(track);
        let cells: Vec<String> = values
            .iter()
            .zip(COLUMNS.iter())
            .map(|(value, (_, width))| cell(value, *width))
            .collect();
        out.push_str(cells.join(" ").trim_end());
        out.push('\n');
    }

    out.push_str(&format!(
        "page {}/{}, {} matches",
        page, response.pages, response.total
    ));
    out
}

fn row(track: &Track) -> [String; 7] {
    [
        track.display_name().to_string(),
        track.display_artists().to_string(),
        track.duration_display(),
        track.key_display(),
        track.tempo_display(),
        percent(track.energy),
        percent(track.danceability),
    ]
}

/// Pad or truncate to exactly `width` characters
fn cell(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count > width {
        let mut truncated: String = value.chars().take(width.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    } else {
        format!("{:<width$}", value, width = width)
    }
}
