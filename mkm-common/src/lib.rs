//! # MusikkMeta Common Library
//!
//! Catalog layer shared by the MusikkMeta UI shell:
//! - Track model and wire types (Remote-API JSON shapes)
//! - Record normalizer for spreadsheet rows
//! - Time-boxed catalog cache with stale-on-error fallback
//! - Search engine (filter, paginate, sort, quick-jump, facets)
//! - Data-source contract, its three implementations and the selector
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod sheets;
pub mod source;

pub use catalog::Catalog;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use models::Track;
pub use source::{select_data_source, ApiResponse, DataSource, SourceKind};
