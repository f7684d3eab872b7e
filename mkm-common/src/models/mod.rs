//! Data models for catalog entities and API payloads

pub mod responses;
pub mod track;

// Re-export commonly used types
pub use responses::{
    CallbackOutcome, CallbackParams, ErrorDetail, HealthResponse, LoginResponse, PlaylistCreated,
    PlaylistRequest, SearchParams, SearchResponse, SheetValues, DEFAULT_PAGE_SIZE,
    DEFAULT_PLAYLIST_NAME,
};
pub use track::Track;
