//! Handler errors
//!
//! Every error body has the Remote-API error shape `{ "detail": "..." }`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Malformed or out-of-range request parameters (422)
    Validation(String),
    /// The data source has no catalog to answer from (404)
    NotFound(String),
    /// The data source does not offer this operation (501)
    NotSupported(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::NotSupported(msg) => (StatusCode::NOT_IMPLEMENTED, msg),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
