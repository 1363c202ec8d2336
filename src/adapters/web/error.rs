//! HTTP error responses for the web adapter.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::error::SigtraderError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<SigtraderError> for WebError {
    fn from(err: SigtraderError) -> Self {
        let status = match &err {
            SigtraderError::ConfigParse { .. }
            | SigtraderError::ConfigMissing { .. }
            | SigtraderError::ConfigInvalid { .. } => StatusCode::BAD_REQUEST,
            SigtraderError::NoData { .. } | SigtraderError::InsufficientData { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            SigtraderError::Data { .. }
            | SigtraderError::Serialize(_)
            | SigtraderError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
