//! Error responses of the fake node, shaped like a real evade84 node's.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use eef_node_api::ErrorResponse;
use serde_json::Value;

/// An error a handler can return; converts directly to an HTTP response.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    /// `422` with an arbitrary validation payload.
    Unprocessable(Value),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Unprocessable(payload) => {
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
