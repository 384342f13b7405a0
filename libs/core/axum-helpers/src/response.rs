//! Uniform response envelope returned by every endpoint.
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "Product retrieved successfully",
//!   "data": { "id": 1, "name": "Widget" },
//!   "status": 200
//! }
//! ```
//!
//! Failures carry `data: null` and an `error` object:
//!
//! ```json
//! {
//!   "success": false,
//!   "message": "Product with id 7 not found",
//!   "data": null,
//!   "status": 404,
//!   "error": { "code": "NOT_FOUND", "detail": "Product with id 7 not found" }
//! }
//! ```

use crate::errors::ErrorCode;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error part of a failed [`ApiResponse`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetails {
    /// Machine-readable identifier, e.g. `NOT_FOUND`
    pub code: ErrorCode,
    /// Human-readable description of what went wrong
    pub detail: String,
    /// Per-field messages, present for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Response envelope: `{success, message, data, status, error}`.
///
/// `status` always equals the HTTP status code the envelope is sent with.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

/// Documentation shape of an envelope whose `data` is always null.
///
/// Used as the OpenAPI body for failures and payload-free successes, which
/// are sent as `ApiResponse<()>`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmptyApiResponse {
    pub success: bool,
    pub message: String,
    #[schema(value_type = Object, nullable)]
    pub data: Option<serde_json::Value>,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

impl<T> ApiResponse<T> {
    /// 200 OK with data
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::success(StatusCode::OK, Some(data), message)
    }

    /// 201 Created with data
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::success(StatusCode::CREATED, Some(data), message)
    }

    pub fn success(status: StatusCode, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            status: status.as_u16(),
            error: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl ApiResponse<()> {
    /// Success without a payload (e.g. deletes)
    pub fn message_only(status: StatusCode, message: impl Into<String>) -> Self {
        Self::success(status, None, message)
    }

    pub fn failure(status: StatusCode, message: impl Into<String>, error: ErrorDetails) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            status: status.as_u16(),
            error: Some(error),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
