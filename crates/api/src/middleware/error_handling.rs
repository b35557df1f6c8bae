//! # Error Handling Middleware
//!
//! Maps scheduling errors and request-identity failures to HTTP status codes
//! and a JSON `{ "error": message }` body, so every endpoint fails the same
//! way.
//!
//! | error                | status |
//! |----------------------|--------|
//! | `Validation`         | 400    |
//! | missing actor        | 401    |
//! | wrong actor          | 403    |
//! | `NotFound`           | 404    |
//! | `Conflict`           | 409    |
//! | `IllegalTransition`  | 422    |
//! | `Storage`            | 500    |
//! | `Upstream`           | 502    |

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mentorsync_core::errors::SchedulingError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use mentorsync_api::middleware::error_handling::AppError;
/// use mentorsync_core::errors::SchedulingError;
///
/// async fn handler(topic: String) -> Result<Json<String>, AppError> {
///     if topic.trim().is_empty() {
///         return Err(SchedulingError::validation("topic", "Topic is required").into());
///     }
///     Ok(Json(topic))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub enum AppError {
    Scheduling(SchedulingError),
    /// The request carried no usable actor identity.
    Unauthorized(String),
    /// The actor may not act on this resource.
    Forbidden(String),
}

/// Status code for a scheduling error.
pub fn status_for(err: &SchedulingError) -> StatusCode {
    match err {
        SchedulingError::Validation { .. } => StatusCode::BAD_REQUEST,
        SchedulingError::NotFound(_) => StatusCode::NOT_FOUND,
        SchedulingError::Conflict(_) => StatusCode::CONFLICT,
        SchedulingError::IllegalTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SchedulingError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        SchedulingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Scheduling(err) => {
                let status = status_for(&err);
                if status.is_server_error() {
                    error!("Request failed: status={}, error={:?}", status, err);
                }
                let body = match &err {
                    SchedulingError::Validation { field, .. } => {
                        json!({ "error": err.to_string(), "field": field })
                    }
                    _ => json!({ "error": err.to_string() }),
                };
                (status, body)
            }
            AppError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, json!({ "error": message }))
            }
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, json!({ "error": message })),
        };

        (status, Json(body)).into_response()
    }
}

impl From<SchedulingError> for AppError {
    fn from(err: SchedulingError) -> Self {
        AppError::Scheduling(err)
    }
}

/// Undecodable request bodies are validation failures on `body`.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Scheduling(SchedulingError::validation("body", rejection.body_text()))
    }
}

/// Maps a SchedulingError straight to an HTTP response
pub fn map_error(err: SchedulingError) -> Response {
    AppError::from(err).into_response()
}
