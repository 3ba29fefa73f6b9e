//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and a JSON body of the form
//! `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use duxcall_core::errors::CallError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use duxcall_api::middleware::error_handling::AppError;
/// use duxcall_core::errors::CallError;
///
/// async fn handler(code: String) -> Result<Json<String>, AppError> {
///     if code.is_empty() {
///         return Err(AppError(CallError::Validation("empty code".to_string())));
///     }
///     Ok(Json(code))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub CallError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CallError::NotFound(_) => StatusCode::NOT_FOUND,
            CallError::Validation(_) => StatusCode::BAD_REQUEST,
            CallError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CallError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on `Result<T, CallError>` inside handlers.
impl From<CallError> for AppError {
    fn from(err: CallError) -> Self {
        AppError(err)
    }
}

/// Store and repository failures surface as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CallError::Database(err))
    }
}

/// Maps a CallError directly to an HTTP response.
pub fn map_error(err: CallError) -> Response {
    AppError(err).into_response()
}

/// Turns failures from the tower middleware stack (timeouts included) into
/// the same JSON error body the handlers produce.
pub async fn handle_middleware_error(err: tower::BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        let body = Json(json!({ "error": "Request timed out" }));
        return (StatusCode::REQUEST_TIMEOUT, body).into_response();
    }

    map_error(CallError::Internal(err))
}
