use axum::{body::to_bytes, http::StatusCode, response::Response};
use duxcall_api::middleware::error_handling::{map_error, AppError};
use duxcall_core::errors::CallError;
use pretty_assertions::assert_eq;
use serde_json::Value;

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_error_handling_not_found() {
    let response = map_error(CallError::NotFound("Hospital nowhere not found".to_string()));

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Resource not found: Hospital nowhere not found"
    );
}

#[tokio::test]
async fn test_error_handling_validation() {
    let response = map_error(CallError::Validation("Invalid time: 9am".to_string()));

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Validation error: Invalid time: 9am"
    );
}

#[tokio::test]
async fn test_error_handling_database() {
    let response = map_error(CallError::Database(eyre::eyre!("connection refused")));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = CallError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_eyre_report_converts_to_database_error() {
    let error: AppError = eyre::eyre!("pool timed out").into();

    assert!(matches!(error.0, CallError::Database(_)));
}
