use std::error::Error;
use duxcall_core::errors::{CallError, CallResult};

#[test]
fn test_call_error_display() {
    let not_found = CallError::NotFound("Hospital not found".to_string());
    let validation = CallError::Validation("Invalid day of week".to_string());
    let database = CallError::Database(eyre::eyre!("Database connection failed"));
    let internal = CallError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(
        not_found.to_string(),
        "Resource not found: Hospital not found"
    );
    assert_eq!(validation.to_string(), "Validation error: Invalid day of week");
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_error_source() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let call_error = CallError::Internal(Box::new(io_error));

    assert!(call_error.source().is_some());
}

#[test]
fn test_call_result() {
    let result: CallResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: CallResult<i32> = Err(CallError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_eyre_report() {
    let call_error: CallError = eyre::eyre!("pool timed out").into();

    assert!(matches!(call_error, CallError::Database(_)));
    assert!(call_error.to_string().contains("pool timed out"));
}
