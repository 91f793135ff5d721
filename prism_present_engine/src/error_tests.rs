//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{PrismError as Error, PrismResult as Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("vkAcquireNextImageKHR returned ERROR_UNKNOWN".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("ERROR_UNKNOWN"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("surface reported zero images".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("zero images"));
}

#[test]
fn test_device_lost_display() {
    let err = Error::DeviceLost("fence wait timed out after 1s".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Device lost"));
    assert!(display.contains("fence wait timed out"));
}

#[test]
fn test_invalid_operation_display() {
    let err = Error::InvalidOperation("acquire on destroyed swapchain".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid operation"));
    assert!(display.contains("destroyed swapchain"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::DeviceLost("gone".to_string());
    // Verify Error implements std::error::Error trait
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let err1 = Error::BackendError("test".to_string());
    assert!(format!("{:?}", err1).contains("BackendError"));

    let err2 = Error::InitializationFailed("init".to_string());
    assert!(format!("{:?}", err2).contains("InitializationFailed"));

    let err3 = Error::DeviceLost("lost".to_string());
    assert!(format!("{:?}", err3).contains("DeviceLost"));

    let err4 = Error::InvalidOperation("op".to_string());
    assert!(format!("{:?}", err4).contains("InvalidOperation"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::BackendError("test".to_string());
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));

    let err3 = Error::DeviceLost("lost".to_string());
    let err4 = err3.clone();
    assert_eq!(format!("{}", err3), format!("{}", err4));
}

// ============================================================================
// RESULT TYPE TESTS
// ============================================================================

#[test]
fn test_result_type_ok() {
    fn returns_ok() -> Result<u32> {
        Ok(7)
    }

    let result = returns_ok();
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), 7);
}

#[test]
fn test_result_type_err() {
    fn returns_error() -> Result<u32> {
        Err(Error::InvalidOperation("present after destroy".to_string()))
    }

    let result = returns_error();
    assert!(result.is_err());

    if let Err(e) = result {
        assert!(format!("{}", e).contains("present after destroy"));
    }
}

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<u32> {
        Err(Error::DeviceLost("simulated".to_string()))
    }

    fn outer() -> Result<u32> {
        inner()?;
        Ok(7)
    }

    let result = outer();
    assert!(result.is_err());
}
