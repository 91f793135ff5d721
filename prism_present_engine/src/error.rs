//! Error types for the Prism present engine
//!
//! This module defines the error types used throughout the presentation
//! subsystem. Transient surface staleness is deliberately NOT an error:
//! it is reported through `AcquireResult::OutOfDate` so the caller is
//! forced to branch on it.

use std::fmt;

/// Result type for Prism present engine operations
pub type PrismResult<T> = Result<T, PrismError>;

/// Prism present engine errors
#[derive(Debug, Clone)]
pub enum PrismError {
    /// Backend-specific error (unexpected native API result codes)
    BackendError(String),

    /// Chain construction failed (unsupported surface, zero images obtainable)
    InitializationFailed(String),

    /// The device is lost or unresponsive (fence-wait timeout, dead context).
    /// No local recovery exists; the caller must tear down the renderer.
    DeviceLost(String),

    /// Operation on a manager that has been torn down or never became usable
    InvalidOperation(String),
}

impl fmt::Display for PrismError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrismError::BackendError(msg) => write!(f, "Backend error: {}", msg),
            PrismError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            PrismError::DeviceLost(msg) => write!(f, "Device lost: {}", msg),
            PrismError::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for PrismError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
