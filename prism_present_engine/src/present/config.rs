/// PresentConfig - frames-in-flight and staleness policy

use std::time::Duration;
use crate::error::{PrismError, PrismResult};

/// Presentation configuration
///
/// The debounce threshold and fence timeout are policy constants that vary
/// per platform; the defaults are conservative and can be overridden by the
/// embedding renderer.
#[derive(Debug, Clone)]
pub struct PresentConfig {
    /// Number of frames the CPU may prepare ahead of the GPU.
    /// One frame synchronizer is created per slot.
    pub frames_in_flight: usize,

    /// Consecutive mismatched transform polls required before the chain is
    /// declared out of date. A single anomalous poll is never acted upon.
    pub transform_debounce_threshold: usize,

    /// Bounded CPU wait on a frame slot's fence. Exceeding it is treated as
    /// an unrecoverable device error, not a retryable condition.
    pub fence_wait_timeout: Duration,
}

impl Default for PresentConfig {
    fn default() -> Self {
        Self {
            frames_in_flight: 3,
            transform_debounce_threshold: 2,
            fence_wait_timeout: Duration::from_secs(1),
        }
    }
}

impl PresentConfig {
    /// Check the configuration for values the chain cannot operate with
    ///
    /// # Errors
    ///
    /// Returns `InitializationFailed` if `frames_in_flight` or
    /// `transform_debounce_threshold` is zero.
    pub fn validate(&self) -> PrismResult<()> {
        if self.frames_in_flight == 0 {
            return Err(PrismError::InitializationFailed(
                "frames_in_flight must be at least 1".to_string(),
            ));
        }
        if self.transform_debounce_threshold == 0 {
            return Err(PrismError::InitializationFailed(
                "transform_debounce_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
