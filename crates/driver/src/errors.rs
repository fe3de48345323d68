//! Error types for the driver seam.

use thiserror::Error;

/// Driver-level failure.
#[derive(Debug, Error, Clone)]
pub enum DriverError {
    /// Target matched no node when one was required for the operation.
    #[error("No node matches target: {0}")]
    NotFound(String),

    /// Navigation failed (unreachable URL, aborted load).
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// The driver-side wait elapsed.
    #[error("Driver wait timed out: {0}")]
    Timeout(String),

    /// Backend transport failure (browser process, protocol I/O).
    #[error("Driver backend error: {0}")]
    Backend(String),
}

impl DriverError {
    /// Transient failures that candidate/route fallback may retry past.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DriverError::Timeout(_) | DriverError::Navigation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(DriverError::Timeout("load".into()).is_retryable());
        assert!(DriverError::Navigation("/cart/".into()).is_retryable());
        assert!(!DriverError::NotFound(".mini-cart".into()).is_retryable());
        assert!(!DriverError::Backend("ws closed".into()).is_retryable());
    }
}
