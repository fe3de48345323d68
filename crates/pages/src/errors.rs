//! Error types for the page objects.

use action_resilient::ActionError;
use floracart_driver::DriverError;
use thiserror::Error;

/// Page-object failure.
///
/// Action and driver failures pass through unmodified with their diagnostic
/// context; `AssertionFailed` is the business-rule mismatch case and is never
/// retried locally.
#[derive(Debug, Error, Clone)]
pub enum PageError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    /// A business expectation did not hold (wrong count, wrong total, …).
    #[error("Assertion failed ({what}): expected {expected}, got {actual}")]
    AssertionFailed {
        what: String,
        expected: String,
        actual: String,
    },
}

impl PageError {
    pub fn assertion(
        what: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::AssertionFailed {
            what: what.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn is_assertion(&self) -> bool {
        matches!(self, PageError::AssertionFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_message_names_expectation() {
        let err = PageError::assertion("cart item count", "2", "1");
        assert_eq!(
            err.to_string(),
            "Assertion failed (cart item count): expected 2, got 1"
        );
        assert!(err.is_assertion());
    }
}
