//! Error taxonomy for the action engine.

use floracart_driver::DriverError;
use thiserror::Error;

use crate::types::Attempt;

/// Action engine failure.
#[derive(Debug, Error, Clone)]
pub enum ActionError {
    /// Every candidate in a set failed its visibility probe.
    #[error("No candidate matched for '{what}'; tried {}", format_attempts(.attempts))]
    NoCandidateMatched { what: String, attempts: Vec<Attempt> },

    /// A pre-condition (visible, enabled) failed before a mutating action.
    #[error("Element not interactable: {target} ({reason})")]
    ElementNotInteractable { target: String, reason: String },

    /// A readiness predicate never became true within its timeout.
    #[error("Readiness timeout for '{what}': {elapsed_ms}ms elapsed (limit {timeout_ms}ms)")]
    ReadinessTimeout {
        what: String,
        elapsed_ms: u64,
        timeout_ms: u64,
    },

    /// Every navigation route failed or never confirmed arrival.
    #[error("Navigation exhausted for '{what}'; tried {}", format_routes(.routes))]
    NavigationExhausted { what: String, routes: Vec<String> },

    /// Underlying driver failure that no local fallback absorbed.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl ActionError {
    /// Candidates recorded on an exhaustion failure, for assertions and logs.
    pub fn attempted(&self) -> Vec<String> {
        match self {
            ActionError::NoCandidateMatched { attempts, .. } => {
                attempts.iter().map(|a| a.target.clone()).collect()
            }
            ActionError::NavigationExhausted { routes, .. } => routes.clone(),
            _ => Vec::new(),
        }
    }
}

fn format_attempts(attempts: &[Attempt]) -> String {
    let parts: Vec<String> = attempts
        .iter()
        .map(|a| format!("{} ({})", a.target, a.reason))
        .collect();
    format!("[{}]", parts.join(", "))
}

fn format_routes(routes: &[String]) -> String {
    format!("[{}]", routes.join(", "))
}
